//! Error handling - every repository and domain failure is converted
//! exactly once into an RFC 7807 response here. Nothing is retried and
//! nothing is fatal: a failed call leaves the server fully interactive.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use brandsite_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    /// Store-side constraint rejection, e.g. a slug collision.
    Conflict(String),
    /// The content store could not be reached.
    StoreUnavailable,
    /// The contact relay answered with a non-2xx status or not at all.
    RelayFailed,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::StoreUnavailable => write!(f, "Content store unavailable"),
            AppError::RelayFailed => write!(f, "Contact relay failed"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::RelayFailed => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Conflict(detail) => ErrorResponse::new(409, "Conflict").with_detail(detail),
            AppError::StoreUnavailable => {
                ErrorResponse::service_unavailable("The content store is unreachable")
            }
            AppError::RelayFailed => ErrorResponse::new(502, "Bad Gateway")
                .with_detail("The contact relay did not accept the submission"),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<brandsite_core::error::DomainError> for AppError {
    fn from(err: brandsite_core::error::DomainError) -> Self {
        use brandsite_core::error::DomainError;
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<brandsite_core::error::RepoError> for AppError {
    fn from(err: brandsite_core::error::RepoError) -> Self {
        use brandsite_core::error::RepoError;
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            // Slug collisions land here; the caller is expected to
            // supply a manual slug and resubmit.
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Store connection error: {}", msg);
                AppError::StoreUnavailable
            }
            RepoError::Query(msg) => {
                tracing::error!("Store query error: {}", msg);
                AppError::Internal("Content store error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
