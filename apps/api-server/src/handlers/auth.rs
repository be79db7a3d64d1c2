//! Authentication handlers - the session surface the admin views use.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use brandsite_core::ports::{PasswordService, TokenService};
use brandsite_shared::dto::{AdminUserResponse, AuthResponse, LoginRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find the admin account; a missing account and a wrong password
    // are indistinguishable to the caller.
    let user = state
        .admins
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(admin = %user.email, "Admin signed in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; sign-out is an acknowledgement and the client
/// discards its token.
pub async fn logout(identity: Identity) -> AppResult<HttpResponse> {
    tracing::info!(admin = %identity.email, "Admin signed out");
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/auth/me - the "current user" lookup admin views run on mount.
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .admins
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(AdminUserResponse {
        id: user.id,
        email: user.email,
    }))
}
