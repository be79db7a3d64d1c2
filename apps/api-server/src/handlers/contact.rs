//! Contact form handler - fire-and-forget forward to the external
//! relay. Any 2xx from the relay is success, anything else a generic
//! failure; nothing is retried.

use actix_web::{HttpResponse, web};
use reqwest::header::ACCEPT;

use brandsite_shared::dto::ContactRequest;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/contact
pub async fn submit(
    state: web::Data<AppState>,
    body: web::Json<ContactRequest>,
) -> AppResult<HttpResponse> {
    let Some(relay_url) = &state.contact_relay_url else {
        tracing::error!("CONTACT_RELAY_URL not configured");
        return Err(AppError::Internal("contact relay not configured".to_string()));
    };

    let req = body.into_inner();

    let response = state
        .http
        .post(relay_url)
        .header(ACCEPT, "application/json")
        .form(&req)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Contact relay unreachable: {}", e);
            AppError::RelayFailed
        })?;

    if !response.status().is_success() {
        tracing::error!(status = %response.status(), "Contact relay rejected submission");
        return Err(AppError::RelayFailed);
    }

    Ok(HttpResponse::Ok().finish())
}
