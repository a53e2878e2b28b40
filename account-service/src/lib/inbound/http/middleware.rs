use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated subject through the request
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject {
    pub username: String,
}

/// Middleware that validates bearer tokens and records the subject in
/// request extensions.
///
/// All verification failures answer 401; which one occurred is logged for
/// diagnostics but not disclosed.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let username = state.account_service.verify_token(token).map_err(|e| {
        match &e {
            TokenError::Expired => tracing::debug!("Rejected expired token"),
            TokenError::InvalidSignature => tracing::warn!("Rejected token with bad signature"),
            _ => tracing::debug!(error = %e, "Rejected unparseable token"),
        }
        unauthorized("Invalid or expired token")
    })?;

    req.extensions_mut().insert(AuthenticatedSubject { username });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    if !auth_str.starts_with("Bearer ") {
        return Err(unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>",
        ));
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}
