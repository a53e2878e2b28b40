use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Username;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedSubject;
use crate::inbound::http::router::AppState;

/// Current-account endpoint. The middleware has already verified the
/// bearer token; this resolves its subject back to an account projection.
pub async fn me(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedSubject>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let username = Username::new(subject.username)
        .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;

    let account = state
        .account_service
        .find_account(&username)
        .await
        .map_err(ApiError::from)?
        // Token outlived the account; a valid signature is not proof the
        // record still exists
        .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

    Ok(ApiSuccess::new(StatusCode::OK, (&account).into()))
}
