use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

// One message for every credential failure; unknown-username and
// wrong-password must be indistinguishable to the caller
const INVALID_CREDENTIALS: &str = "Incorrect username or password";

pub async fn login(
    State(state): State<AppState>,
    Form(body): Form<TokenRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let username = Username::new(body.username)
        .map_err(|_| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let user = state
        .account_service
        .verify_credentials(&username, &body.password)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let access_token = state
        .token_service
        .issue(user.username.as_str())
        .map_err(|e| {
            tracing::error!(error = %e, "Token issuance failed");
            ApiError::InternalServerError("Internal server error".to_string())
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            access_token,
            token_type: "bearer".to_string(),
        },
    ))
}

/// Form-style credentials, as submitted by the login form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
}
