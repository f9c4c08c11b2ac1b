use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::ports::AccountServicePort;

/// Extension type carrying the resolved caller identity into handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: Username,
}

/// Middleware that verifies bearer tokens and resolves the caller.
///
/// Every failure mode (missing or malformed header, invalid or expired
/// token, subject no longer present in the store) short-circuits with 401
/// before any business logic runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    // Verify signature and expiry
    let claims = state.token_service.verify(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        unauthorized("Invalid or expired token")
    })?;

    // The subject carries the username
    let username = Username::new(claims.sub).map_err(|e| {
        tracing::warn!("Token subject is not a valid username: {}", e);
        unauthorized("Invalid token subject")
    })?;

    // The token is stateless; confirm the identity still exists
    let user = state
        .account_service
        .get_user_by_username(&username)
        .await
        .map_err(|e| {
            tracing::warn!("Token subject could not be resolved: {}", e);
            unauthorized("Invalid authentication credentials")
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
    });

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
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
