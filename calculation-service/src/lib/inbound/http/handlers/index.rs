use axum::response::Html;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Landing page: the static front end when present, a service index otherwise.
pub async fn index() -> impl IntoResponse {
    match tokio::fs::read_to_string("static/index.html").await {
        Ok(page) => Html(page).into_response(),
        Err(_) => Json(json!({
            "message": "Calculations API",
            "endpoints": {
                "auth": "/auth",
                "calculations": "/calculations"
            }
        }))
        .into_response(),
    }
}
