use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::calculation::models::CalculationId;
use crate::calculation::ports::CalculationServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_calculation(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(calculation_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let calculation_id = CalculationId::from_string(&calculation_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .calculation_service
        .delete_calculation(&current_user.user_id, &calculation_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
