use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::CalculationData;
use crate::calculation::models::CalculationId;
use crate::calculation::ports::CalculationServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_calculation(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(calculation_id): Path<String>,
) -> Result<ApiSuccess<CalculationData>, ApiError> {
    let calculation_id = CalculationId::from_string(&calculation_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .calculation_service
        .get_calculation(&current_user.user_id, &calculation_id)
        .await
        .map_err(ApiError::from)
        .map(|ref calculation| ApiSuccess::new(StatusCode::OK, calculation.into()))
}
