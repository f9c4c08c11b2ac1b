use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::CalculationData;
use crate::calculation::errors::OperationError;
use crate::calculation::models::CalculationId;
use crate::calculation::models::UpdateCalculationCommand;
use crate::calculation::ports::CalculationServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a calculation (raw JSON).
///
/// Serves PUT and PATCH alike: absent fields retain their stored values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateCalculationRequest {
    pub operation: Option<String>,
    pub operand1: Option<f64>,
    pub operand2: Option<f64>,
}

impl UpdateCalculationRequest {
    fn try_into_command(self) -> Result<UpdateCalculationCommand, OperationError> {
        let operation = self.operation.map(|s| s.parse()).transpose()?;
        Ok(UpdateCalculationCommand {
            operation,
            operand1: self.operand1,
            operand2: self.operand2,
        })
    }
}

pub async fn update_calculation(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(calculation_id): Path<String>,
    Json(body): Json<UpdateCalculationRequest>,
) -> Result<ApiSuccess<CalculationData>, ApiError> {
    let calculation_id = CalculationId::from_string(&calculation_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let command = body.try_into_command()?;

    state
        .calculation_service
        .update_calculation(&current_user.user_id, &calculation_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref calculation| ApiSuccess::new(StatusCode::OK, calculation.into()))
}
