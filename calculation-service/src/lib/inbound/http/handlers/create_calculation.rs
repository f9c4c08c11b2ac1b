use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::CalculationData;
use crate::calculation::errors::OperationError;
use crate::calculation::models::CreateCalculationCommand;
use crate::calculation::ports::CalculationServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_calculation(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Json(body): Json<CreateCalculationRequest>,
) -> Result<ApiSuccess<CalculationData>, ApiError> {
    state
        .calculation_service
        .create_calculation(&current_user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref calculation| ApiSuccess::new(StatusCode::CREATED, calculation.into()))
}

/// HTTP request body for creating a calculation (raw JSON).
///
/// The operation arrives as a keyword string so an unrecognized keyword is
/// a 400 rather than a deserialization rejection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateCalculationRequest {
    operation: String,
    operand1: f64,
    operand2: f64,
}

impl CreateCalculationRequest {
    fn try_into_command(self) -> Result<CreateCalculationCommand, OperationError> {
        let operation = self.operation.parse()?;
        Ok(CreateCalculationCommand {
            operation,
            operand1: self.operand1,
            operand2: self.operand2,
        })
    }
}

impl From<OperationError> for ApiError {
    fn from(err: OperationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
