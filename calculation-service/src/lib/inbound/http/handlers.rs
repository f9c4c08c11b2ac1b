use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::calculation::errors::CalculationError;
use crate::calculation::models::Calculation;
use crate::calculation::models::Operation;
use crate::user::errors::UserError;

pub mod create_calculation;
pub mod delete_calculation;
pub mod get_calculation;
pub mod health;
pub mod index;
pub mod list_calculations;
pub mod login;
pub mod register;
pub mod update_calculation;

/// Successful handler response: a status code plus the response body.
///
/// Bodies are the contract payloads themselves (no envelope); the status
/// code travels alongside so handlers can return 201/200/204 uniformly.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Client-facing error with a stable status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::NotFoundByUsername(_) => ApiError::NotFound(err.to_string()),
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                tracing::error!(error = %err, "User operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<CalculationError> for ApiError {
    fn from(err: CalculationError) -> Self {
        match err {
            CalculationError::InvalidOperation(_) | CalculationError::DivisionByZero => {
                ApiError::BadRequest(err.to_string())
            }
            CalculationError::InvalidCalculationId(_) => ApiError::BadRequest(err.to_string()),
            CalculationError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CalculationError::DatabaseError(_) | CalculationError::Unknown(_) => {
                tracing::error!(error = %err, "Calculation operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

/// Response body for calculation records, shared by every calculation handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationData {
    pub id: String,
    pub operation: Operation,
    pub operand1: f64,
    pub operand2: f64,
    pub result: f64,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Calculation> for CalculationData {
    fn from(calculation: &Calculation) -> Self {
        Self {
            id: calculation.id.to_string(),
            operation: calculation.operation,
            operand1: calculation.operand1,
            operand2: calculation.operand2,
            result: calculation.result,
            user_id: calculation.user_id.to_string(),
            created_at: calculation.created_at,
        }
    }
}
