use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::CalculationData;
use crate::calculation::ports::CalculationServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    skip: Option<i64>,
    limit: Option<i64>,
}

pub async fn list_calculations(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Query(params): Query<ListQuery>,
) -> Result<ApiSuccess<Vec<CalculationData>>, ApiError> {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(100);

    state
        .calculation_service
        .list_calculations(&current_user.user_id, skip, limit)
        .await
        .map_err(ApiError::from)
        .map(|calculations| {
            let data: Vec<CalculationData> = calculations.iter().map(|c| c.into()).collect();
            ApiSuccess::new(StatusCode::OK, data)
        })
}
