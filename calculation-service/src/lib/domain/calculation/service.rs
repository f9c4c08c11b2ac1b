use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::calculation::errors::CalculationError;
use crate::calculation::models::Calculation;
use crate::calculation::models::CalculationId;
use crate::calculation::models::CreateCalculationCommand;
use crate::calculation::models::UpdateCalculationCommand;
use crate::calculation::ports::CalculationRepository;
use crate::calculation::ports::CalculationServicePort;
use crate::domain::user::models::UserId;

/// Upper bound on a single page of results.
const MAX_PAGE_LIMIT: i64 = 100;

/// Domain service for calculation operations.
///
/// Computes results on every write (the stored result is never supplied
/// by the caller) and threads the owner identity into every repository
/// call.
pub struct CalculationService<CR>
where
    CR: CalculationRepository,
{
    repository: Arc<CR>,
}

impl<CR> CalculationService<CR>
where
    CR: CalculationRepository,
{
    /// Create a new calculation service with an injected repository.
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> CalculationServicePort for CalculationService<CR>
where
    CR: CalculationRepository,
{
    async fn create_calculation(
        &self,
        owner: &UserId,
        command: CreateCalculationCommand,
    ) -> Result<Calculation, CalculationError> {
        let result = command.operation.evaluate(command.operand1, command.operand2)?;

        let calculation = Calculation {
            id: CalculationId::new(),
            operation: command.operation,
            operand1: command.operand1,
            operand2: command.operand2,
            result,
            user_id: *owner,
            created_at: Utc::now(),
        };

        self.repository.create(calculation).await
    }

    async fn list_calculations(
        &self,
        owner: &UserId,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Calculation>, CalculationError> {
        let offset = skip.max(0);
        let limit = limit.clamp(0, MAX_PAGE_LIMIT);

        self.repository.list_owned(owner, offset, limit).await
    }

    async fn get_calculation(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<Calculation, CalculationError> {
        self.repository
            .find_owned(owner, id)
            .await?
            .ok_or(CalculationError::NotFound(id.to_string()))
    }

    async fn update_calculation(
        &self,
        owner: &UserId,
        id: &CalculationId,
        command: UpdateCalculationCommand,
    ) -> Result<Calculation, CalculationError> {
        let mut calculation = self
            .repository
            .find_owned(owner, id)
            .await?
            .ok_or(CalculationError::NotFound(id.to_string()))?;

        // An empty patch returns the record as-is, without recomputation.
        if command.is_empty() {
            return Ok(calculation);
        }

        if let Some(operation) = command.operation {
            calculation.operation = operation;
        }
        if let Some(operand1) = command.operand1 {
            calculation.operand1 = operand1;
        }
        if let Some(operand2) = command.operand2 {
            calculation.operand2 = operand2;
        }

        calculation.result = calculation
            .operation
            .evaluate(calculation.operand1, calculation.operand2)?;

        self.repository.update(calculation).await
    }

    async fn delete_calculation(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<(), CalculationError> {
        self.repository.delete_owned(owner, id).await
    }
}
