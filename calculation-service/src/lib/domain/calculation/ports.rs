use async_trait::async_trait;

use crate::calculation::errors::CalculationError;
use crate::calculation::models::Calculation;
use crate::calculation::models::CalculationId;
use crate::calculation::models::CreateCalculationCommand;
use crate::calculation::models::UpdateCalculationCommand;
use crate::domain::user::models::UserId;

/// Port for calculation domain service operations.
///
/// Every operation takes the resolved caller identity explicitly; there
/// is no ambient request context. Lookups are owner-filtered throughout,
/// so a record owned by another user is indistinguishable from a missing
/// one.
#[async_trait]
pub trait CalculationServicePort: Send + Sync + 'static {
    /// Create a new calculation owned by `owner`, computing its result.
    ///
    /// # Errors
    /// * `DivisionByZero` - Divide with a zero divisor
    /// * `DatabaseError` - Database operation failed
    async fn create_calculation(
        &self,
        owner: &UserId,
        command: CreateCalculationCommand,
    ) -> Result<Calculation, CalculationError>;

    /// List calculations owned by `owner`, paginated.
    ///
    /// The limit is clamped to a bounded maximum; no range of offset and
    /// limit ever exposes another owner's records.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_calculations(
        &self,
        owner: &UserId,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Calculation>, CalculationError>;

    /// Retrieve a single calculation by id, filtered by owner.
    ///
    /// # Errors
    /// * `NotFound` - Id absent, or present but owned by another user
    /// * `DatabaseError` - Database operation failed
    async fn get_calculation(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<Calculation, CalculationError>;

    /// Apply a (possibly partial) update and recompute the result.
    ///
    /// Absent fields retain their prior values. An empty command returns
    /// the record unchanged without recomputation.
    ///
    /// # Errors
    /// * `NotFound` - Id absent, or present but owned by another user
    /// * `DivisionByZero` - Recomputation divides by zero
    /// * `DatabaseError` - Database operation failed
    async fn update_calculation(
        &self,
        owner: &UserId,
        id: &CalculationId,
        command: UpdateCalculationCommand,
    ) -> Result<Calculation, CalculationError>;

    /// Delete a calculation by id, filtered by owner.
    ///
    /// # Errors
    /// * `NotFound` - Id absent, or present but owned by another user
    /// * `DatabaseError` - Database operation failed
    async fn delete_calculation(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<(), CalculationError>;
}

/// Persistence operations for the calculation aggregate.
///
/// Every query is filtered on the owner; there is no unscoped lookup.
#[async_trait]
pub trait CalculationRepository: Send + Sync + 'static {
    /// Persist a new calculation.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, calculation: Calculation) -> Result<Calculation, CalculationError>;

    /// Retrieve a calculation by id and owner.
    ///
    /// # Returns
    /// Optional calculation (None when absent or owned by another user)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_owned(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<Option<Calculation>, CalculationError>;

    /// List calculations for an owner in creation order, with offset and limit.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_owned(
        &self,
        owner: &UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Calculation>, CalculationError>;

    /// Persist updated fields of an existing calculation, owner-filtered.
    ///
    /// # Errors
    /// * `NotFound` - No row matched the id and owner
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, calculation: Calculation) -> Result<Calculation, CalculationError>;

    /// Remove a calculation by id and owner.
    ///
    /// # Errors
    /// * `NotFound` - No row matched the id and owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_owned(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<(), CalculationError>;
}
