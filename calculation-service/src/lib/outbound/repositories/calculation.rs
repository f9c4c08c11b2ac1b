use std::str::FromStr;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use sqlx::SqlitePool;

use crate::calculation::errors::CalculationError;
use crate::calculation::models::Calculation;
use crate::calculation::models::CalculationId;
use crate::calculation::models::Operation;
use crate::calculation::ports::CalculationRepository;
use crate::domain::user::models::UserId;

pub struct SqliteCalculationRepository {
    pool: SqlitePool,
}

impl SqliteCalculationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_calculation(row: SqliteRow) -> Result<Calculation, CalculationError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;
    let operation: String = row
        .try_get("operation")
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;
    let operand1: f64 = row
        .try_get("operand1")
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;
    let operand2: f64 = row
        .try_get("operand2")
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;
    let result: f64 = row
        .try_get("result")
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;

    Ok(Calculation {
        id: CalculationId::from_string(&id)?,
        // Rows are only ever written through the enum, so a parse failure
        // here is storage corruption, not caller input
        operation: Operation::from_str(&operation)
            .map_err(|e| CalculationError::DatabaseError(e.to_string()))?,
        operand1,
        operand2,
        result,
        user_id: UserId::from_string(&user_id)
            .map_err(|e| CalculationError::DatabaseError(e.to_string()))?,
        created_at,
    })
}

#[async_trait]
impl CalculationRepository for SqliteCalculationRepository {
    async fn create(&self, calculation: Calculation) -> Result<Calculation, CalculationError> {
        sqlx::query(
            r#"
            INSERT INTO calculations (id, operation, operand1, operand2, result, user_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(calculation.id.to_string())
        .bind(calculation.operation.as_str())
        .bind(calculation.operand1)
        .bind(calculation.operand2)
        .bind(calculation.result)
        .bind(calculation.user_id.to_string())
        .bind(calculation.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;

        Ok(calculation)
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<Option<Calculation>, CalculationError> {
        let row = sqlx::query(
            r#"
            SELECT id, operation, operand1, operand2, result, user_id, created_at
            FROM calculations
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id.to_string())
        .bind(owner.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;

        row.map(row_to_calculation).transpose()
    }

    async fn list_owned(
        &self,
        owner: &UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Calculation>, CalculationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, operation, operand1, operand2, result, user_id, created_at
            FROM calculations
            WHERE user_id = ?
            ORDER BY created_at, id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(owner.to_string())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(row_to_calculation).collect()
    }

    async fn update(&self, calculation: Calculation) -> Result<Calculation, CalculationError> {
        let result = sqlx::query(
            r#"
            UPDATE calculations
            SET operation = ?, operand1 = ?, operand2 = ?, result = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(calculation.operation.as_str())
        .bind(calculation.operand1)
        .bind(calculation.operand2)
        .bind(calculation.result)
        .bind(calculation.id.to_string())
        .bind(calculation.user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CalculationError::NotFound(calculation.id.to_string()));
        }

        Ok(calculation)
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<(), CalculationError> {
        let result = sqlx::query(
            r#"
            DELETE FROM calculations
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id.to_string())
        .bind(owner.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| CalculationError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CalculationError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
