use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::calculation::errors::CalculationError;
use crate::calculation::errors::CalculationIdError;
use crate::calculation::errors::OperationError;
use crate::domain::user::models::UserId;

/// Arithmetic operation enumeration.
///
/// The closed set of operations a calculation can perform. Serialized in
/// lowercase keyword form ("add", "subtract", "multiply", "divide").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Evaluate the operation over two operands.
    ///
    /// # Errors
    /// * `DivisionByZero` - Operation is divide and the divisor is exactly zero
    pub fn evaluate(&self, operand1: f64, operand2: f64) -> Result<f64, CalculationError> {
        match self {
            Operation::Add => Ok(operand1 + operand2),
            Operation::Subtract => Ok(operand1 - operand2),
            Operation::Multiply => Ok(operand1 * operand2),
            Operation::Divide => {
                if operand2 == 0.0 {
                    Err(CalculationError::DivisionByZero)
                } else {
                    Ok(operand1 / operand2)
                }
            }
        }
    }

    /// Get the operation keyword as a string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }
}

impl FromStr for Operation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            other => Err(OperationError::Unrecognized(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calculation unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalculationId(pub Uuid);

impl CalculationId {
    /// Generate a new random calculation ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a calculation ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, CalculationIdError> {
        Uuid::parse_str(s)
            .map(CalculationId)
            .map_err(|e| CalculationIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CalculationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Calculation aggregate entity.
///
/// `result` is always the deterministic function of (operation, operand1,
/// operand2) at last write; it is never set independently. `user_id` is
/// fixed at creation: a calculation cannot be reassigned to another user.
#[derive(Debug, Clone)]
pub struct Calculation {
    pub id: CalculationId,
    pub operation: Operation,
    pub operand1: f64,
    pub operand2: f64,
    pub result: f64,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Command to create a new calculation for an owner
#[derive(Debug)]
pub struct CreateCalculationCommand {
    pub operation: Operation,
    pub operand1: f64,
    pub operand2: f64,
}

/// Command to update an existing calculation with optional fields.
///
/// All fields are optional to support partial updates; absent fields
/// retain their prior values. Full (PUT) and partial (PATCH) updates
/// share these semantics.
#[derive(Debug, Default)]
pub struct UpdateCalculationCommand {
    pub operation: Option<Operation>,
    pub operand1: Option<f64>,
    pub operand2: Option<f64>,
}

impl UpdateCalculationCommand {
    /// Whether the command carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.operation.is_none() && self.operand1.is_none() && self.operand2.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_all_operations() {
        assert_eq!(Operation::Add.evaluate(10.0, 5.0).unwrap(), 15.0);
        assert_eq!(Operation::Subtract.evaluate(10.0, 5.0).unwrap(), 5.0);
        assert_eq!(Operation::Multiply.evaluate(10.0, 5.0).unwrap(), 50.0);
        assert_eq!(Operation::Divide.evaluate(20.0, 4.0).unwrap(), 5.0);
    }

    #[test]
    fn test_evaluate_divide_by_zero() {
        let result = Operation::Divide.evaluate(10.0, 0.0);
        assert!(matches!(result, Err(CalculationError::DivisionByZero)));

        // Negative zero is still exactly zero
        let result = Operation::Divide.evaluate(10.0, -0.0);
        assert!(matches!(result, Err(CalculationError::DivisionByZero)));
    }

    #[test]
    fn test_operation_round_trip() {
        for keyword in ["add", "subtract", "multiply", "divide"] {
            let operation: Operation = keyword.parse().unwrap();
            assert_eq!(operation.as_str(), keyword);
        }
    }

    #[test]
    fn test_operation_unrecognized() {
        let result = "modulo".parse::<Operation>();
        assert!(matches!(result, Err(OperationError::Unrecognized(_))));
    }

    #[test]
    fn test_update_command_is_empty() {
        assert!(UpdateCalculationCommand::default().is_empty());
        assert!(!UpdateCalculationCommand {
            operand2: Some(8.0),
            ..Default::default()
        }
        .is_empty());
    }
}
