use thiserror::Error;

/// Error for CalculationId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculationIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for operation keyword parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OperationError {
    #[error("Invalid operation '{0}'. Must be one of: add, subtract, multiply, divide")]
    Unrecognized(String),
}

/// Top-level error for all calculation operations
#[derive(Debug, Clone, Error)]
pub enum CalculationError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid calculation ID: {0}")]
    InvalidCalculationId(#[from] CalculationIdError),

    #[error("{0}")]
    InvalidOperation(#[from] OperationError),

    // Domain-level errors
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Covers both a genuinely absent record and one owned by another
    /// user; the two cases are indistinguishable to the caller.
    #[error("Calculation not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
