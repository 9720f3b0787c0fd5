use thiserror::Error;

#[derive(Debug, Error)]
pub enum NestCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown period '{key}' (available: {available})")]
    UnknownPeriod { key: String, available: String },

    #[error("Unknown interest interval '{name}' (available: {available})")]
    UnknownInterval { name: String, available: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for NestCalcError {
    fn from(e: serde_json::Error) -> Self {
        NestCalcError::SerializationError(e.to_string())
    }
}
