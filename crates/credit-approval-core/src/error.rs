use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreditApprovalError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Customer not found: {0}")]
    CustomerNotFound(u64),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CreditApprovalError {
    fn from(e: serde_json::Error) -> Self {
        CreditApprovalError::SerializationError(e.to_string())
    }
}
