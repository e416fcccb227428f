pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "eligibility")]
pub mod eligibility;

#[cfg(feature = "loans")]
pub mod loans;

pub use error::CreditApprovalError;
pub use types::*;

/// Standard result type for all credit-approval operations
pub type CreditApprovalResult<T> = Result<T, CreditApprovalError>;
