pub mod eligibility;
pub mod installment;
pub mod loans;
