use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary amounts; always `Decimal`, never `f64`.
pub type Money = Decimal;

/// Annual interest rates expressed as percentages (16 = 16% p.a.).
/// Monthly fractional rates derived from these are plain `Decimal`s.
pub type Rate = Decimal;

/// Loan duration in months
pub type Months = u32;

/// A customer's financial profile as resolved by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    /// Pre-approved credit ceiling.
    pub approved_limit: Money,
    pub monthly_salary: Money,
    /// Outstanding debt. Carried on the profile but not scored.
    #[serde(default)]
    pub current_debt: Money,
}

/// One historical or in-flight loan held by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<u64>,
    pub loan_amount: Money,
    pub monthly_repayment: Money,
    pub tenure_months: Months,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    /// Annual rate the loan was booked at, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Rate>,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
