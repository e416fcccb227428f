use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CreditApprovalError;
use crate::types::{with_metadata, ComputationOutput, CustomerProfile, Money};
use crate::CreditApprovalResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// How a pre-approved credit ceiling is derived from salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitPolicy {
    pub salary_multiple: Decimal,
    /// Limits are rounded to the nearest multiple of this.
    pub rounding_unit: Money,
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self {
            salary_multiple: dec!(36),
            rounding_unit: dec!(100_000),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    pub monthly_salary: Money,
    #[serde(default)]
    pub current_debt: Money,
    #[serde(default)]
    pub policy: LimitPolicy,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// `salary_multiple * monthly_salary`, rounded to the nearest `rounding_unit`.
/// Exact midpoints go to the even multiple.
pub fn derive_approved_limit(
    monthly_salary: Money,
    policy: &LimitPolicy,
) -> CreditApprovalResult<Money> {
    if monthly_salary <= Decimal::ZERO {
        return Err(CreditApprovalError::InvalidInput {
            field: "monthly_salary".into(),
            reason: "Monthly salary must be positive.".into(),
        });
    }
    if policy.salary_multiple <= Decimal::ZERO {
        return Err(CreditApprovalError::InvalidInput {
            field: "policy.salary_multiple".into(),
            reason: "Salary multiple must be positive.".into(),
        });
    }
    if policy.rounding_unit <= Decimal::ZERO {
        return Err(CreditApprovalError::InvalidInput {
            field: "policy.rounding_unit".into(),
            reason: "Rounding unit must be positive.".into(),
        });
    }

    let units = (policy.salary_multiple * monthly_salary / policy.rounding_unit)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    Ok(units * policy.rounding_unit)
}

/// Build a customer profile with a derived approved limit.
pub fn register_customer(
    input: &RegistrationInput,
) -> CreditApprovalResult<ComputationOutput<CustomerProfile>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.current_debt < Decimal::ZERO {
        return Err(CreditApprovalError::InvalidInput {
            field: "current_debt".into(),
            reason: "Current debt cannot be negative.".into(),
        });
    }

    let approved_limit = derive_approved_limit(input.monthly_salary, &input.policy)?;
    if approved_limit.is_zero() {
        warnings.push(format!(
            "Salary too low for a limit: rounds to zero at a {} unit.",
            input.policy.rounding_unit
        ));
    }

    let profile = CustomerProfile {
        customer_id: input.customer_id,
        approved_limit,
        monthly_salary: input.monthly_salary,
        current_debt: input.current_debt,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "salary_multiple": input.policy.salary_multiple.to_string(),
        "rounding_unit": input.policy.rounding_unit.to_string(),
    });

    Ok(with_metadata(
        "Approved limit as a salary multiple, rounded to unit",
        &assumptions,
        warnings,
        elapsed,
        profile,
    ))
}
