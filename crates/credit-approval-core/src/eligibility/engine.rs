use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::compute_installment;
use crate::eligibility::policy::EligibilityPolicy;
use crate::eligibility::score::{credit_score, CreditScore};
use crate::error::CreditApprovalError;
use crate::types::{
    with_metadata, ComputationOutput, CustomerProfile, LoanRecord, Money, Months, Rate,
};
use crate::CreditApprovalResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub customer: CustomerProfile,
    #[serde(default)]
    pub loans: Vec<LoanRecord>,
    /// Calendar year used for the "borrowed this year" signal.
    pub current_year: i32,
    #[serde(default)]
    pub policy: EligibilityPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    pub approved: bool,
    /// Band rate before the floor.
    pub interest_rate: Rate,
    pub corrected_interest_rate: Rate,
    pub tenure_months: Months,
    pub monthly_installment: Money,
    pub credit_score: CreditScore,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Decide eligibility under the default policy.
pub fn evaluate(
    customer: &CustomerProfile,
    loans: &[LoanRecord],
    current_year: i32,
) -> CreditApprovalResult<EligibilityDecision> {
    evaluate_with_policy(customer, loans, current_year, &EligibilityPolicy::default())
}

/// Score the customer, band the score into an approval and rate, floor the
/// rate, and price the installment on the approved limit.
pub fn evaluate_with_policy(
    customer: &CustomerProfile,
    loans: &[LoanRecord],
    current_year: i32,
    policy: &EligibilityPolicy,
) -> CreditApprovalResult<EligibilityDecision> {
    policy.validate()?;
    validate_customer(customer)?;
    validate_loans(loans)?;

    let score = credit_score(customer, loans, current_year, policy)?;
    if score.over_extended {
        tracing::warn!(
            customer_id = ?customer.customer_id,
            repayment_sum = %score.aggregates.current_repayment_sum,
            approved_limit = %customer.approved_limit,
            "current repayments exceed approved limit"
        );
    }

    let (approved, interest_rate) = match policy.band_for(score.score) {
        Some(band) => {
            let scaled = customer
                .approved_limit
                .checked_mul(band.limit_multiplier)
                .ok_or_else(|| CreditApprovalError::InvalidInput {
                    field: "customer.approved_limit".into(),
                    reason: "Band rate at this approved limit exceeds the decimal range.".into(),
                })?;
            (true, scaled.max(band.minimum_rate))
        }
        None => (false, Decimal::ZERO),
    };

    let corrected_interest_rate = interest_rate.max(policy.rate_floor);
    let tenure_months = policy.tenure_months;
    let monthly_installment =
        compute_installment(customer.approved_limit, corrected_interest_rate, tenure_months)?;

    tracing::debug!(
        score = score.score,
        approved,
        %interest_rate,
        %corrected_interest_rate,
        %monthly_installment,
        "eligibility decided"
    );

    Ok(EligibilityDecision {
        customer_id: customer.customer_id,
        approved,
        interest_rate,
        corrected_interest_rate,
        tenure_months,
        monthly_installment,
        credit_score: score,
    })
}

/// Enveloped eligibility check with policy warnings.
pub fn check_eligibility(
    input: &EligibilityInput,
) -> CreditApprovalResult<ComputationOutput<EligibilityDecision>> {
    let start = Instant::now();

    let decision = evaluate_with_policy(
        &input.customer,
        &input.loans,
        input.current_year,
        &input.policy,
    )?;
    let warnings = decision_warnings(&decision, &input.policy);

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "current_year": input.current_year,
        "rate_floor": input.policy.rate_floor.to_string(),
        "tenure_months": input.policy.tenure_months,
        "principal": "approved_limit",
    });

    Ok(with_metadata(
        "Score-banded eligibility with floored rate and EMI on approved limit",
        &assumptions,
        warnings,
        elapsed,
        decision,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn decision_warnings(decision: &EligibilityDecision, policy: &EligibilityPolicy) -> Vec<String> {
    let mut warnings = Vec::new();

    if decision.credit_score.over_extended {
        warnings.push(format!(
            "Current monthly repayments ({}) exceed the approved limit; score forced to 0 from {}.",
            decision.credit_score.aggregates.current_repayment_sum,
            decision.credit_score.unadjusted(),
        ));
    }
    if decision.approved && decision.interest_rate < policy.rate_floor {
        warnings.push(format!(
            "Band rate {} overridden by the {} floor.",
            decision.interest_rate, policy.rate_floor,
        ));
    }
    if decision.interest_rate > Decimal::ONE_HUNDRED {
        warnings.push(format!(
            "Band rate {} exceeds 100% p.a.: band multipliers scale with the approved limit.",
            decision.interest_rate,
        ));
    }

    warnings
}

fn validate_customer(customer: &CustomerProfile) -> CreditApprovalResult<()> {
    if customer.approved_limit <= Decimal::ZERO {
        return Err(CreditApprovalError::InvalidInput {
            field: "customer.approved_limit".into(),
            reason: "Approved limit must be positive.".into(),
        });
    }
    if customer.monthly_salary <= Decimal::ZERO {
        return Err(CreditApprovalError::InvalidInput {
            field: "customer.monthly_salary".into(),
            reason: "Monthly salary must be positive.".into(),
        });
    }
    if customer.current_debt < Decimal::ZERO {
        return Err(CreditApprovalError::InvalidInput {
            field: "customer.current_debt".into(),
            reason: "Current debt cannot be negative.".into(),
        });
    }
    Ok(())
}

fn validate_loans(loans: &[LoanRecord]) -> CreditApprovalResult<()> {
    for (i, loan) in loans.iter().enumerate() {
        if loan.loan_amount <= Decimal::ZERO {
            return Err(CreditApprovalError::InvalidInput {
                field: format!("loans[{i}].loan_amount"),
                reason: "Loan amount must be positive.".into(),
            });
        }
        if loan.monthly_repayment <= Decimal::ZERO {
            return Err(CreditApprovalError::InvalidInput {
                field: format!("loans[{i}].monthly_repayment"),
                reason: "Monthly repayment must be positive.".into(),
            });
        }
        if loan.tenure_months == 0 {
            return Err(CreditApprovalError::InvalidInput {
                field: format!("loans[{i}].tenure_months"),
                reason: "Tenure must be at least one month.".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
