//! Fixed-rate EMI (equated monthly installment) arithmetic.
//!
//! `installment = P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly
//! fractional rate derived from an annual percentage. All arithmetic uses
//! `rust_decimal::Decimal`. No `f64`.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CreditApprovalError;
use crate::types::{with_metadata, ComputationOutput, Money, Months, Rate};
use crate::CreditApprovalResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);
const CURRENCY_DP: u32 = 2;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentInput {
    pub principal: Money,
    /// Annual interest rate in percent (16 = 16% p.a.).
    pub annual_rate_percent: Rate,
    pub tenure_months: Months,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentOutput {
    /// Fractional monthly rate, `annual_rate_percent / 12 / 100`.
    pub monthly_rate: Decimal,
    pub monthly_installment: Money,
    pub total_repayment: Money,
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert an annual percentage rate into a fractional monthly rate.
pub fn monthly_rate(annual_rate_percent: Rate) -> Decimal {
    annual_rate_percent / MONTHS_PER_YEAR / PERCENT
}

/// Round a currency amount to 2 dp, midpoints away from zero.
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Monthly installment that fully amortizes `principal` over `tenure_months`
/// at `annual_rate_percent`. A zero rate repays in equal straight-line parts.
pub fn compute_installment(
    principal: Money,
    annual_rate_percent: Rate,
    tenure_months: Months,
) -> CreditApprovalResult<Money> {
    validate(principal, annual_rate_percent, tenure_months)?;

    let n = Decimal::from(tenure_months);
    let r = monthly_rate(annual_rate_percent);

    if r.is_zero() {
        return Ok(round_currency(principal / n));
    }

    // P*r*f/(f-1) == P*r/(1 - 1/f). Past the decimal range 1/f is below
    // resolution and the installment collapses to P*r.
    let interest = principal.checked_mul(r).ok_or_else(installment_overflow)?;
    let raw = match (Decimal::ONE + r).checked_powi(i64::from(tenure_months)) {
        Some(f) => interest
            .checked_div(Decimal::ONE - Decimal::ONE / f)
            .ok_or_else(installment_overflow)?,
        None => interest,
    };

    Ok(round_currency(raw))
}

/// Installment plus repayment totals, wrapped in the standard envelope.
pub fn calculate_installment(
    input: &InstallmentInput,
) -> CreditApprovalResult<ComputationOutput<InstallmentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let installment = compute_installment(
        input.principal,
        input.annual_rate_percent,
        input.tenure_months,
    )?;

    if input.annual_rate_percent.is_zero() {
        warnings.push("Zero interest rate: straight-line repayment of principal.".into());
    }

    let total_repayment = total_repayment(installment, input.tenure_months)?;
    let output = InstallmentOutput {
        monthly_rate: monthly_rate(input.annual_rate_percent),
        monthly_installment: installment,
        total_repayment,
        total_interest: total_repayment - input.principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "rate_convention": "annual percent / 12 / 100",
        "rounding": "2dp, midpoint away from zero",
    });

    Ok(with_metadata(
        "EMI (fixed-rate fully-amortizing installment)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// `installment * tenure_months`, rejected when it leaves the decimal range.
pub fn total_repayment(installment: Money, tenure_months: Months) -> CreditApprovalResult<Money> {
    installment
        .checked_mul(Decimal::from(tenure_months))
        .ok_or_else(|| CreditApprovalError::InvalidInput {
            field: "principal".into(),
            reason: "Total repayment exceeds the representable decimal range.".into(),
        })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn installment_overflow() -> CreditApprovalError {
    CreditApprovalError::InvalidInput {
        field: "principal".into(),
        reason: "Installment at this principal and rate exceeds the representable decimal range."
            .into(),
    }
}

fn validate(
    principal: Money,
    annual_rate_percent: Rate,
    tenure_months: Months,
) -> CreditApprovalResult<()> {
    if tenure_months == 0 {
        return Err(CreditApprovalError::InvalidInput {
            field: "tenure_months".into(),
            reason: "Tenure must be at least one month.".into(),
        });
    }
    if principal <= Decimal::ZERO {
        return Err(CreditApprovalError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive.".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(CreditApprovalError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative.".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
