use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{compute_installment, total_repayment};
use crate::error::CreditApprovalError;
use crate::types::{with_metadata, ComputationOutput, LoanRecord, Money, Months, Rate};
use crate::CreditApprovalResult;

/// Billing months are treated as 30 calendar days when dating the last EMI.
const DAYS_PER_BILLING_MONTH: u64 = 30;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<u64>,
    pub loan_amount: Money,
    /// Annual interest rate in percent.
    pub interest_rate: Rate,
    pub tenure_months: Months,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub monthly_installment: Money,
    pub end_date: NaiveDate,
    pub total_repayment: Money,
    /// Ready to append to the customer's loan history.
    pub record: LoanRecord,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price a new loan and date its final installment.
pub fn originate_loan(
    input: &OriginationInput,
) -> CreditApprovalResult<ComputationOutput<LoanTerms>> {
    let start = Instant::now();

    if input.loan_amount <= Decimal::ZERO {
        return Err(CreditApprovalError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount must be positive.".into(),
        });
    }

    let monthly_installment =
        compute_installment(input.loan_amount, input.interest_rate, input.tenure_months)?;
    let end_date = end_date(input.start_date, input.tenure_months)?;
    let total_repayment = total_repayment(monthly_installment, input.tenure_months)?;

    let terms = LoanTerms {
        monthly_installment,
        end_date,
        total_repayment,
        record: LoanRecord {
            loan_id: input.loan_id,
            loan_amount: input.loan_amount,
            monthly_repayment: monthly_installment,
            tenure_months: input.tenure_months,
            emis_paid_on_time: 0,
            start_date: input.start_date,
            interest_rate: Some(input.interest_rate),
        },
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "days_per_billing_month": DAYS_PER_BILLING_MONTH,
    });

    Ok(with_metadata(
        "Fixed-rate loan origination (EMI, 30-day billing months)",
        &assumptions,
        Vec::new(),
        elapsed,
        terms,
    ))
}

/// `start_date + tenure_months * 30` days.
pub fn end_date(start_date: NaiveDate, tenure_months: Months) -> CreditApprovalResult<NaiveDate> {
    let days = u64::from(tenure_months) * DAYS_PER_BILLING_MONTH;
    start_date
        .checked_add_days(Days::new(days))
        .ok_or_else(|| {
            CreditApprovalError::DateError(format!(
                "{start_date} plus {tenure_months} billing months is out of range"
            ))
        })
}
