use serde::{Deserialize, Serialize};

use crate::types::{LoanRecord, Money, Months, Rate};

/// One line of a customer's loan statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanStatementLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<u64>,
    pub loan_amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Rate>,
    pub monthly_installment: Money,
    /// Tenure less EMIs already paid on time, never below zero.
    pub repayments_left: Months,
}

pub fn loan_statement(loans: &[LoanRecord]) -> Vec<LoanStatementLine> {
    loans
        .iter()
        .map(|loan| LoanStatementLine {
            loan_id: loan.loan_id,
            loan_amount: loan.loan_amount,
            interest_rate: loan.interest_rate,
            monthly_installment: loan.monthly_repayment,
            repayments_left: loan.tenure_months.saturating_sub(loan.emis_paid_on_time),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn loan(tenure: Months, paid: u32) -> LoanRecord {
        LoanRecord {
            loan_id: Some(5),
            loan_amount: dec!(120_000),
            monthly_repayment: dec!(10_661.85),
            tenure_months: tenure,
            emis_paid_on_time: paid,
            start_date: NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(),
            interest_rate: Some(dec!(12)),
        }
    }

    #[test]
    fn test_repayments_left() {
        let lines = loan_statement(&[loan(12, 5)]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].repayments_left, 7);
        assert_eq!(lines[0].monthly_installment, dec!(10_661.85));
        assert_eq!(lines[0].interest_rate, Some(dec!(12)));
    }

    #[test]
    fn test_overpaid_loan_saturates_at_zero() {
        let lines = loan_statement(&[loan(12, 15)]);
        assert_eq!(lines[0].repayments_left, 0);
    }

    #[test]
    fn test_empty_history() {
        assert!(loan_statement(&[]).is_empty());
    }
}
