//! Additive credit score over a customer's loan history.
//!
//! Four signals contribute points: on-time repayment, number of loans,
//! and recent borrowing. An over-extended customer (current monthly
//! repayments above the approved limit) scores zero whatever the signals say.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::eligibility::policy::EligibilityPolicy;
use crate::error::CreditApprovalError;
use crate::types::{CustomerProfile, LoanRecord, Money};
use crate::CreditApprovalResult;

/// Aggregates over the full loan list. Order of loans never matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanAggregates {
    pub emis_paid_on_time: u64,
    pub total_loans: usize,
    pub current_year_loans: usize,
    pub current_repayment_sum: Money,
    pub total_loan_volume: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditScore {
    pub on_time_points: u32,
    pub history_points: u32,
    pub current_year_points: u32,
    /// Current repayments exceed the approved limit; score forced to 0.
    pub over_extended: bool,
    pub score: u32,
    pub aggregates: LoanAggregates,
}

pub fn aggregate_loans(
    loans: &[LoanRecord],
    current_year: i32,
) -> CreditApprovalResult<LoanAggregates> {
    loans
        .iter()
        .enumerate()
        .try_fold(LoanAggregates::default(), |mut acc, (i, loan)| {
            acc.emis_paid_on_time += u64::from(loan.emis_paid_on_time);
            acc.total_loans += 1;
            if loan.start_date.year() == current_year {
                acc.current_year_loans += 1;
            }
            acc.current_repayment_sum = acc
                .current_repayment_sum
                .checked_add(loan.monthly_repayment)
                .ok_or_else(|| sum_overflow(i, "monthly_repayment"))?;
            acc.total_loan_volume = acc
                .total_loan_volume
                .checked_add(loan.loan_amount)
                .ok_or_else(|| sum_overflow(i, "loan_amount"))?;
            Ok(acc)
        })
}

fn sum_overflow(index: usize, column: &str) -> CreditApprovalError {
    CreditApprovalError::InvalidInput {
        field: format!("loans[{index}].{column}"),
        reason: "Running total over the loan history exceeds the representable decimal range."
            .into(),
    }
}

pub fn credit_score(
    customer: &CustomerProfile,
    loans: &[LoanRecord],
    current_year: i32,
    policy: &EligibilityPolicy,
) -> CreditApprovalResult<CreditScore> {
    let aggregates = aggregate_loans(loans, current_year)?;

    let on_time_points = if aggregates.emis_paid_on_time > 0 {
        policy.on_time_points
    } else {
        0
    };

    let history_points = match aggregates.total_loans {
        0 => policy.no_history_points,
        n if n <= policy.light_history_max_loans => policy.light_history_points,
        _ => policy.heavy_history_points,
    };

    let current_year_points = if aggregates.current_year_loans > 0 {
        policy.current_year_points
    } else {
        0
    };

    let over_extended = aggregates.current_repayment_sum > customer.approved_limit;
    let unadjusted = on_time_points
        .saturating_add(history_points)
        .saturating_add(current_year_points);
    let score = if over_extended { 0 } else { unadjusted };

    tracing::debug!(
        on_time = aggregates.emis_paid_on_time,
        total_loans = aggregates.total_loans,
        current_year_loans = aggregates.current_year_loans,
        repayment_sum = %aggregates.current_repayment_sum,
        over_extended,
        score,
        "credit score computed"
    );

    Ok(CreditScore {
        on_time_points,
        history_points,
        current_year_points,
        over_extended,
        score,
        aggregates,
    })
}

impl CreditScore {
    /// Points the customer would have scored without the exposure override.
    pub fn unadjusted(&self) -> u32 {
        self.on_time_points
            .saturating_add(self.history_points)
            .saturating_add(self.current_year_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn customer(limit: Money) -> CustomerProfile {
        CustomerProfile {
            customer_id: None,
            approved_limit: limit,
            monthly_salary: dec!(50_000),
            current_debt: Decimal::ZERO,
        }
    }

    fn loan(year: i32, repayment: Money, on_time: u32) -> LoanRecord {
        LoanRecord {
            loan_id: None,
            loan_amount: dec!(100_000),
            monthly_repayment: repayment,
            tenure_months: 12,
            emis_paid_on_time: on_time,
            start_date: NaiveDate::from_ymd_opt(year, 3, 1).unwrap(),
            interest_rate: None,
        }
    }

    #[test]
    fn test_no_history_scores_ten() {
        let s = credit_score(&customer(dec!(500_000)), &[], 2023, &EligibilityPolicy::default())
            .unwrap();
        assert_eq!(s.score, 10);
        assert_eq!(s.history_points, 10);
        assert!(!s.over_extended);
    }

    #[test]
    fn test_all_signals_light_history() {
        let loans = vec![loan(2023, dec!(5_000), 4), loan(2020, dec!(3_000), 0)];
        let s = credit_score(&customer(dec!(500_000)), &loans, 2023, &EligibilityPolicy::default())
            .unwrap();
        // 20 on-time + 5 light history + 15 current year
        assert_eq!(s.score, 40);
        assert_eq!(s.aggregates.emis_paid_on_time, 4);
        assert_eq!(s.aggregates.current_year_loans, 1);
        assert_eq!(s.aggregates.current_repayment_sum, dec!(8_000));
        assert_eq!(s.aggregates.total_loan_volume, dec!(200_000));
    }

    #[test]
    fn test_heavy_history_without_recent_loans() {
        let loans = vec![
            loan(2019, dec!(1_000), 12),
            loan(2020, dec!(1_000), 12),
            loan(2021, dec!(1_000), 12),
        ];
        let s = credit_score(&customer(dec!(500_000)), &loans, 2023, &EligibilityPolicy::default())
            .unwrap();
        assert_eq!(s.score, 22);
        assert_eq!(s.history_points, 2);
        assert_eq!(s.current_year_points, 0);
    }

    #[test]
    fn test_over_extension_forces_zero() {
        let loans = vec![loan(2023, dec!(60_000), 10)];
        let s = credit_score(&customer(dec!(50_000)), &loans, 2023, &EligibilityPolicy::default())
            .unwrap();
        assert!(s.over_extended);
        assert_eq!(s.score, 0);
        assert_eq!(s.unadjusted(), 40);
    }

    #[test]
    fn test_repayments_equal_to_limit_are_not_over_extended() {
        let loans = vec![loan(2023, dec!(50_000), 0)];
        let s = credit_score(&customer(dec!(50_000)), &loans, 2023, &EligibilityPolicy::default())
            .unwrap();
        assert!(!s.over_extended);
        assert_eq!(s.score, 20);
    }

    #[test]
    fn test_repayment_total_out_of_range_rejected() {
        let loans = vec![loan(2023, Decimal::MAX, 1), loan(2022, Decimal::MAX, 1)];
        let err = aggregate_loans(&loans, 2023).unwrap_err();
        match err {
            CreditApprovalError::InvalidInput { field, .. } => {
                assert_eq!(field, "loans[1].monthly_repayment")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_point_sum_saturates() {
        let policy = EligibilityPolicy {
            on_time_points: u32::MAX,
            ..EligibilityPolicy::default()
        };
        let loans = vec![loan(2023, dec!(1_000), 1)];
        let s = credit_score(&customer(dec!(500_000)), &loans, 2023, &policy).unwrap();
        assert_eq!(s.score, u32::MAX);
        assert_eq!(s.unadjusted(), u32::MAX);
    }

    #[test]
    fn test_order_does_not_matter() {
        let mut loans = vec![
            loan(2023, dec!(1_000), 0),
            loan(2021, dec!(2_000), 3),
            loan(2022, dec!(3_000), 1),
        ];
        let policy = EligibilityPolicy::default();
        let forward = credit_score(&customer(dec!(500_000)), &loans, 2023, &policy).unwrap();
        loans.reverse();
        let backward = credit_score(&customer(dec!(500_000)), &loans, 2023, &policy).unwrap();
        assert_eq!(forward, backward);
    }
}
