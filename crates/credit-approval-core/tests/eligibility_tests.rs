use chrono::NaiveDate;
use credit_approval_core::amortization::compute_installment;
use credit_approval_core::eligibility::engine::{check_eligibility, EligibilityInput};
use credit_approval_core::eligibility::policy::EligibilityPolicy;
use credit_approval_core::eligibility::{evaluate, evaluate_with_policy};
use credit_approval_core::{CreditApprovalError, CustomerProfile, LoanRecord, Money};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn customer(limit: Money) -> CustomerProfile {
    CustomerProfile {
        customer_id: Some(1),
        approved_limit: limit,
        monthly_salary: dec!(30_000),
        current_debt: Decimal::ZERO,
    }
}

fn loan(start: (i32, u32, u32), repayment: Money, on_time: u32) -> LoanRecord {
    LoanRecord {
        loan_id: None,
        loan_amount: dec!(100_000),
        monthly_repayment: repayment,
        tenure_months: 12,
        emis_paid_on_time: on_time,
        start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
        interest_rate: None,
    }
}

// ===========================================================================
// Documented scenarios
// ===========================================================================

#[test]
fn test_new_customer_is_rejected_at_floor_rate() {
    let d = evaluate(&customer(dec!(500_000)), &[], 2023).unwrap();

    assert_eq!(d.credit_score.score, 10);
    assert!(!d.approved);
    assert_eq!(d.interest_rate, Decimal::ZERO);
    assert_eq!(d.corrected_interest_rate, dec!(16));
    assert_eq!(d.tenure_months, 12);
    // P*r*(1+r)^n / ((1+r)^n - 1) at r = 16/12/100, n = 12
    assert_eq!(d.monthly_installment, dec!(45365.43));
    assert_eq!(
        d.monthly_installment,
        compute_installment(dec!(500_000), dec!(16), 12).unwrap()
    );
}

#[test]
fn test_single_recent_loan_on_large_limit() {
    let loans = vec![loan((2023, 2, 14), dec!(20_000), 5)];
    let d = evaluate(&customer(dec!(1_000_000)), &loans, 2023).unwrap();

    // 20 on-time + 5 light history + 15 current year
    assert_eq!(d.credit_score.score, 40);
    assert!(d.approved);
    // max(12, 1_000_000 * 0.08)
    assert_eq!(d.interest_rate, dec!(80_000));
    assert_eq!(d.corrected_interest_rate, dec!(80_000));
    assert_eq!(d.monthly_installment, dec!(66_666_666.67));
}

#[test]
fn test_unpriceable_limit_fails_with_invalid_input() {
    // Middle band at 1e17 gives an 8e15% rate. The formula no longer fits a
    // Decimal, so the check must fail cleanly rather than abort.
    let loans = vec![loan((2023, 4, 1), dec!(20_000), 1)];
    let limit = dec!(100_000_000_000_000_000);
    let input = EligibilityInput {
        customer: customer(limit),
        loans,
        current_year: 2023,
        policy: EligibilityPolicy::default(),
    };
    match check_eligibility(&input).unwrap_err() {
        CreditApprovalError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }

    // A limit just inside the range still prices, via the P*r collapse.
    let d = evaluate(&customer(dec!(10_000_000_000_000)), &input.loans, 2023).unwrap();
    assert!(d.approved);
    assert_eq!(d.interest_rate, dec!(800_000_000_000));
}

#[test]
fn test_current_year_is_caller_supplied() {
    let loans = vec![loan((2023, 12, 31), dec!(1_000), 0)];
    let this_year = evaluate(&customer(dec!(500_000)), &loans, 2023).unwrap();
    let next_year = evaluate(&customer(dec!(500_000)), &loans, 2024).unwrap();

    assert_eq!(this_year.credit_score.score, 20);
    assert_eq!(next_year.credit_score.score, 5);
    assert!(this_year.approved);
    assert!(!next_year.approved);
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_over_extension_overrides_every_signal() {
    let loans = vec![
        loan((2023, 1, 1), dec!(40_000), 12),
        loan((2023, 2, 1), dec!(40_000), 12),
    ];
    let d = evaluate(&customer(dec!(79_999.99)), &loans, 2023).unwrap();
    assert!(d.credit_score.over_extended);
    assert_eq!(d.credit_score.score, 0);
    assert!(!d.approved);
}

#[test]
fn test_scores_are_sums_of_signal_weights() {
    // Reachable under the default weights: no history scores 10, otherwise
    // history (5 or 2) plus optional on-time (20) and current-year (15).
    let allowed: [u32; 10] = [0, 2, 5, 10, 17, 20, 22, 25, 37, 40];
    let histories: Vec<Vec<LoanRecord>> = vec![
        vec![],
        vec![loan((2020, 1, 1), dec!(100), 0)],
        vec![loan((2020, 1, 1), dec!(100), 3)],
        vec![loan((2023, 1, 1), dec!(100), 0)],
        vec![loan((2023, 1, 1), dec!(100), 3)],
        vec![
            loan((2019, 1, 1), dec!(100), 0),
            loan((2020, 1, 1), dec!(100), 0),
            loan((2021, 1, 1), dec!(100), 0),
        ],
        vec![
            loan((2019, 1, 1), dec!(100), 1),
            loan((2020, 1, 1), dec!(100), 0),
            loan((2023, 1, 1), dec!(100), 0),
        ],
    ];

    for loans in &histories {
        let d = evaluate(&customer(dec!(500_000)), loans, 2023).unwrap();
        assert!(
            allowed.contains(&d.credit_score.score),
            "unexpected score {}",
            d.credit_score.score
        );
    }
}

#[test]
fn test_corrected_rate_never_below_floor() {
    let limits = [dec!(1), dec!(99), dec!(150), dec!(199), dec!(266), dec!(10_000)];
    let histories: Vec<Vec<LoanRecord>> = vec![
        vec![],
        vec![loan((2023, 1, 1), dec!(0.5), 2)],
        vec![
            loan((2020, 1, 1), dec!(0.1), 2),
            loan((2021, 1, 1), dec!(0.1), 2),
            loan((2022, 1, 1), dec!(0.1), 2),
        ],
    ];

    for limit in limits {
        for loans in &histories {
            let d = evaluate(&customer(limit), loans, 2023).unwrap();
            assert!(d.corrected_interest_rate >= dec!(16));
            assert!(d.corrected_interest_rate >= d.interest_rate);
        }
    }
}

#[test]
fn test_evaluation_is_deterministic() {
    let loans = vec![
        loan((2023, 3, 1), dec!(2_500), 4),
        loan((2018, 7, 1), dec!(1_250), 12),
    ];
    let first = evaluate(&customer(dec!(300_000)), &loans, 2023).unwrap();
    let second = evaluate(&customer(dec!(300_000)), &loans, 2023).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_custom_policy_changes_tenure_and_floor() {
    let policy = EligibilityPolicy {
        rate_floor: dec!(12),
        tenure_months: 24,
        ..EligibilityPolicy::default()
    };
    let d = evaluate_with_policy(&customer(dec!(200_000)), &[], 2023, &policy).unwrap();
    assert_eq!(d.corrected_interest_rate, dec!(12));
    assert_eq!(d.tenure_months, 24);
    assert_eq!(d.monthly_installment, dec!(9414.69));
}

#[test]
fn test_envelope_reports_over_extension() {
    let input = EligibilityInput {
        customer: customer(dec!(1_000)),
        loans: vec![loan((2023, 1, 1), dec!(1_001), 1)],
        current_year: 2023,
        policy: EligibilityPolicy::default(),
    };
    let out = check_eligibility(&input).unwrap();
    assert!(!out.result.approved);
    assert_eq!(out.warnings.len(), 1);
    assert!(out.warnings[0].contains("score forced to 0 from 40"));
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}

#[test]
fn test_input_deserialises_with_default_policy() {
    let json = r#"{
        "customer": { "approved_limit": "500000", "monthly_salary": "14000" },
        "current_year": 2023
    }"#;
    let input: EligibilityInput = serde_json::from_str(json).unwrap();
    assert!(input.loans.is_empty());
    assert_eq!(input.policy, EligibilityPolicy::default());

    let out = check_eligibility(&input).unwrap();
    assert_eq!(out.result.monthly_installment, dec!(45365.43));
}
