//! Customer and loan-history lookup seam.
//!
//! The engine never fetches data itself. Callers hand it a
//! `CustomerDirectory` backed by whatever store they own; `InMemoryDirectory`
//! is a plain value for local runs and tests.

use serde::{Deserialize, Serialize};

use crate::eligibility::engine::{evaluate_with_policy, EligibilityDecision, EligibilityInput};
use crate::eligibility::policy::EligibilityPolicy;
use crate::error::CreditApprovalError;
use crate::types::{CustomerProfile, LoanRecord};
use crate::CreditApprovalResult;

pub trait CustomerDirectory {
    fn customer(&self, customer_id: u64) -> Option<CustomerProfile>;

    /// Every loan held by the customer, in any order.
    fn loans(&self, customer_id: u64) -> Vec<LoanRecord>;
}

/// A loan tagged with its owning customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookedLoan {
    pub customer_id: u64,
    #[serde(flatten)]
    pub loan: LoanRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryDirectory {
    #[serde(default)]
    pub customers: Vec<CustomerProfile>,
    #[serde(default)]
    pub loans: Vec<BookedLoan>,
}

impl CustomerDirectory for InMemoryDirectory {
    fn customer(&self, customer_id: u64) -> Option<CustomerProfile> {
        self.customers
            .iter()
            .find(|c| c.customer_id == Some(customer_id))
            .cloned()
    }

    fn loans(&self, customer_id: u64) -> Vec<LoanRecord> {
        self.loans
            .iter()
            .filter(|booked| booked.customer_id == customer_id)
            .map(|booked| booked.loan.clone())
            .collect()
    }
}

/// Gather everything the engine needs for one customer.
pub fn eligibility_input(
    directory: &impl CustomerDirectory,
    customer_id: u64,
    current_year: i32,
    policy: EligibilityPolicy,
) -> CreditApprovalResult<EligibilityInput> {
    let customer = directory
        .customer(customer_id)
        .ok_or(CreditApprovalError::CustomerNotFound(customer_id))?;
    Ok(EligibilityInput {
        customer,
        loans: directory.loans(customer_id),
        current_year,
        policy,
    })
}

/// Resolve a customer through the directory and evaluate them.
pub fn evaluate_customer(
    directory: &impl CustomerDirectory,
    customer_id: u64,
    current_year: i32,
    policy: &EligibilityPolicy,
) -> CreditApprovalResult<EligibilityDecision> {
    let input = eligibility_input(directory, customer_id, current_year, policy.clone())?;
    evaluate_with_policy(&input.customer, &input.loans, input.current_year, &input.policy)
}
