use napi::Result as NapiResult;
use napi_derive::napi;

use credit_approval_core::amortization;
use credit_approval_core::eligibility::{directory, engine};
use credit_approval_core::loans::{limit, origination, statement};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_installment(input_json: String) -> NapiResult<String> {
    let input: amortization::InstallmentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::calculate_installment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

#[napi]
pub fn check_eligibility(input_json: String) -> NapiResult<String> {
    let input: engine::EligibilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = engine::check_eligibility(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Evaluate one customer out of a `{ customers, loans }` book.
#[napi]
pub fn check_customer_eligibility(
    book_json: String,
    customer_id: i64,
    current_year: i32,
) -> NapiResult<String> {
    let book: directory::InMemoryDirectory =
        serde_json::from_str(&book_json).map_err(to_napi_error)?;
    let customer_id = u64::try_from(customer_id).map_err(to_napi_error)?;
    let input = directory::eligibility_input(&book, customer_id, current_year, Default::default())
        .map_err(to_napi_error)?;
    let output = engine::check_eligibility(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn register_customer(input_json: String) -> NapiResult<String> {
    let input: limit::RegistrationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = limit::register_customer(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn originate_loan(input_json: String) -> NapiResult<String> {
    let input: origination::OriginationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = origination::originate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_statement(loans_json: String) -> NapiResult<String> {
    let loans: Vec<credit_approval_core::LoanRecord> =
        serde_json::from_str(&loans_json).map_err(to_napi_error)?;
    serde_json::to_string(&statement::loan_statement(&loans)).map_err(to_napi_error)
}
