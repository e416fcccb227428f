use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_approval_core::eligibility::directory::{CustomerDirectory, InMemoryDirectory};
use credit_approval_core::loans::limit::{self, LimitPolicy, RegistrationInput};
use credit_approval_core::loans::origination::{self, OriginationInput};
use credit_approval_core::loans::statement;
use credit_approval_core::{CreditApprovalError, LoanRecord};

use crate::input;

/// Arguments for approved-limit derivation
#[derive(Args)]
pub struct ApprovedLimitArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly salary
    #[arg(long, alias = "salary")]
    pub monthly_salary: Option<Decimal>,

    /// Current outstanding debt
    #[arg(long, default_value = "0")]
    pub current_debt: Decimal,

    /// Customer identifier to carry onto the profile
    #[arg(long)]
    pub customer_id: Option<u64>,
}

/// Arguments for pricing a new loan
#[derive(Args)]
pub struct OriginateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long, alias = "amount")]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long, alias = "tenure")]
    pub tenure_months: Option<u32>,

    /// First installment date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

/// Arguments for a customer's loan statement
#[derive(Args)]
pub struct StatementArgs {
    /// Path to a JSON array of loan records
    #[arg(long, conflicts_with = "book")]
    pub input: Option<String>,

    /// Path to a JSON book of customers and loans
    #[arg(long, requires = "customer_id")]
    pub book: Option<String>,

    /// Customer to look up in the book
    #[arg(long)]
    pub customer_id: Option<u64>,
}

pub fn run_approved_limit(args: ApprovedLimitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let registration: RegistrationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        RegistrationInput {
            customer_id: args.customer_id,
            monthly_salary: args
                .monthly_salary
                .ok_or("--monthly-salary is required (or provide --input)")?,
            current_debt: args.current_debt,
            policy: LimitPolicy::default(),
        }
    };

    let result = limit::register_customer(&registration)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_originate(args: OriginateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: OriginationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        OriginationInput {
            loan_id: None,
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            interest_rate: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            tenure_months: args
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
            start_date: args
                .start_date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        }
    };

    let result = origination::originate_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_statement(args: StatementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loans: Vec<LoanRecord> = if let Some(ref path) = args.book {
        let book: InMemoryDirectory = input::file::read_json(path)?;
        let customer_id = args
            .customer_id
            .ok_or("--customer-id is required with --book")?;
        if book.customer(customer_id).is_none() {
            return Err(CreditApprovalError::CustomerNotFound(customer_id).into());
        }
        book.loans(customer_id)
    } else if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        return Err("--input or --book is required for a loan statement".into());
    };

    Ok(serde_json::to_value(statement::loan_statement(&loans))?)
}
