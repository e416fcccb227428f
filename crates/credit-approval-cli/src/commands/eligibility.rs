use chrono::Datelike;
use clap::Args;
use serde_json::Value;

use credit_approval_core::eligibility::directory::{self, InMemoryDirectory};
use credit_approval_core::eligibility::engine::{self, EligibilityInput};

use crate::input;

/// Arguments for an eligibility check
#[derive(Args)]
pub struct EligibilityArgs {
    /// Path to a JSON eligibility input (customer, loans, current_year)
    #[arg(long, conflicts_with = "book")]
    pub input: Option<String>,

    /// Path to a JSON book of customers and loans
    #[arg(long, requires = "customer_id")]
    pub book: Option<String>,

    /// Customer to look up in the book
    #[arg(long)]
    pub customer_id: Option<u64>,

    /// Calendar year for the recent-borrowing signal (defaults to this year)
    #[arg(long)]
    pub current_year: Option<i32>,

    /// Policy file (.json, .yaml or .yml) overriding the default policy
    #[arg(long)]
    pub policy: Option<String>,
}

pub fn run_eligibility(args: EligibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let policy = args
        .policy
        .as_deref()
        .map(input::policy::read_policy)
        .transpose()?;

    let mut request: EligibilityInput = if let Some(ref path) = args.book {
        let book: InMemoryDirectory = input::file::read_json(path)?;
        let customer_id = args
            .customer_id
            .ok_or("--customer-id is required with --book")?;
        let year = args.current_year.unwrap_or_else(this_year);
        let book_policy = policy.clone().unwrap_or_default();
        directory::eligibility_input(&book, customer_id, year, book_policy)?
    } else if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        return Err("--input or --book is required for an eligibility check".into());
    };

    if let Some(year) = args.current_year {
        request.current_year = year;
    }
    if let Some(policy) = policy {
        request.policy = policy;
    }

    tracing::info!(
        customer_id = ?request.customer.customer_id,
        loans = request.loans.len(),
        current_year = request.current_year,
        "checking eligibility"
    );

    let result = engine::check_eligibility(&request)?;
    Ok(serde_json::to_value(result)?)
}

fn this_year() -> i32 {
    chrono::Local::now().year()
}
