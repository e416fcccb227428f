use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_approval_core::amortization::{self, InstallmentInput};

use crate::input;

/// Arguments for EMI calculation
#[derive(Args)]
pub struct InstallmentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (16 = 16% p.a.)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Tenure in months
    #[arg(long, alias = "tenure")]
    pub tenure_months: Option<u32>,
}

pub fn run_installment(args: InstallmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input: InstallmentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        InstallmentInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            tenure_months: args
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
        }
    };

    let result = amortization::calculate_installment(&emi_input)?;
    Ok(serde_json::to_value(result)?)
}
