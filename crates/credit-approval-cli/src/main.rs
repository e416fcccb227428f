mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::eligibility::EligibilityArgs;
use commands::installment::InstallmentArgs;
use commands::loans::{ApprovedLimitArgs, OriginateArgs, StatementArgs};

/// Loan eligibility and EMI calculations
#[derive(Parser)]
#[command(
    name = "cas",
    version,
    about = "Loan eligibility and EMI calculations",
    long_about = "A CLI for credit approval decisions with decimal precision. Scores a \
                  customer's loan history, bands the score into an approval and interest \
                  rate, and prices the monthly installment."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "credit_approval_core=debug")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a fixed-rate monthly installment (EMI)
    Installment(InstallmentArgs),
    /// Decide loan eligibility, rate and installment for a customer
    Eligibility(EligibilityArgs),
    /// Derive a customer's approved limit from monthly salary
    ApprovedLimit(ApprovedLimitArgs),
    /// Price a new loan and date its final installment
    Originate(OriginateArgs),
    /// List a customer's loans with repayments left
    Statement(StatementArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Installment(args) => commands::installment::run_installment(args),
        Commands::Eligibility(args) => commands::eligibility::run_eligibility(args),
        Commands::ApprovedLimit(args) => commands::loans::run_approved_limit(args),
        Commands::Originate(args) => commands::loans::run_originate(args),
        Commands::Statement(args) => commands::loans::run_statement(args),
        Commands::Version => {
            println!("cas {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
