pub mod disclaimer;
pub mod init;
pub mod parse;
pub mod report;
pub mod status;

use chrono::Datelike;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::calendar::CalendarLanguage;
use crate::error::Result;
use crate::importer::parse_amount;
use crate::settings::Settings;

/// Accepts both `1234.56` and `1234,56`.
pub(crate) fn parse_amount_arg(raw: &str) -> std::result::Result<Decimal, String> {
    parse_amount(raw).ok_or_else(|| format!("invalid amount: {raw}"))
}

pub(crate) fn resolve_year(year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| chrono::Local::now().year())
}

pub(crate) fn resolve_language(language: Option<&str>, settings: &Settings) -> Result<CalendarLanguage> {
    language.unwrap_or(settings.language.as_str()).parse()
}

#[derive(Parser)]
#[command(
    name = "giacenza",
    about = "Average daily balance and creditor numbers from bank statement exports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute creditor numbers and the average balance for a year.
    Report {
        /// Statement files (CSV exports), merged in the given order
        #[arg(required = true)]
        files: Vec<String>,
        /// Year to aggregate (default: current year)
        #[arg(long)]
        year: Option<i32>,
        /// Account balance on January 1
        #[arg(
            long = "opening-balance",
            default_value = "0",
            value_parser = parse_amount_arg,
            allow_hyphen_values = true
        )]
        opening_balance: Decimal,
        /// Calendar language of the statement dates, e.g. IT
        #[arg(long)]
        language: Option<String>,
        /// Statement format key (default: detect from the file)
        #[arg(long)]
        format: Option<String>,
        /// Also print transactions, balances by date and creditor numbers
        #[arg(long)]
        details: bool,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the transactions read from a single statement file.
    Parse {
        /// Statement file (CSV export)
        file: String,
        /// Year used for dates without an explicit year (default: current year)
        #[arg(long)]
        year: Option<i32>,
        /// Calendar language of the statement dates, e.g. IT
        #[arg(long)]
        language: Option<String>,
        /// Statement format key (default: detect from the file)
        #[arg(long)]
        format: Option<String>,
        /// Print transactions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the user notice; pass --accept to record agreement.
    Disclaimer {
        #[arg(long)]
        accept: bool,
    },
    /// Save default settings.
    Init {
        /// Default calendar language, e.g. IT
        #[arg(long)]
        language: Option<String>,
    },
    /// Show settings and supported formats.
    Status,
}
