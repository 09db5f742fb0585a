use chrono::Datelike;
use colored::Colorize;
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use crate::balance::compute_report;
use crate::cli::disclaimer::remind_if_not_agreed;
use crate::cli::{resolve_language, resolve_year};
use crate::error::{GiacenzaError, Result};
use crate::fmt::money;
use crate::importer::import_statement;
use crate::models::{AverageBalanceReport, Transaction};
use crate::settings::{load_settings, store_path};
use crate::storage::JsonFileStore;

pub fn run(
    files: &[String],
    year: Option<i32>,
    opening_balance: Decimal,
    language: Option<&str>,
    format: Option<&str>,
    details: bool,
    json: bool,
) -> Result<()> {
    let settings = load_settings();
    remind_if_not_agreed(&JsonFileStore::open(store_path()));

    let language = resolve_language(language, &settings)?;
    let year = resolve_year(year);

    let mut transactions: Vec<Transaction> = Vec::new();
    for file in files {
        let content = std::fs::read_to_string(file)?;
        let merged = match import_statement(&transactions, &content, format, language, year) {
            Ok(merged) => merged,
            Err(GiacenzaError::FormatMismatch) => {
                eprintln!(
                    "{} {file} does not look like a supported statement; skipped.",
                    "Warning:".yellow().bold()
                );
                continue;
            }
            Err(e) => return Err(GiacenzaError::Other(format!("{file}: {e}"))),
        };
        if !json {
            println!("{file}: {} imported, {} skipped (duplicates)", merged.imported, merged.skipped);
        }
        transactions = merged.transactions;
    }

    // Statements may be given in any order; the aggregation needs ascending dates.
    transactions.sort_by_key(|t| t.date);

    let (in_year, outside): (Vec<Transaction>, Vec<Transaction>) =
        transactions.into_iter().partition(|t| t.date.year() == year);
    if !outside.is_empty() {
        eprintln!(
            "{} {} transaction(s) outside {year} ignored.",
            "Warning:".yellow().bold(),
            outside.len()
        );
    }

    let report = compute_report(year, opening_balance, in_year)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if details {
        print_details(&report);
    }
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &AverageBalanceReport) {
    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![Cell::new("Year"), Cell::new(report.year)]);
    table.add_row(vec![
        Cell::new(format!("Opening balance (01/01/{})", report.year)),
        Cell::new(money(report.opening_balance)),
    ]);
    table.add_row(vec![Cell::new("Transactions"), Cell::new(report.transactions.len())]);
    table.add_row(vec![
        Cell::new("Annual balance".bold()),
        Cell::new(money(report.annual_balance)),
    ]);
    let average_label = if report.average_balance >= Decimal::ZERO {
        "Average balance".green().bold()
    } else {
        "Average balance".red().bold()
    };
    table.add_row(vec![Cell::new(average_label), Cell::new(money(report.average_balance))]);
    println!("Average Balance\n{table}");
}

fn print_details(report: &AverageBalanceReport) {
    let mut txns = Table::new();
    txns.set_header(vec!["Date", "Amount"]);
    for t in &report.transactions {
        txns.add_row(vec![Cell::new(t.date), Cell::new(money(t.amount))]);
    }
    println!("Transactions\n{txns}\n");

    let mut balances = Table::new();
    balances.set_header(vec!["Date", "Amount", "Total"]);
    for b in &report.balances {
        balances.add_row(vec![
            Cell::new(b.date),
            Cell::new(money(b.amount)),
            Cell::new(money(b.total_amount)),
        ]);
    }
    println!("Balances by Date\n{balances}\n");

    let mut creditor = Table::new();
    creditor.set_header(vec!["Days", "Amount", "Creditor number"]);
    for cn in &report.creditor_numbers {
        creditor.add_row(vec![
            Cell::new(cn.num_days),
            Cell::new(money(cn.amount)),
            Cell::new(money(cn.total)),
        ]);
    }
    println!("Creditor Numbers\n{creditor}\n");
}
