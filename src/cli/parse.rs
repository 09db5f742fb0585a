use comfy_table::{Cell, Table};

use crate::cli::{resolve_language, resolve_year};
use crate::error::Result;
use crate::fmt::money;
use crate::importer::import_statement;
use crate::settings::load_settings;

pub fn run(
    file: &str,
    year: Option<i32>,
    language: Option<&str>,
    format: Option<&str>,
    json: bool,
) -> Result<()> {
    let settings = load_settings();
    let language = resolve_language(language, &settings)?;
    let year = resolve_year(year);

    let content = std::fs::read_to_string(file)?;
    let result = import_statement(&[], &content, format, language, year)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.transactions)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Key", "Date", "Amount"]);
    for t in &result.transactions {
        table.add_row(vec![Cell::new(t.key), Cell::new(t.date), Cell::new(money(t.amount))]);
    }
    println!("{table}");
    println!("{} transactions, {} skipped (duplicates)", result.imported, result.skipped);
    Ok(())
}
