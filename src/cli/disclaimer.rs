use colored::Colorize;

use crate::error::Result;
use crate::settings::store_path;
use crate::storage::{has_agreed_disclaimer, record_disclaimer_agreement, JsonFileStore, KeyValueStore};

const NOTICE: &str = "\
giacenza computes creditor numbers and the average balance of a current
account or card from its bank statements.

The tool is experimental: check the results it produces. Its authors are not
responsible, directly or indirectly, for errors in the computed figures, and
the user alone is responsible for how they are used.

DO NOT RELY SOLELY ON THESE RESULTS FOR AN ISEE DECLARATION.

Statement data never leaves this machine and nothing is shared with third
parties.";

pub fn run(accept: bool) -> Result<()> {
    let mut store = JsonFileStore::open(store_path());
    if show(&mut store, accept)? {
        println!("Agreement recorded.");
    } else if !has_agreed_disclaimer(&store) {
        println!("\nRun `giacenza disclaimer --accept` to confirm you have read this notice.");
    }
    Ok(())
}

/// Print the notice and, with `accept`, record agreement. Returns whether a
/// new agreement was stored.
fn show(store: &mut dyn KeyValueStore, accept: bool) -> Result<bool> {
    println!("{}\n\n{NOTICE}", "User notice".bold());
    if accept && !has_agreed_disclaimer(store) {
        record_disclaimer_agreement(store)?;
        return Ok(true);
    }
    Ok(false)
}

/// Short stderr reminder while the notice has not been accepted.
pub fn remind_if_not_agreed(store: &dyn KeyValueStore) {
    if !has_agreed_disclaimer(store) {
        eprintln!(
            "{} results are indicative only; see `giacenza disclaimer`.",
            "Notice:".yellow().bold()
        );
    }
}
