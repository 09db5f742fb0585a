use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::StringRecord;
use regex::Regex;
use rust_decimal::Decimal;

use crate::calendar::CalendarLanguage;
use crate::error::{GiacenzaError, Result};
use crate::models::Transaction;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a statement amount. A comma is the decimal separator; dots in front
/// of it are thousands separators. Returns `None` for empty or unparsable
/// input.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let s: String = raw
        .chars()
        .filter(|c| !matches!(*c, '"' | '€' | ' ' | '\u{a0}'))
        .collect();
    if s.is_empty() {
        return None;
    }
    let s = if s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else {
        s
    };
    Decimal::from_str(&s).ok()
}

/// Parse `"DD Mon"` or `"DD Mon YYYY"`. Without an explicit year the
/// statement year is used.
pub fn parse_statement_date(
    re: &Regex,
    raw: &str,
    language: CalendarLanguage,
    default_year: i32,
) -> Option<NaiveDate> {
    let caps = re.captures(raw.trim())?;
    let day: u32 = caps[1].parse().ok()?;
    let month = language.month_number(&caps[2])?;
    let year: i32 = match caps.get(3) {
        Some(y) => y.as_str().parse().ok()?,
        None => default_year,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn statement_date_regex() -> Result<Regex> {
    Regex::new(r"^(\d{1,2})\s+(\S+)(?:\s+(\d{4}))?$").map_err(|e| GiacenzaError::Other(e.to_string()))
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|f| f.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Dialects: enum dispatch, one variant per supported bank export
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialectKind {
    Revolut,
}

impl DialectKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Revolut => "revolut",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Revolut => "Revolut account statement",
        }
    }

    pub fn detect(&self, content: &str) -> bool {
        match self {
            Self::Revolut => content.contains(REVOLUT_HEADER),
        }
    }

    /// Turn raw statement text into transactions in ascending date order.
    /// Fails with `FormatMismatch` when the dialect's header is missing.
    pub fn normalize(
        &self,
        language: CalendarLanguage,
        year: i32,
        content: &str,
    ) -> Result<Vec<Transaction>> {
        if !self.detect(content) {
            return Err(GiacenzaError::FormatMismatch);
        }
        match self {
            Self::Revolut => normalize_revolut(language, year, content),
        }
    }
}

pub const ALL_DIALECTS: &[DialectKind] = &[DialectKind::Revolut];

pub fn get_by_key(key: &str) -> Option<DialectKind> {
    ALL_DIALECTS.iter().find(|d| d.key() == key).copied()
}

pub fn get_for_content(content: &str) -> Option<DialectKind> {
    ALL_DIALECTS.iter().find(|d| d.detect(content)).copied()
}

/// An explicit format key wins; otherwise detect from the content.
pub fn resolve_dialect(format_key: Option<&str>, content: &str) -> Result<DialectKind> {
    match format_key {
        Some(key) => get_by_key(key).ok_or_else(|| GiacenzaError::UnknownFormat(key.to_string())),
        None => get_for_content(content).ok_or(GiacenzaError::FormatMismatch),
    }
}

// ---------------------------------------------------------------------------
// merge_transactions
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct MergeResult {
    pub transactions: Vec<Transaction>,
    pub imported: usize,
    pub skipped: usize,
}

/// Append `incoming` to `existing`, skipping any record whose key is already
/// present, including keys appended earlier in the same call. On collision
/// the existing record wins.
pub fn merge_transactions(existing: Vec<Transaction>, incoming: &[Transaction]) -> MergeResult {
    let mut seen: HashSet<u32> = existing.iter().map(|t| t.key).collect();
    let mut transactions = existing;
    let mut imported = 0usize;
    let mut skipped = 0usize;

    for txn in incoming {
        if !seen.insert(txn.key) {
            skipped += 1;
            continue;
        }
        transactions.push(txn.clone());
        imported += 1;
    }

    MergeResult {
        transactions,
        imported,
        skipped,
    }
}

/// Normalize one statement and merge it into a copy of `existing`, which is
/// left untouched when the statement fails to parse. With no `format_key` the
/// dialect is detected from the content.
pub fn import_statement(
    existing: &[Transaction],
    content: &str,
    format_key: Option<&str>,
    language: CalendarLanguage,
    year: i32,
) -> Result<MergeResult> {
    let dialect = resolve_dialect(format_key, content)?;
    let parsed = dialect.normalize(language, year, content)?;
    Ok(merge_transactions(existing.to_vec(), &parsed))
}

// ---------------------------------------------------------------------------
// Revolut parser
// ---------------------------------------------------------------------------

const REVOLUT_HEADER: &str = "Completed Date;Reference;Paid Out (EUR);Paid In (EUR);Exchange Out;Exchange In; Balance (EUR);Exchange Rate;Category";

const COL_DATE: usize = 0;
const COL_PAID_OUT: usize = 2;
const COL_PAID_IN: usize = 3;

fn normalize_revolut(language: CalendarLanguage, year: i32, content: &str) -> Result<Vec<Transaction>> {
    // Rows start on the line after the header, wherever the header sits.
    let header_at = content.find(REVOLUT_HEADER).ok_or(GiacenzaError::FormatMismatch)?;
    let body_start = content[header_at..]
        .find('\n')
        .map_or(content.len(), |i| header_at + i + 1);
    let line_offset = content[..body_start].matches('\n').count() as u64;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(content[body_start..].as_bytes());
    let date_re = statement_date_regex()?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        records.push(record);
    }

    // Exports list the newest movement first.
    records.reverse();

    let mut txns = Vec::with_capacity(records.len());
    for record in &records {
        let line = line_offset + record_line(record);
        let raw_date = record.get(COL_DATE).unwrap_or("");
        let date = parse_statement_date(&date_re, raw_date, language, year).ok_or_else(|| {
            GiacenzaError::MalformedDate {
                line,
                value: raw_date.to_string(),
            }
        })?;
        let amount = resolve_revolut_amount(record, line)?;
        txns.push(Transaction::new(date, amount));
    }
    Ok(txns)
}

/// Paid-out is always an outflow whatever sign the export used; paid-in is
/// taken as-is.
fn resolve_revolut_amount(record: &StringRecord, line: u64) -> Result<Decimal> {
    let paid_out = record.get(COL_PAID_OUT).map(str::trim).unwrap_or("");
    let paid_in = record.get(COL_PAID_IN).map(str::trim).unwrap_or("");
    let malformed = |value: &str| GiacenzaError::MalformedAmount {
        line,
        value: value.to_string(),
    };

    if !paid_out.is_empty() {
        let amount = parse_amount(paid_out).ok_or_else(|| malformed(paid_out))?;
        Ok(-amount.abs())
    } else if !paid_in.is_empty() {
        parse_amount(paid_in).ok_or_else(|| malformed(paid_in))
    } else {
        Err(malformed(&record.iter().collect::<Vec<_>>().join(";")))
    }
}
