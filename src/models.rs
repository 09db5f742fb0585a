use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::hash::identity_hash;

/// A single dated cash-flow entry. Negative amounts are outflows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub key: u32,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl Transaction {
    /// Build a transaction keyed by its `(date, amount)` identity.
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self {
            key: identity_hash(&date_amount_payload(date, amount)),
            date,
            amount,
        }
    }
}

/// Account balance at the end of `date`: `amount` is that day's net
/// movement, `total_amount` the running balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    pub key: u32,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "totalAmount", with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

impl Balance {
    pub fn identity_payload(&self) -> String {
        format!(
            r#"{{"key":{},"date":"{}","amount":{},"totalAmount":{}}}"#,
            self.key,
            self.date.format("%Y-%m-%d"),
            number_text(self.amount),
            number_text(self.total_amount),
        )
    }
}

/// Balance held for `num_days` days; `total = num_days * amount`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditorNumber {
    pub key: u32,
    #[serde(rename = "numDays")]
    pub num_days: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Everything one pipeline run produces, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct AverageBalanceReport {
    pub year: i32,
    #[serde(rename = "openingBalance", with = "rust_decimal::serde::float")]
    pub opening_balance: Decimal,
    pub transactions: Vec<Transaction>,
    pub balances: Vec<Balance>,
    #[serde(rename = "creditorNumbers")]
    pub creditor_numbers: Vec<CreditorNumber>,
    #[serde(rename = "annualBalance", with = "rust_decimal::serde::float")]
    pub annual_balance: Decimal,
    #[serde(rename = "averageBalance", with = "rust_decimal::serde::float")]
    pub average_balance: Decimal,
}

// ---------------------------------------------------------------------------
// Identity payloads
// ---------------------------------------------------------------------------

/// `{"date":"YYYY-MM-DD","amount":<n>}`, the payload behind transaction and
/// opening-balance keys.
pub fn date_amount_payload(date: NaiveDate, amount: Decimal) -> String {
    format!(
        r#"{{"date":"{}","amount":{}}}"#,
        date.format("%Y-%m-%d"),
        number_text(amount)
    )
}

/// Shortest decimal text: no trailing zeros, no negative zero.
fn number_text(value: Decimal) -> String {
    value.normalize().to_string()
}
