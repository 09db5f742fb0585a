use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::calendar::{days_in_year, year_end_exclusive, year_start};
use crate::error::{GiacenzaError, Result};
use crate::hash::identity_hash;
use crate::models::{date_amount_payload, AverageBalanceReport, Balance, CreditorNumber, Transaction};

fn checked_sum(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b).ok_or(GiacenzaError::Overflow("balances"))
}

fn year_bound(bound: Option<NaiveDate>, year: i32) -> Result<NaiveDate> {
    bound.ok_or_else(|| GiacenzaError::Other(format!("Year out of range: {year}")))
}

// ---------------------------------------------------------------------------
// Balances by date
// ---------------------------------------------------------------------------

/// Synthetic balance on January 1 of `year`.
pub fn opening_balance(year: i32, amount: Decimal) -> Result<Balance> {
    let date = year_bound(year_start(year), year)?;
    Ok(Balance {
        key: identity_hash(&date_amount_payload(date, amount)),
        date,
        amount,
        total_amount: amount,
    })
}

/// Fold ascending transactions into one balance per distinct date, each
/// carrying the running total from `opening`.
///
/// Transactions must be sorted by date and fall inside the opening
/// balance's year; anything else is rejected rather than re-sorted.
pub fn accumulate_balances(opening: Balance, transactions: &[Transaction]) -> Result<Vec<Balance>> {
    let year = opening.date.year();
    let mut balances = Vec::with_capacity(transactions.len() + 1);
    let mut current = opening;

    for txn in transactions {
        if txn.date.year() != year {
            return Err(GiacenzaError::OutsideYear {
                date: txn.date,
                year,
            });
        }
        if txn.date < current.date {
            return Err(GiacenzaError::OutOfOrder {
                date: txn.date,
                previous: current.date,
            });
        }

        if txn.date == current.date {
            current.amount = checked_sum(current.amount, txn.amount)?;
            current.total_amount = checked_sum(current.total_amount, txn.amount)?;
        } else {
            let total_amount = checked_sum(current.total_amount, txn.amount)?;
            balances.push(current);
            current = Balance {
                key: txn.key,
                date: txn.date,
                amount: txn.amount,
                total_amount,
            };
        }
    }
    balances.push(current);

    Ok(balances)
}

// ---------------------------------------------------------------------------
// Creditor numbers
// ---------------------------------------------------------------------------

/// One creditor number per balance, covering `[balance.date, next date)`;
/// the last one runs through December 31 of `year`.
pub fn derive_creditor_numbers(balances: &[Balance], year: i32) -> Result<Vec<CreditorNumber>> {
    let year_end = year_bound(year_end_exclusive(year), year)?;
    let mut creditor_numbers = Vec::with_capacity(balances.len());

    for (i, balance) in balances.iter().enumerate() {
        let next_date = balances.get(i + 1).map_or(year_end, |next| next.date);
        let num_days = (next_date - balance.date).num_days();
        let total = Decimal::from(num_days)
            .checked_mul(balance.total_amount)
            .ok_or(GiacenzaError::Overflow("creditor numbers"))?;
        creditor_numbers.push(CreditorNumber {
            key: identity_hash(&balance.identity_payload()),
            num_days,
            amount: balance.total_amount,
            total,
        });
    }

    Ok(creditor_numbers)
}

pub fn annual_balance(creditor_numbers: &[CreditorNumber]) -> Result<Decimal> {
    creditor_numbers.iter().try_fold(Decimal::ZERO, |acc, cn| {
        acc.checked_add(cn.total).ok_or(GiacenzaError::Overflow("annual balance"))
    })
}

pub fn average_balance(annual_balance: Decimal, year: i32) -> Decimal {
    annual_balance / Decimal::from(days_in_year(year))
}

/// Run the whole aggregation for `year`.
pub fn compute_report(
    year: i32,
    opening_amount: Decimal,
    transactions: Vec<Transaction>,
) -> Result<AverageBalanceReport> {
    let opening = opening_balance(year, opening_amount)?;
    let balances = accumulate_balances(opening, &transactions)?;
    let creditor_numbers = derive_creditor_numbers(&balances, year)?;
    let annual = annual_balance(&creditor_numbers)?;

    Ok(AverageBalanceReport {
        year,
        opening_balance: opening_amount,
        transactions,
        balances,
        creditor_numbers,
        annual_balance: annual,
        average_balance: average_balance(annual, year),
    })
}
