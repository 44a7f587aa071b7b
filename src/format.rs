//! Display formatting in the pt-BR locale.
//!
//! Amounts are formatted straight from [`Decimal`], so the digits in the
//! output are exactly the value rounded to the cent.

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Amount, Timestamp};

pub const CURRENCY_SYMBOL: &str = "R$";

/// Formats an amount as Brazilian reais, e.g. `R$ 1.234,56` or `-R$ 0,50`.
pub fn currency(amount: Amount) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (integer, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{sign}{CURRENCY_SYMBOL} {},{cents}",
        group_thousands(integer, '.')
    )
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Short date for the history list: `dd/mm/yy`, in the record's own offset.
pub fn short_date(date: &Timestamp) -> String {
    format!(
        "{:02}/{:02}/{:02}",
        date.day(),
        date.month(),
        date.year().rem_euclid(100)
    )
}

/// Converts a value in cents back into an amount. Used when reading digits out
/// of a formatted string.
pub fn from_cents(cents: i64) -> Amount {
    Decimal::new(cents, 2)
}
