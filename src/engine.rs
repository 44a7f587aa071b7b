//! Highlight aggregation for the dashboard.
//!
//! This module turns one user's stored transaction collection into the
//! dashboard view: the history list (newest first, formatted for display) and
//! three highlight figures for income, expenses and the net balance, each
//! labelled with its most recent transaction.
//!
//! Aggregation is a pure function of its input. It fails fast on the first
//! malformed record instead of letting it contribute zero to the totals.

use crate::error::{AggregationError, MonthOutOfRange};
use crate::format;
use crate::months::Month;
use crate::types::{
    Amount, Dashboard, DisplayTransaction, HighlightData, HighlightFigure, StoredTransaction,
    Transaction, TxType,
};
use chrono::Datelike;
use rust_decimal::Decimal;

/// Label used when a partition has no transactions.
pub const NO_TRANSACTIONS: &str = "Nenhuma transação";

/// Validates and aggregates a stored collection.
///
/// # Arguments
///
/// * `records` - One user's records in insertion order (oldest first).
///
/// # Returns
///
/// Returns the dashboard view. If any record is malformed (missing `id`,
/// `type`, `amount` or `date`, a non-numeric or negative amount, an unknown
/// type or an unparsable date) the whole call fails with
/// [`AggregationError::MalformedRecord`] naming the record's index and id.
pub fn summarize(records: &[StoredTransaction]) -> Result<Dashboard, AggregationError> {
    tracing::debug!(records = records.len(), "validating stored transactions");

    let transactions = records
        .iter()
        .enumerate()
        .map(|(index, stored)| {
            Transaction::try_from(stored).map_err(|source| {
                tracing::warn!(index, id = ?stored.id, %source, "rejecting malformed transaction");
                AggregationError::MalformedRecord {
                    index,
                    id: stored.id.clone(),
                    source,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    summarize_transactions(&transactions)
}

/// Aggregates already validated transactions.
///
/// The input slice is only read. The history list is the input reversed, and
/// "most recent" is the latest `date` in each partition, with ties going to
/// the later-inserted record.
pub fn summarize_transactions(
    transactions: &[Transaction],
) -> Result<Dashboard, AggregationError> {
    let entries_total = sum_of(transactions, TxType::Positive)?;
    let expense_total = sum_of(transactions, TxType::Negative)?;
    let total = entries_total
        .checked_sub(expense_total)
        .ok_or(AggregationError::Overflow("net balance"))?;

    let last_entry = most_recent(transactions.iter().filter(|tx| tx.tx_type == TxType::Positive));
    let last_expense = most_recent(transactions.iter().filter(|tx| tx.tx_type == TxType::Negative));
    let last_overall = most_recent(transactions.iter());

    let highlights = HighlightData {
        entries: figure(entries_total, last_day_label("Última entrada", last_entry)?),
        expense: figure(expense_total, last_day_label("Última saída", last_expense)?),
        total: figure(total, period_label(last_overall)?),
    };

    let display = transactions.iter().rev().map(display_transaction).collect();

    tracing::debug!(
        transactions = transactions.len(),
        %entries_total,
        %expense_total,
        %total,
        "summarized transactions"
    );

    Ok(Dashboard {
        transactions: display,
        highlights,
    })
}

fn sum_of(transactions: &[Transaction], tx_type: TxType) -> Result<Amount, AggregationError> {
    transactions
        .iter()
        .filter(|tx| tx.tx_type == tx_type)
        .try_fold(Decimal::ZERO, |sum, tx| sum.checked_add(tx.amount))
        .ok_or(match tx_type {
            TxType::Positive => AggregationError::Overflow("income"),
            TxType::Negative => AggregationError::Overflow("expense"),
        })
}

fn most_recent<'a, I>(transactions: I) -> Option<&'a Transaction>
where
    I: Iterator<Item = &'a Transaction>,
{
    // max_by_key keeps the last of equal maxima.
    transactions.max_by_key(|tx| tx.date)
}

fn figure(value: Amount, last_transaction: String) -> HighlightFigure {
    HighlightFigure {
        value,
        amount: format::currency(value),
        last_transaction,
    }
}

/// `"<prefix> dia 15 de Março"`, or the sentinel for an empty partition.
fn last_day_label(prefix: &str, last: Option<&Transaction>) -> Result<String, MonthOutOfRange> {
    let Some(tx) = last else {
        return Ok(NO_TRANSACTIONS.to_string());
    };
    let month = Month::from_number(tx.date.month())?;
    Ok(format!("{prefix} dia {:02} de {month}", tx.date.day()))
}

/// `"01 a 15 de Março"`, running from the start of the month to the most
/// recent transaction overall.
fn period_label(last: Option<&Transaction>) -> Result<String, MonthOutOfRange> {
    let Some(tx) = last else {
        return Ok(NO_TRANSACTIONS.to_string());
    };
    let month = Month::from_number(tx.date.month())?;
    Ok(format!("01 a {:02} de {month}", tx.date.day()))
}

fn display_transaction(tx: &Transaction) -> DisplayTransaction {
    DisplayTransaction {
        id: tx.id.clone(),
        name: tx.name.clone(),
        amount: format::currency(tx.amount),
        tx_type: tx.tx_type,
        category: tx.category.clone(),
        date: format::short_date(&tx.date),
    }
}

/// Convenience function for tests that builds a validated transaction.
#[cfg(test)]
fn tx(id: &str, tx_type: TxType, amount: &str, date: &str) -> Transaction {
    use std::str::FromStr;

    Transaction {
        id: id.to_string(),
        name: format!("tx {id}"),
        amount: Decimal::from_str(amount).unwrap(),
        tx_type,
        category: "food".to_string(),
        date: chrono::DateTime::parse_from_rfc3339(date).unwrap(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Generates random collections of valid transactions.
    ///
    /// - Amounts: 0.00 to 100000.00 in whole cents
    /// - Types: income or expense, evenly split
    /// - Dates: any day in 2020-2029, inserted in arbitrary order
    fn transactions_strategy() -> impl Strategy<Value = Vec<Transaction>> {
        prop::collection::vec(
            (
                0i64..=10_000_000i64, // amount in cents
                any::<bool>(),        // income?
                2020i32..=2029i32,    // year
                1u32..=12u32,         // month
                1u32..=28u32,         // day
            ),
            0..=60,
        )
        .prop_map(|params| {
            params
                .into_iter()
                .enumerate()
                .map(|(i, (cents, income, year, month, day))| Transaction {
                    id: i.to_string(),
                    name: format!("tx {i}"),
                    amount: Decimal::new(cents, 2),
                    tx_type: if income {
                        TxType::Positive
                    } else {
                        TxType::Negative
                    },
                    category: "leisure".to_string(),
                    date: chrono::DateTime::parse_from_rfc3339(&format!(
                        "{year:04}-{month:02}-{day:02}T12:00:00Z"
                    ))
                    .unwrap(),
                })
                .collect()
        })
    }

    fn digits_as_amount(formatted: &str) -> Decimal {
        let digits: String = formatted.chars().filter(char::is_ascii_digit).collect();
        let magnitude = format::from_cents(digits.parse().unwrap());
        if formatted.starts_with('-') {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Property test: the net balance is income minus expenses, and every
    /// formatted figure reads back as its exact value.
    #[test]
    fn total_is_entries_minus_expense() {
        proptest!(|(transactions in transactions_strategy())| {
            let highlights = summarize_transactions(&transactions).unwrap().highlights;

            prop_assert_eq!(
                highlights.total.value,
                highlights.entries.value - highlights.expense.value
            );
            for figure in [&highlights.entries, &highlights.expense, &highlights.total] {
                prop_assert_eq!(digits_as_amount(&figure.amount), figure.value);
            }
        });
    }

    /// Property test: reversing the history list gives back the input order.
    #[test]
    fn history_reverses_back_to_input_order() {
        proptest!(|(transactions in transactions_strategy())| {
            let dashboard = summarize_transactions(&transactions).unwrap();

            let restored: Vec<_> = dashboard.transactions.iter().rev().map(|d| d.id.clone()).collect();
            let original: Vec<_> = transactions.iter().map(|t| t.id.clone()).collect();
            prop_assert_eq!(restored, original);
        });
    }

    /// Property test: a partition's label names the latest date in it, and an
    /// empty partition shows the sentinel.
    #[test]
    fn labels_follow_the_latest_date() {
        proptest!(|(transactions in transactions_strategy())| {
            let highlights = summarize_transactions(&transactions).unwrap().highlights;

            let latest_expense = transactions
                .iter()
                .filter(|t| t.tx_type == TxType::Negative)
                .map(|t| t.date)
                .max();

            match latest_expense {
                None => prop_assert_eq!(highlights.expense.last_transaction.as_str(), NO_TRANSACTIONS),
                Some(date) => {
                    let month = Month::from_number(date.month()).unwrap();
                    prop_assert_eq!(
                        highlights.expense.last_transaction,
                        format!("Última saída dia {:02} de {}", date.day(), month)
                    );
                }
            }

            if transactions.is_empty() {
                prop_assert_eq!(highlights.total.last_transaction.as_str(), NO_TRANSACTIONS);
            }
        });
    }
}
