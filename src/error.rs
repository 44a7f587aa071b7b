//! Error types surfaced by the library.
//!
//! Validation and aggregation failures are typed so callers can tell a bad
//! record apart from an arithmetic problem. The binary and the storage layer
//! wrap these in [`anyhow::Error`] with context.

use thiserror::Error;

use crate::types::Amount;

/// Why a single stored record could not be turned into a [`Transaction`](crate::types::Transaction).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RecordError {
    #[error("record is missing the `{0}` field")]
    MissingField(&'static str),

    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("amount {0} is negative, amounts are stored as magnitudes")]
    NegativeAmount(Amount),

    #[error("unknown transaction type {0:?}, expected \"positive\" or \"negative\"")]
    UnknownType(String),

    #[error("invalid date {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },
}

/// A calendar month number outside `1..=12`.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("month {0} is outside the calendar range 1..=12")]
pub struct MonthOutOfRange(pub u32);

/// Failure of a whole aggregation call.
///
/// Aggregation fails fast: the first malformed record aborts the call and is
/// reported with its position in the input, so no partial totals escape.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AggregationError {
    #[error("rejected record #{index} (id {id:?}): {source}")]
    MalformedRecord {
        index: usize,
        id: Option<String>,
        #[source]
        source: RecordError,
    },

    #[error("overflow while summing {0} amounts")]
    Overflow(&'static str),

    #[error(transparent)]
    Month(#[from] MonthOutOfRange),
}

/// Registration form validation failures. Messages are shown to the user as-is.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FormError {
    #[error("Nome é obrigatório")]
    MissingName,

    #[error("Informe um valor numérico")]
    AmountNotNumeric,

    #[error("O valor não pode ser negativo ou zero")]
    AmountNotPositive,

    #[error("Selecione o tipo da transação")]
    MissingType,

    #[error("Selecione a categoria")]
    MissingCategory,

    #[error("Categoria desconhecida: {0}")]
    UnknownCategory(String),
}
