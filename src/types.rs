//! Core data types for the dashboard.
//!
//! Records travel through the crate in two shapes:
//!
//! - [`StoredTransaction`]: the record exactly as the storage collaborator
//!   holds it. Every field is optional and `amount` may be JSON text or a
//!   JSON number, so nothing is rejected while parsing the collection.
//! - [`Transaction`]: a validated record with an exact [`Amount`], a known
//!   [`TxType`] and a parsed date. Converting with [`TryFrom`] is the only
//!   way to get one from storage, and it never coerces a bad amount to zero.
//!
//! The output shapes handed to the presentation layer ([`Dashboard`],
//! [`HighlightData`], [`HighlightFigure`], [`DisplayTransaction`]) are
//! serialized in camelCase.
//!
//! # Examples
//!
//! Validating a stored record:
//! ```
//! use gofinances_highlights::types::{RawAmount, StoredTransaction, Transaction, TxType};
//!
//! let stored = StoredTransaction {
//!     id: Some("1".to_string()),
//!     name: "Salary".to_string(),
//!     amount: Some(RawAmount::Text("100.50".to_string())),
//!     tx_type: Some("positive".to_string()),
//!     category: "salary".to_string(),
//!     date: Some("2024-03-15T12:00:00.000Z".to_string()),
//! };
//!
//! let tx = Transaction::try_from(&stored).unwrap();
//! assert_eq!(tx.tx_type, TxType::Positive);
//! ```

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

pub type TxId = String;
pub type UserId = String;
pub type Amount = Decimal;
pub type Timestamp = DateTime<FixedOffset>;

/// Which side of the ledger a transaction is on.
///
/// - **Positive**: income ("entrada"). Adds to the balance.
/// - **Negative**: expense ("saída"). Subtracts from the balance.
///
/// The amount itself is always a magnitude; only this type carries the sign.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Positive,
    Negative,
}

impl TxType {
    pub fn as_str(self) -> &'static str {
        match self {
            TxType::Positive => "positive",
            TxType::Negative => "negative",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "positive" => Ok(TxType::Positive),
            "negative" => Ok(TxType::Negative),
            other => Err(RecordError::UnknownType(other.to_string())),
        }
    }
}

/// An amount as it was written to storage: text from a form field or a JSON number.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(untagged)]
pub enum RawAmount {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl RawAmount {
    /// Converts to an exact decimal.
    ///
    /// Empty or non-numeric text is an error, never zero.
    pub fn to_decimal(&self) -> Result<Amount, RecordError> {
        let amount = match self {
            RawAmount::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(RecordError::InvalidAmount {
                        value: text.clone(),
                        reason: "empty amount".to_string(),
                    });
                }
                Decimal::from_str(trimmed)
                    .or_else(|_| Decimal::from_scientific(trimmed))
                    .map_err(|e| RecordError::InvalidAmount {
                        value: text.clone(),
                        reason: e.to_string(),
                    })?
            }
            RawAmount::Integer(value) => Decimal::from(*value),
            RawAmount::Float(value) => {
                Decimal::try_from(*value).map_err(|e| RecordError::InvalidAmount {
                    value: value.to_string(),
                    reason: e.to_string(),
                })?
            }
        };

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(RecordError::NegativeAmount(amount));
        }

        Ok(amount)
    }
}

impl From<Amount> for RawAmount {
    fn from(amount: Amount) -> Self {
        RawAmount::Text(amount.normalize().to_string())
    }
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawAmountVisitor;

        impl<'de> Visitor<'de> for RawAmountVisitor {
            type Value = RawAmount;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawAmount::Text(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawAmount::Float(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawAmount::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(RawAmount::Integer)
                    .map_err(|_| de::Error::custom(format!("amount {} is out of range", value)))
            }
        }

        deserializer.deserialize_any(RawAmountVisitor)
    }
}

/// A transaction record as held by the storage collaborator.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
pub struct StoredTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TxId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<RawAmount>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tx_type: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A validated transaction.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Transaction {
    pub id: TxId,
    pub name: String,
    pub amount: Amount,
    pub tx_type: TxType,
    pub category: String,
    pub date: Timestamp,
}

impl TryFrom<&StoredTransaction> for Transaction {
    type Error = RecordError;

    fn try_from(stored: &StoredTransaction) -> Result<Self, Self::Error> {
        let id = stored.id.clone().ok_or(RecordError::MissingField("id"))?;
        let tx_type = stored
            .tx_type
            .as_deref()
            .ok_or(RecordError::MissingField("type"))?
            .parse::<TxType>()?;
        let amount = stored
            .amount
            .as_ref()
            .ok_or(RecordError::MissingField("amount"))?
            .to_decimal()?;
        let raw_date = stored
            .date
            .as_deref()
            .ok_or(RecordError::MissingField("date"))?;
        let date =
            DateTime::parse_from_rfc3339(raw_date.trim()).map_err(|e| RecordError::InvalidDate {
                value: raw_date.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Transaction {
            id,
            name: stored.name.clone(),
            amount,
            tx_type,
            category: stored.category.clone(),
            date,
        })
    }
}

/// The signed-in user's profile as returned by the identity provider.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// A transaction formatted for the history list.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct DisplayTransaction {
    pub id: TxId,
    pub name: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub category: String,
    pub date: String,
}

/// One summary card: the raw figure, its formatted amount and a label
/// describing the most recent transaction behind it.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HighlightFigure {
    pub value: Amount,
    pub amount: String,
    pub last_transaction: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct HighlightData {
    pub entries: HighlightFigure,
    pub expense: HighlightFigure,
    pub total: HighlightFigure,
}

/// Everything the dashboard screen renders.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct Dashboard {
    /// Newest first.
    pub transactions: Vec<DisplayTransaction>,
    pub highlights: HighlightData,
}
