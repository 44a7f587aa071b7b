//! Transaction registration.
//!
//! Validates the registration form and turns it into a record for the store.
//! Amounts are typed as text in the form, so they are parsed here and written
//! back normalized.

use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::FormError;
use crate::types::{RawAmount, StoredTransaction, Timestamp, TxType};

/// A selectable category: storage key and display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub name: &'static str,
}

pub static CATEGORIES: [Category; 6] = [
    Category { key: "purchases", name: "Compras" },
    Category { key: "food", name: "Alimentação" },
    Category { key: "salary", name: "Salário" },
    Category { key: "car", name: "Carro" },
    Category { key: "leisure", name: "Lazer" },
    Category { key: "studies", name: "Estudos" },
];

pub fn find_category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.key == key)
}

/// The registration form as the user filled it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub amount: String,
    pub tx_type: Option<TxType>,
    pub category: Option<String>,
}

impl RegisterForm {
    /// Checks the form and builds the record to append, stamped with `now`.
    ///
    /// Fields are checked in form order: name, amount, type, category.
    pub fn into_record(self, now: Timestamp) -> Result<StoredTransaction, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        // Accept the decimal comma people type in pt-BR.
        let amount = Decimal::from_str(&self.amount.trim().replace(',', "."))
            .map_err(|_| FormError::AmountNotNumeric)?;
        if amount <= Decimal::ZERO {
            return Err(FormError::AmountNotPositive);
        }

        let tx_type = self.tx_type.ok_or(FormError::MissingType)?;

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(FormError::MissingCategory)?;
        let category = find_category(category)
            .ok_or_else(|| FormError::UnknownCategory(category.to_string()))?;

        Ok(StoredTransaction {
            id: Some(Uuid::new_v4().to_string()),
            name: name.to_string(),
            amount: Some(RawAmount::from(amount)),
            tx_type: Some(tx_type.as_str().to_string()),
            category: category.key.to_string(),
            date: Some(now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        })
    }
}
