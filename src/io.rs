//! Input/Output operations for the dashboard.
//!
//! This module provides the local key-value store that holds the session and
//! each user's transactions, and writers that render a [`Dashboard`] as CSV,
//! JSON or plain text.
//!
//! The store is a single JSON file mapping keys to JSON values. Keys follow
//! the app's storage layout: [`USER_KEY`] for the signed-in profile and
//! [`transactions_key`] for each user's collection.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::engine::NO_TRANSACTIONS;
use crate::types::{Dashboard, DisplayTransaction, StoredTransaction, TxType};

pub const USER_KEY: &str = "@gofinances:user";

/// Storage key of a user's transaction collection.
pub fn transactions_key(user_id: &str) -> String {
    format!("@gofinances:transactions_user:{user_id}")
}

/// A key-value store persisted as one JSON document.
///
/// Changes stay in memory until [`JsonStore::save`] is called.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    items: BTreeMap<String, Value>,
}

impl JsonStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The file exists but cannot be read
    /// - The file is not a JSON object
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let items = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store: {}", path.display()))?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse store: {}", path.display()))?
            }
        } else {
            tracing::debug!(path = %path.display(), "store file not found, starting empty");
            BTreeMap::new()
        };

        Ok(JsonStore { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the value under `key`, or `None` if the key is absent.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.items
            .get(key)
            .map(|value| {
                T::deserialize(value)
                    .with_context(|| format!("Failed to parse value stored under {key}"))
            })
            .transpose()
    }

    pub fn set_item<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to serialize value for {key}"))?;
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove_item(&mut self, key: &str) -> bool {
        self.items.remove(key).is_some()
    }

    /// Writes the store back to its file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let text =
            serde_json::to_string_pretty(&self.items).context("Failed to serialize store")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write store: {}", self.path.display()))?;

        tracing::info!(path = %self.path.display(), keys = self.items.len(), "saved store");
        Ok(())
    }

    /// Loads a user's transactions in insertion order. A user without a
    /// collection has no transactions.
    ///
    /// Records are returned as stored. Validation happens during aggregation.
    pub fn load_transactions(&self, user_id: &str) -> Result<Vec<StoredTransaction>> {
        Ok(self
            .get_item(&transactions_key(user_id))?
            .unwrap_or_default())
    }

    /// Appends a record to the end of a user's collection.
    pub fn append_transaction(&mut self, user_id: &str, record: StoredTransaction) -> Result<()> {
        let mut transactions = self.load_transactions(user_id)?;
        transactions.push(record);
        self.set_item(&transactions_key(user_id), &transactions)?;

        tracing::info!(
            user = user_id,
            count = transactions.len(),
            "appended transaction"
        );
        Ok(())
    }
}

/// Writes the history list as CSV.
///
/// # Errors
///
/// This function will return an error if:
/// - Serialization of any record fails
/// - Flushing the output buffer fails
pub fn write_transactions_as_csv<W: Write>(
    writer: W,
    transactions: &[DisplayTransaction],
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    for transaction in transactions {
        writer
            .serialize(transaction)
            .context("Failed to write transaction record")?;
    }

    writer.flush().context("Failed to flush CSV output")?;

    Ok(())
}

/// Writes the dashboard as pretty-printed JSON.
pub fn write_dashboard_as_json<W: Write>(mut writer: W, dashboard: &Dashboard) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, dashboard)
        .context("Failed to write dashboard as JSON")?;
    writeln!(writer).context("Failed to write dashboard as JSON")?;
    Ok(())
}

/// Writes the dashboard as a text block: the three highlight cards followed by
/// the history list.
pub fn write_dashboard_as_text<W: Write>(mut writer: W, dashboard: &Dashboard) -> Result<()> {
    let highlights = &dashboard.highlights;
    let cards = [
        ("Entradas", &highlights.entries),
        ("Saídas", &highlights.expense),
        ("Total", &highlights.total),
    ];

    for (title, figure) in cards {
        writeln!(
            writer,
            "{title:<10}{:>20}  {}",
            figure.amount, figure.last_transaction
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "Listagem")?;
    if dashboard.transactions.is_empty() {
        writeln!(writer, "  {}", NO_TRANSACTIONS)?;
    }
    for tx in &dashboard.transactions {
        let sign = match tx.tx_type {
            TxType::Positive => "",
            TxType::Negative => "- ",
        };
        writeln!(
            writer,
            "  {}  {:<24} {:>18}  {}",
            tx.date,
            tx.name,
            format!("{sign}{}", tx.amount),
            tx.category
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::summarize;
    use crate::types::RawAmount;
    use rust_decimal::Decimal;

    #[test]
    fn test_fixture_store_reading() {
        // Test reading the test-data.json fixture
        let store = JsonStore::open("test-data.json").unwrap();

        let records = store.load_transactions("1234").unwrap();

        // Verify we read all 4 records in insertion order
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].id.as_deref(), Some("1"));
        assert_eq!(records[3].id.as_deref(), Some("4"));

        // Verify amounts survive as text and numbers
        assert_eq!(records[0].amount, Some(RawAmount::Text("5000".to_string())));
        assert_eq!(records[1].amount, Some(RawAmount::Integer(59)));

        let dashboard = summarize(&records).unwrap();
        assert_eq!(dashboard.highlights.entries.value, Decimal::from(6200));
        assert_eq!(dashboard.highlights.expense.value, Decimal::new(133950, 2));
        assert_eq!(dashboard.highlights.total.amount, "R$ 4.860,50");
        assert_eq!(dashboard.transactions[0].id, "4");
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("absent.json")).unwrap();

        assert!(store.load_transactions("anyone").unwrap().is_empty());
        assert_eq!(store.get_item::<Value>(USER_KEY).unwrap(), None);
    }

    #[test]
    fn appended_transactions_persist_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonStore::open(&path).unwrap();
        for id in ["1", "2", "3"] {
            let record = StoredTransaction {
                id: Some(id.to_string()),
                amount: Some(RawAmount::Text("1".to_string())),
                tx_type: Some("negative".to_string()),
                ..Default::default()
            };
            store.append_transaction("user-a", record).unwrap();
        }
        store.save().unwrap();

        let reopened = JsonStore::open(&path).unwrap();
        let ids: Vec<_> = reopened
            .load_transactions("user-a")
            .unwrap()
            .into_iter()
            .map(|r| r.id.unwrap())
            .collect();

        assert_eq!(ids, ["1", "2", "3"]);
        assert!(reopened.load_transactions("user-b").unwrap().is_empty());
    }

    #[test]
    fn collections_are_kept_per_user() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::open(dir.path().join("store.json")).unwrap();

        store
            .append_transaction("a", StoredTransaction::default())
            .unwrap();

        assert_eq!(store.load_transactions("a").unwrap().len(), 1);
        assert!(store.load_transactions("b").unwrap().is_empty());
        assert!(store.remove_item(&transactions_key("a")));
        assert!(!store.remove_item(&transactions_key("a")));
    }

    #[test]
    fn non_array_collection_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::open(dir.path().join("store.json")).unwrap();
        store.set_item(&transactions_key("a"), &"oops").unwrap();

        assert!(store.load_transactions("a").is_err());
    }

    #[test]
    fn corrupt_store_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2").unwrap();

        assert!(JsonStore::open(&path).is_err());
    }

    fn sample_history() -> Vec<DisplayTransaction> {
        vec![DisplayTransaction {
            id: "7".to_string(),
            name: "Pizza".to_string(),
            amount: "R$ 59,00".to_string(),
            tx_type: TxType::Negative,
            category: "food".to_string(),
            date: "12/04/24".to_string(),
        }]
    }

    #[test]
    fn history_is_written_as_csv() {
        let mut out = Vec::new();

        write_transactions_as_csv(&mut out, &sample_history()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "id,name,amount,type,category,date\n7,Pizza,\"R$ 59,00\",negative,food,12/04/24\n"
        );
    }

    #[test]
    fn empty_dashboard_text_shows_sentinel() {
        let dashboard = summarize(&[]).unwrap();
        let mut out = Vec::new();

        write_dashboard_as_text(&mut out, &dashboard).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Entradas"));
        assert!(text.contains("R$ 0,00"));
        assert!(text.contains("Listagem\n  Nenhuma transação"));
    }

    #[test]
    fn dashboard_json_uses_camel_case() {
        let dashboard = summarize(&[]).unwrap();
        let mut out = Vec::new();

        write_dashboard_as_json(&mut out, &dashboard).unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["highlights"]["total"]["lastTransaction"], "Nenhuma transação");
        assert_eq!(value["highlights"]["total"]["value"], "0");
    }
}
