//! JSON file transaction store
//!
//! Keeps the whole batch as one pretty-printed JSON array. Appends in this
//! process are serialised; other processes writing the same file are not
//! coordinated and the last writer wins.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{next_id, TransactionStore};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction};

/// Transaction store backed by a JSON array file
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store for `path` (the file need not exist yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read_all(&self) -> Result<Vec<Transaction>> {
        let contents = fs::read_to_string(&self.path)?;
        let transactions: Vec<Transaction> = serde_json::from_str(&contents)?;
        debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "Loaded transactions"
        );
        Ok(transactions)
    }

    /// Replace the file contents via a temp file in the same directory
    fn write_all(&self, transactions: &[Transaction]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            info!("Created data directory: {}", dir.display());
        }

        let temp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, transactions)?;
            writer.flush()?;
        }
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl TransactionStore for JsonFileStore {
    fn name(&self) -> &str {
        "json-file"
    }

    fn list(&self) -> Result<Vec<Transaction>> {
        if !self.exists() {
            return Err(Error::MissingData(self.path.display().to_string()));
        }
        self.read_all()
    }

    fn append_dated(&self, entry: NewTransaction, date: NaiveDate) -> Result<Transaction> {
        entry.validate()?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::Persistence("store write lock poisoned".to_string()))?;

        let mut transactions = if self.exists() {
            self.read_all()?
        } else {
            Vec::new()
        };

        let tx = entry.into_transaction(next_id(&transactions), date);
        transactions.push(tx.clone());

        self.write_all(&transactions).map_err(|e| {
            Error::Persistence(format!(
                "Error saving transaction to {}: {}",
                self.path.display(),
                e
            ))
        })?;

        info!(id = tx.id, category = %tx.category, "Transaction appended");
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, sample_transactions};
    use tempfile::TempDir;

    fn entry(description: Option<&str>) -> NewTransaction {
        NewTransaction {
            amount: -12.5,
            category: "Food & Drink".to_string(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_file_is_missing_data() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));

        assert!(!store.exists());
        assert!(matches!(store.list(), Err(Error::MissingData(_))));
    }

    #[test]
    fn test_append_creates_file_and_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("transactions.json");
        let store = JsonFileStore::new(&path);
        assert_eq!(store.path(), path.as_path());

        let tx = store
            .append_dated(entry(None), date(2024, 6, 1))
            .unwrap();
        assert_eq!(tx.id, 1);
        assert_eq!(tx.merchant, "Manual Entry");
        assert!(path.exists());

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![tx]);
    }

    #[test]
    fn test_append_preserves_order_and_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        fs::write(&path, serde_json::to_string(&sample_transactions()).unwrap()).unwrap();

        let store = JsonFileStore::new(&path);
        let before = store.list().unwrap();
        let tx = store
            .append_dated(entry(Some("Blue Bottle")), date(2024, 6, 15))
            .unwrap();

        assert_eq!(tx.id, next_id(&before));
        let after = store.list().unwrap();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last().unwrap().merchant, "Blue Bottle");
    }

    #[test]
    fn test_written_file_uses_wire_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        let store = JsonFileStore::new(&path);
        store.append_dated(entry(None), date(2024, 2, 29)).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[0]["date"], "2024-02-29");
        assert_eq!(raw[0]["id"], 1);
        assert_eq!(raw[0]["amount"], -12.5);
    }

    #[test]
    fn test_corrupt_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.list(), Err(Error::Json(_))));
        assert!(matches!(
            store.append_dated(entry(None), date(2024, 1, 1)),
            Err(Error::Json(_))
        ));
    }
}
