//! Transaction storage with pluggable backends
//!
//! # Architecture
//!
//! - `TransactionStore` trait defines list/append for any backend
//! - `JsonFileStore` keeps an ordered JSON array in a single file
//! - `MemoryStore` keeps transactions in process (tests, demos)
//!
//! The analytics engine only ever sees `&[Transaction]`, so a transactional
//! backend can replace these without touching it.

use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction};

mod json_file;

pub use json_file::JsonFileStore;

/// Storage backend for transactions
pub trait TransactionStore: Send + Sync {
    /// Human-readable backend name (for logging)
    fn name(&self) -> &str;

    /// All stored transactions in insertion order
    ///
    /// Returns `Error::MissingData` when the store has never been created.
    fn list(&self) -> Result<Vec<Transaction>>;

    /// Store a new transaction dated `date`, assigning its id
    ///
    /// Invalid entries are rejected with `Error::InvalidData`.
    fn append_dated(&self, entry: NewTransaction, date: NaiveDate) -> Result<Transaction>;

    /// Store a new transaction dated today
    fn append(&self, entry: NewTransaction) -> Result<Transaction> {
        self.append_dated(entry, chrono::Local::now().date_naive())
    }
}

/// Next id for a batch: one past the largest existing id
pub fn next_id(transactions: &[Transaction]) -> i64 {
    transactions.iter().map(|tx| tx.id).max().unwrap_or(0) + 1
}

/// In-memory transaction store
pub struct MemoryStore {
    transactions: RwLock<Option<Vec<Transaction>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_transactions(Vec::new())
    }

    /// Create a store seeded with transactions
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(Some(transactions)),
        }
    }

    /// Create a store with no data at all (as if the file never existed)
    pub fn missing() -> Self {
        Self {
            transactions: RwLock::new(None),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn list(&self) -> Result<Vec<Transaction>> {
        let guard = self
            .transactions
            .read()
            .map_err(|_| Error::Persistence("memory store lock poisoned".to_string()))?;
        guard
            .clone()
            .ok_or_else(|| Error::MissingData("memory store is empty".to_string()))
    }

    fn append_dated(&self, entry: NewTransaction, date: NaiveDate) -> Result<Transaction> {
        entry.validate()?;

        let mut guard = self
            .transactions
            .write()
            .map_err(|_| Error::Persistence("memory store lock poisoned".to_string()))?;
        let transactions = guard.get_or_insert_with(Vec::new);

        let tx = entry.into_transaction(next_id(transactions), date);
        transactions.push(tx.clone());
        Ok(tx)
    }
}
