//! Shared command utilities

use std::path::Path;

use anyhow::{Context, Result};
use coach_core::{Error, JsonFileStore, Transaction, TransactionStore};

/// Open the JSON transaction store at `data_path`
pub fn open_store(data_path: &Path) -> JsonFileStore {
    tracing::debug!(path = %data_path.display(), "Opening transaction store");
    JsonFileStore::new(data_path)
}

/// Load all transactions, `None` when the data file does not exist yet
pub fn load_transactions(store: &dyn TransactionStore) -> Result<Option<Vec<Transaction>>> {
    match store.list() {
        Ok(transactions) => Ok(Some(transactions)),
        Err(Error::MissingData(_)) => Ok(None),
        Err(e) => Err(e).context("Failed to load transactions"),
    }
}

/// Point the user at `coach add` when there is nothing to show
pub fn print_no_data_hint() {
    println!("No transactions found. Add one with:");
    println!("  coach add --amount -12.50 --category \"Food & Drink\"");
}
