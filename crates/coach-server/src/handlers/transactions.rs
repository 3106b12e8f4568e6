//! Transaction handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{error, info};

use coach_core::{NewTransaction, Transaction};

use super::{load_transactions, reject_invalid};
use crate::{AppError, AppState};

/// Response for listing transactions
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

/// Response for a newly added transaction
#[derive(Debug, Serialize)]
pub struct AddTransactionResponse {
    pub message: &'static str,
    pub transaction: Transaction,
}

/// GET /api/transactions - All stored transactions, `[]` when there is no data
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TransactionsResponse>, AppError> {
    let transactions = load_transactions(&state)?.unwrap_or_default();
    Ok(Json(TransactionsResponse { transactions }))
}

/// POST /api/transactions - Record a manual entry dated today
pub async fn add_transaction(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<NewTransaction>,
) -> Result<Json<AddTransactionResponse>, AppError> {
    reject_invalid(entry.validate())?;

    let transaction = state
        .store
        .append_dated(entry, state.today())
        .map_err(|e| {
            error!(error = %e, "Failed to persist transaction");
            AppError::internal(&format!("Error saving transaction: {}", e))
        })?;

    info!(id = transaction.id, "Manual transaction added");

    Ok(Json(AddTransactionResponse {
        message: "Transaction added successfully",
        transaction,
    }))
}
