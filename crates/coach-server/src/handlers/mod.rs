//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod goals;
pub mod insights;
pub mod transactions;

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use coach_core::{Advisor, Error, Transaction};

use crate::{AppError, AppState};

// Re-export all handlers for use in router
pub use goals::*;
pub use insights::*;
pub use transactions::*;

/// Load the batch, treating a store that was never created as `None`
pub(crate) fn load_transactions(state: &AppState) -> Result<Option<Vec<Transaction>>, AppError> {
    match state.store.list() {
        Ok(transactions) => Ok(Some(transactions)),
        Err(Error::MissingData(source)) => {
            debug!(store = state.store.name(), %source, "No transaction data");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Map a validation failure to 400 with its message
pub(crate) fn reject_invalid(result: coach_core::Result<()>) -> Result<(), AppError> {
    match result {
        Ok(()) => Ok(()),
        Err(Error::InvalidData(message)) => Err(AppError::bad_request(&message)),
        Err(e) => Err(e.into()),
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub advisor_configured: bool,
}

/// GET /api/health - Liveness plus advisor configuration
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        advisor_configured: state.advisor.configured(),
    })
}
