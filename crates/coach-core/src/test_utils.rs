//! Test utilities for coach-core
//!
//! Fixture builders for transaction batches and a mock chat-completions
//! server for exercising the OpenAI advisor without network access.

use axum::{http::StatusCode, routing::post, Json, Router};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::sync::oneshot;

use crate::models::Transaction;

/// Fixed "today" used by fixture-based tests
pub fn reference_date() -> NaiveDate {
    date(2024, 6, 15)
}

/// The date `days` days before [`reference_date`]
pub fn days_ago(days: i64) -> NaiveDate {
    reference_date() - Duration::days(days)
}

/// Build a date, panicking on an invalid one
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Build a transaction
pub fn tx(id: i64, date: NaiveDate, merchant: &str, category: &str, amount: f64) -> Transaction {
    Transaction {
        id,
        date,
        merchant: merchant.to_string(),
        category: category.to_string(),
        amount,
    }
}

/// Five months of household activity ending at [`reference_date`]
///
/// Contains a monthly Netflix charge, a salary, rent, and enough recent
/// Food & Drink spend to earn the coffee tip.
pub fn sample_transactions() -> Vec<Transaction> {
    let mut txs = Vec::new();
    let mut id = 0;
    let mut push = |date: NaiveDate, merchant: &str, category: &str, amount: f64| {
        id += 1;
        txs.push(tx(id, date, merchant, category, amount));
    };

    for month in 2..=6 {
        push(date(2024, month, 1), "Acme Corp", "Income", 3200.0);
        push(date(2024, month, 1), "Oakwood Apartments", "Rent", -1400.0);
        push(date(2024, month, 5), "Netflix", "Entertainment", -15.49);
    }

    // Prior window
    push(days_ago(35), "Whole Foods", "Groceries", -120.0);
    push(days_ago(40), "Blue Bottle", "Food & Drink", -60.0);
    push(days_ago(48), "Uber", "Transport", -24.5);

    // Recent window
    push(days_ago(2), "Chipotle", "Food & Drink", -45.2);
    push(days_ago(5), "Whole Foods", "Groceries", -85.3);
    push(days_ago(9), "Blue Bottle", "Food & Drink", -38.75);
    push(days_ago(12), "Amazon", "Shopping", -64.99);
    push(days_ago(20), "Sweetgreen", "Food & Drink", -32.1);
    push(days_ago(22), "Uber", "Transport", -18.0);

    txs
}

/// Mock OpenAI-compatible chat-completions server
pub struct MockChatServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockChatServer {
    /// Reply text returned by a healthy server
    pub const REPLY: &'static str =
        "Set aside $300 each month and cap dining out at $150 to stay on track.";

    /// Start a server that answers every completion
    pub async fn start() -> Self {
        Self::spawn(Router::new().route("/chat/completions", post(handle_completion))).await
    }

    /// Start a server whose completions always return 500
    pub async fn start_failing() -> Self {
        Self::spawn(Router::new().route("/chat/completions", post(handle_failure))).await
    }

    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Base URL to pass as the advisor's base URL
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockChatServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Value>,
}

async fn handle_completion(Json(request): Json<CompletionRequest>) -> Json<Value> {
    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": request.model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": MockChatServer::REPLY},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": request.messages.len(), "completion_tokens": 16}
    }))
}

async fn handle_failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": {"message": "mock provider outage"}})),
    )
}
