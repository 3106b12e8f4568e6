//! Pluggable advisor for natural-language goal recommendations
//!
//! The analytics engine never depends on the advisor. Goal planning asks it
//! for a friendlier recommendation and falls back to a deterministic one when
//! it is unconfigured or fails.
//!
//! # Architecture
//!
//! - `Advisor` trait: the collaborator interface
//! - `AdvisorClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAiAdvisor`, `MockAdvisor`
//!
//! # Configuration
//!
//! Environment variables:
//! - `ADVISOR_BACKEND`: Backend to use (openai, mock). Default: openai
//! - `OPENAI_API_KEY`: API key; the advisor is unconfigured without it
//! - `OPENAI_MODEL`: Model name (default: gpt-4o-mini)
//! - `OPENAI_BASE_URL`: API base URL (default: https://api.openai.com/v1)
//! - `OPENAI_PROVIDER_NAME`: Provider label reported to clients (default: openai)

mod mock;
mod openai;

pub use mock::MockAdvisor;
pub use openai::{OpenAiAdvisor, ADVISOR_TIMEOUT};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::forecast::GoalForecast;
use crate::insights::CategorySpend;

/// Category-level spend used as prompt context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSnapshot {
    pub category: String,
    pub amount: f64,
}

/// Number of spending categories passed to the advisor
pub const TOP_SPENDING_LIMIT: usize = 3;

/// Largest non-zero categories, biggest first
pub fn top_spending_snapshots(totals: &CategorySpend, limit: usize) -> Vec<SpendingSnapshot> {
    let mut ordered: Vec<SpendingSnapshot> = totals
        .iter()
        .filter(|(_, amount)| **amount != 0.0)
        .map(|(category, amount)| SpendingSnapshot {
            category: category.clone(),
            amount: *amount,
        })
        .collect();

    ordered.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ordered.truncate(limit);
    ordered
}

/// Trait defining the advisor collaborator
///
/// Backends must be Send + Sync so the server can share them across requests.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Whether the backend has what it needs to make a call
    fn configured(&self) -> bool;

    /// Provider label (for status reporting)
    fn provider(&self) -> &str;

    /// Model name (for status reporting)
    fn model(&self) -> &str;

    /// Ask for a short coaching recommendation
    ///
    /// Fails with `AdvisorUnavailable` when not configured and
    /// `AdvisorProvider` when the call fails or the reply is unusable.
    async fn recommend(
        &self,
        goal_amount: f64,
        target_date: NaiveDate,
        forecast: &GoalForecast,
        top_spending: &[SpendingSnapshot],
    ) -> Result<String>;
}

/// Concrete advisor client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AdvisorClient {
    /// OpenAI chat-completions API (or any compatible server)
    OpenAi(OpenAiAdvisor),
    /// Mock backend for testing
    Mock(MockAdvisor),
}

impl AdvisorClient {
    /// Create an advisor from environment variables
    ///
    /// Checks `ADVISOR_BACKEND`:
    /// - `openai` (default): reads the `OPENAI_*` variables
    /// - `mock`: deterministic offline advisor
    pub fn from_env() -> Self {
        let backend = std::env::var("ADVISOR_BACKEND").unwrap_or_else(|_| "openai".to_string());

        match backend.to_lowercase().as_str() {
            "openai" | "openai_compatible" => AdvisorClient::OpenAi(OpenAiAdvisor::from_env()),
            "mock" => AdvisorClient::Mock(MockAdvisor::new()),
            _ => {
                tracing::warn!(backend = %backend, "Unknown ADVISOR_BACKEND, falling back to openai");
                AdvisorClient::OpenAi(OpenAiAdvisor::from_env())
            }
        }
    }

    /// Create a mock advisor for testing
    pub fn mock() -> Self {
        AdvisorClient::Mock(MockAdvisor::new())
    }
}

#[async_trait]
impl Advisor for AdvisorClient {
    fn configured(&self) -> bool {
        match self {
            AdvisorClient::OpenAi(b) => b.configured(),
            AdvisorClient::Mock(b) => b.configured(),
        }
    }

    fn provider(&self) -> &str {
        match self {
            AdvisorClient::OpenAi(b) => b.provider(),
            AdvisorClient::Mock(b) => b.provider(),
        }
    }

    fn model(&self) -> &str {
        match self {
            AdvisorClient::OpenAi(b) => b.model(),
            AdvisorClient::Mock(b) => b.model(),
        }
    }

    async fn recommend(
        &self,
        goal_amount: f64,
        target_date: NaiveDate,
        forecast: &GoalForecast,
        top_spending: &[SpendingSnapshot],
    ) -> Result<String> {
        match self {
            AdvisorClient::OpenAi(b) => {
                b.recommend(goal_amount, target_date, forecast, top_spending)
                    .await
            }
            AdvisorClient::Mock(b) => {
                b.recommend(goal_amount, target_date, forecast, top_spending)
                    .await
            }
        }
    }
}

/// Format a dollar amount with thousands separators and cents ("1,234.50")
pub fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, cents)
}

/// Build the user prompt sent to text-generation backends
pub fn goal_prompt(
    goal_amount: f64,
    target_date: NaiveDate,
    forecast: &GoalForecast,
    top_spending: &[SpendingSnapshot],
) -> String {
    let forecast_summary = serde_json::to_string(forecast).unwrap_or_default();

    let mut spending_lines: Vec<String> = top_spending
        .iter()
        .map(|snap| {
            format!(
                "- {}: ${} in the last 30 days",
                snap.category,
                format_currency(snap.amount)
            )
        })
        .collect();
    if spending_lines.is_empty() {
        spending_lines.push("- No recent spending recorded".to_string());
    }

    format!(
        "You are an empathetic yet practical financial coach. Craft 2-3 short sentences\n\
         with concrete actions for the user.\n\
         \n\
         Goal: Save ${} by {}.\n\
         Forecast snapshot: {}.\n\
         Top spending patterns:\n\
         {}\n\
         \n\
         Respond with a short paragraph focused on monthly actions, without any\n\
         markdown bullets.",
        format_currency(goal_amount),
        target_date,
        forecast_summary,
        spending_lines.join("\n")
    )
}
