//! Coach Core Library
//!
//! Shared functionality for the Coach personal finance helper:
//! - Transaction model and JSON wire shape
//! - Insight engine (category spend, subscriptions, anomalies, trends, tips)
//! - Savings-goal forecast
//! - Goal recommendation composition with a pluggable advisor
//! - Transaction storage behind a swappable trait

pub mod advisor;
pub mod error;
pub mod forecast;
pub mod goals;
pub mod insights;
pub mod models;
pub mod store;

/// Test utilities including a mock chat-completions server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advisor::{
    top_spending_snapshots, Advisor, AdvisorClient, MockAdvisor, OpenAiAdvisor, SpendingSnapshot,
};
pub use error::{Error, Result};
pub use forecast::{compute_forecast, months_needed, GoalForecast};
pub use goals::{plan_goal, AdvisorStatus, Goal, GoalPlan};
pub use insights::{compute_insights, compute_insights_with_config, InsightConfig, InsightReport};
pub use models::{NewTransaction, Transaction};
pub use store::{JsonFileStore, MemoryStore, TransactionStore};
