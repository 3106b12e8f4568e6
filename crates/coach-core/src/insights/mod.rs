//! Insight Engine - spending analytics over a transaction batch
//!
//! Every analysis is a pure function of the transactions and a reference
//! date, so concurrent callers never observe each other.
//!
//! ## Analyses
//!
//! - **Category spend** - absolute net spend per category, trailing 30 days
//! - **Subscriptions** - merchants charging in 3+ distinct months
//! - **Anomalies** - categories with a monthly z-score spike
//! - **Trends** - top movers between the last two 30-day windows
//! - **Tips** - short nudges derived from recent spend
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coach_core::insights::compute_insights;
//!
//! let today = chrono::Local::now().date_naive();
//! let report = compute_insights(&transactions, today);
//! ```

pub mod anomalies;
pub mod engine;
pub mod spending;
pub mod subscriptions;
pub mod trends;
pub mod types;

pub use anomalies::{detect_anomalies, ZERO_STDDEV_SUBSTITUTE};
pub use engine::{
    compute_insights, compute_insights_with_config, InsightConfig, ANOMALY_LOOKBACK_DAYS,
    ANOMALY_Z_THRESHOLD, FOOD_TIP_THRESHOLD, MAX_TREND_INSIGHTS,
};
pub use spending::{category_spend, spending_tips, window_totals, WINDOW_DAYS};
pub use subscriptions::{
    detect_subscriptions, MIN_SUBSCRIPTION_MONTHS, MIN_SUBSCRIPTION_OCCURRENCES,
};
pub use trends::{percent_change, trend_insights};
pub use types::{
    Anomaly, CategorySpend, InsightReport, SubscriptionCandidate, TrendDirection, TrendInsight,
    WindowTotals,
};
