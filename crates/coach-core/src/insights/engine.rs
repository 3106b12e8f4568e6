//! Insight engine - runs every analysis over one transaction batch

use chrono::NaiveDate;

use crate::models::Transaction;

use super::anomalies::detect_anomalies;
use super::spending::{spending_tips, window_totals};
use super::subscriptions::detect_subscriptions;
use super::trends::trend_insights;
use super::types::InsightReport;

/// Default anomaly lookback in days
pub const ANOMALY_LOOKBACK_DAYS: i64 = 90;

/// Default z-score above which a month is anomalous
pub const ANOMALY_Z_THRESHOLD: f64 = 2.0;

/// Default number of trend insights kept
pub const MAX_TREND_INSIGHTS: usize = 3;

/// Recent Food & Drink spend above this earns a tip by default
pub const FOOD_TIP_THRESHOLD: f64 = 100.0;

/// Insight thresholds
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// Days of history considered for anomaly detection
    pub anomaly_lookback_days: i64,
    /// A month is anomalous when its z-score exceeds this
    pub anomaly_z_threshold: f64,
    /// Number of trend insights kept, largest change first
    pub max_trend_insights: usize,
    /// Recent Food & Drink spend above this earns a tip
    pub food_tip_threshold: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            anomaly_lookback_days: ANOMALY_LOOKBACK_DAYS,
            anomaly_z_threshold: ANOMALY_Z_THRESHOLD,
            max_trend_insights: MAX_TREND_INSIGHTS,
            food_tip_threshold: FOOD_TIP_THRESHOLD,
        }
    }
}

/// Compute the full insight report with default thresholds
pub fn compute_insights(transactions: &[Transaction], today: NaiveDate) -> InsightReport {
    compute_insights_with_config(transactions, today, &InsightConfig::default())
}

/// Compute the full insight report
///
/// Pure over its input: nothing is cached and the batch is never mutated.
pub fn compute_insights_with_config(
    transactions: &[Transaction],
    today: NaiveDate,
    config: &InsightConfig,
) -> InsightReport {
    if transactions.is_empty() {
        return InsightReport::default();
    }

    let totals = window_totals(transactions, today);
    let subscriptions = detect_subscriptions(transactions);
    let anomalies = detect_anomalies(transactions, today, config);
    let tips = spending_tips(&totals.recent, config.food_tip_threshold);
    let trends = trend_insights(&totals, config.max_trend_insights);

    tracing::debug!(
        transactions = transactions.len(),
        categories = totals.recent.len(),
        subscriptions = subscriptions.len(),
        anomalies = anomalies.len(),
        trends = trends.len(),
        "Insight analysis complete"
    );

    InsightReport {
        category_spend_last_30d: totals.recent,
        subscriptions,
        anomalies,
        tips,
        trend_insights: trends,
    }
}
