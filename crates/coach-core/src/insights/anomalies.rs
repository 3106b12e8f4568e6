//! Spend anomaly detection
//!
//! Buckets recent spend per category by calendar month and flags categories
//! where some month sits more than `z_threshold` standard deviations above
//! the mean of the observed months.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::{MonthKey, Transaction};

use super::engine::InsightConfig;
use super::types::Anomaly;

/// Standard deviation used when monthly totals are perfectly flat.
///
/// Dampens rather than normalises: with flat spend every z-score is zero
/// anyway, this only avoids dividing by zero.
pub const ZERO_STDDEV_SUBSTITUTE: f64 = 1.0;

/// Months needed before a category has any variance to speak of
const MIN_MONTHS: usize = 2;

/// Population standard deviation
fn population_stddev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Flag categories with a spike month inside the lookback window
///
/// At most one anomaly is reported per category, ordered by category name.
pub fn detect_anomalies(
    transactions: &[Transaction],
    today: NaiveDate,
    config: &InsightConfig,
) -> Vec<Anomaly> {
    let start = today - Duration::days(config.anomaly_lookback_days);

    let mut by_category: BTreeMap<&str, BTreeMap<MonthKey, f64>> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.date >= start && tx.date <= today)
    {
        *by_category
            .entry(tx.category.as_str())
            .or_default()
            .entry(tx.month())
            .or_insert(0.0) += tx.amount;
    }

    let mut anomalies = Vec::new();

    for (category, months) in by_category {
        if months.len() < MIN_MONTHS {
            continue;
        }

        // Chronological order, so the last entry is the latest month
        let totals: Vec<f64> = months.values().map(|net| net.abs()).collect();
        let mean = totals.iter().sum::<f64>() / totals.len() as f64;
        let stddev = population_stddev(&totals, mean);
        let divisor = if stddev == 0.0 {
            ZERO_STDDEV_SUBSTITUTE
        } else {
            stddev
        };

        let spiked = totals
            .iter()
            .any(|total| (total - mean) / divisor > config.anomaly_z_threshold);

        if spiked {
            let latest_total = totals.last().copied().unwrap_or_default();
            tracing::debug!(
                category,
                months = totals.len(),
                latest_total,
                "Spending anomaly detected"
            );
            anomalies.push(Anomaly {
                category: category.to_string(),
                months: totals.len(),
                latest_total,
            });
        }
    }

    anomalies
}
