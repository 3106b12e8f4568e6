//! Core types for the insight engine

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Category → absolute net spend within a window
pub type CategorySpend = BTreeMap<String, f64>;

/// Category sums for the trailing window and the window right before it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowTotals {
    /// `[today - 30d, today]`
    pub recent: CategorySpend,
    /// `[today - 60d, today - 30d)`
    pub prior: CategorySpend,
}

/// A merchant that charges on a recurring monthly pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionCandidate {
    pub merchant: String,
    /// Mean absolute charge, rounded to cents
    pub avg_amount: f64,
    pub occurrences: usize,
}

/// A category whose monthly spend spiked within the lookback window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub category: String,
    /// Distinct months with activity in the lookback window
    pub months: usize,
    /// Absolute spend in the chronologically latest month
    pub latest_total: f64,
}

/// Direction of a month-over-month change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increase,
    Decrease,
    Flat,
}

impl TrendDirection {
    /// Classify by the sign of a percent change
    pub fn from_percent(percent_change: f64) -> Self {
        if percent_change > 0.0 {
            TrendDirection::Increase
        } else if percent_change < 0.0 {
            TrendDirection::Decrease
        } else {
            TrendDirection::Flat
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increase => "increase",
            TrendDirection::Decrease => "decrease",
            TrendDirection::Flat => "flat",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Narrative comparison of one category across the two 30-day windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendInsight {
    pub category: String,
    pub current_total: f64,
    pub previous_total: f64,
    /// Rounded to one decimal place
    pub percent_change: f64,
    pub direction: TrendDirection,
    pub advice: String,
    pub sentence: String,
}

/// Everything the dashboard shows, derived from one transaction batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub category_spend_last_30d: CategorySpend,
    pub subscriptions: Vec<SubscriptionCandidate>,
    pub anomalies: Vec<Anomaly>,
    pub tips: Vec<String>,
    pub trend_insights: Vec<TrendInsight>,
}

impl InsightReport {
    /// True when no analysis produced any output
    pub fn is_empty(&self) -> bool {
        self.category_spend_last_30d.is_empty()
            && self.subscriptions.is_empty()
            && self.anomalies.is_empty()
            && self.tips.is_empty()
            && self.trend_insights.is_empty()
    }
}
