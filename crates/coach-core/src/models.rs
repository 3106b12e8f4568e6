//! Data models for Coach

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Calendar month bucket as (year, month)
pub type MonthKey = (i32, u32);

/// A single transaction record
///
/// Wire shape: `{id, date: "YYYY-MM-DD", merchant, category, amount}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique within a batch, not globally
    pub id: i64,
    pub date: NaiveDate,
    pub merchant: String,
    pub category: String,
    /// Positive = income, negative = expense
    ///
    /// Some producers store expenses as positive magnitudes. Spend totals
    /// take absolute values so they tolerate this; the goal forecast does not.
    pub amount: f64,
}

impl Transaction {
    /// Calendar month this transaction falls in
    pub fn month(&self) -> MonthKey {
        (self.date.year(), self.date.month())
    }
}

/// A manually entered transaction before the store assigns id and date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    pub category: String,
    /// Becomes the merchant name; defaults to "Manual Entry"
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTransaction {
    /// Merchant name recorded for this entry
    pub fn merchant(&self) -> String {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(MANUAL_ENTRY_MERCHANT)
            .to_string()
    }

    /// Reject entries that cannot be stored meaningfully
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(Error::InvalidData(
                "Amount must be a finite number".to_string(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(Error::InvalidData("Category is required".to_string()));
        }
        Ok(())
    }

    /// Stamp with an id and date to produce a stored transaction
    pub fn into_transaction(self, id: i64, date: NaiveDate) -> Transaction {
        let merchant = self.merchant();
        Transaction {
            id,
            date,
            merchant,
            category: self.category,
            amount: self.amount,
        }
    }
}

/// Merchant name used when a manual entry has no description
pub const MANUAL_ENTRY_MERCHANT: &str = "Manual Entry";

/// Round to a fixed number of decimal places
///
/// Goes through the formatter so the exact binary value decides the rounding
/// direction; `4.255_f64` is stored just below the half cent and becomes 4.25.
pub(crate) fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
