//! Recurring subscription detection
//!
//! A merchant that shows up in at least three distinct calendar months, with
//! at least three charges overall, is treated as a subscription. Requiring
//! both keeps a single busy day and a short burst of charges from qualifying.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{round_to, Transaction};

use super::types::SubscriptionCandidate;

/// Minimum distinct calendar months a merchant must appear in
pub const MIN_SUBSCRIPTION_MONTHS: usize = 3;

/// Minimum number of charges from a merchant
pub const MIN_SUBSCRIPTION_OCCURRENCES: usize = 3;

/// Scan the full history for merchants with a monthly recurring pattern
///
/// Results are ordered by merchant name.
pub fn detect_subscriptions(transactions: &[Transaction]) -> Vec<SubscriptionCandidate> {
    let mut by_merchant: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        by_merchant.entry(tx.merchant.as_str()).or_default().push(tx);
    }

    by_merchant
        .into_iter()
        .filter_map(|(merchant, charges)| {
            let months: BTreeSet<_> = charges.iter().map(|tx| tx.month()).collect();
            if months.len() < MIN_SUBSCRIPTION_MONTHS
                || charges.len() < MIN_SUBSCRIPTION_OCCURRENCES
            {
                return None;
            }

            let total: f64 = charges.iter().map(|tx| tx.amount.abs()).sum();
            let avg_amount = round_to(total / charges.len() as f64, 2);

            tracing::debug!(
                merchant,
                months = months.len(),
                occurrences = charges.len(),
                "Subscription candidate"
            );

            Some(SubscriptionCandidate {
                merchant: merchant.to_string(),
                avg_amount,
                occurrences: charges.len(),
            })
        })
        .collect()
}
