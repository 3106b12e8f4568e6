//! Month-over-month trend narratives
//!
//! Compares each category's trailing 30-day spend with the 30 days before
//! it and turns the biggest movers into short sentences with advice.

use std::collections::BTreeSet;

use crate::models::round_to;

use super::types::{TrendDirection, TrendInsight, WindowTotals};

/// Percent change reported when spend appears in a category that had none
const NEW_SPEND_PERCENT: f64 = 100.0;

/// Category-specific advice for spending increases
fn increase_advice(category: &str) -> String {
    let advice = match category {
        "Food & Drink" => "Plan a few low-cost home meals to offset restaurant splurges.",
        "Shopping" => "Delay non-essential shopping carts to keep cash flow stable.",
        "Entertainment" => "Bundle streaming services or swap for free activities this month.",
        "Transport" => "Consider ride-sharing or public transit to soften this uptick.",
        "Travel" => "Lock in budgets before booking and watch for fare drops.",
        "Groceries" => "Create a list before shopping to avoid impulse buys.",
        _ => return format!("Look for easy ways to trim {} costs next month.", category),
    };
    advice.to_string()
}

/// Percent change from `previous` to `current`
///
/// A zero baseline reports a full increase when spend appeared, else zero.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            NEW_SPEND_PERCENT
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

fn narrate(category: &str, current: f64, previous: f64) -> TrendInsight {
    let change = percent_change(current, previous);
    let direction = TrendDirection::from_percent(change);

    let (advice, sentence) = match direction {
        TrendDirection::Increase => (
            increase_advice(category),
            format!(
                "Spending on {} increased {:.1}% compared to the prior 30 days.",
                category,
                change.abs()
            ),
        ),
        TrendDirection::Decrease => (
            format!(
                "Great job lowering {}! Redirect the savings to your goals.",
                category
            ),
            format!(
                "Spending on {} decreased {:.1}% from the previous period.",
                category,
                change.abs()
            ),
        ),
        TrendDirection::Flat => (
            format!("{} spending stayed steady - keep monitoring it.", category),
            format!(
                "Spending on {} stayed roughly the same as the previous month.",
                category
            ),
        ),
    };

    TrendInsight {
        category: category.to_string(),
        current_total: round_to(current, 2),
        previous_total: round_to(previous, 2),
        percent_change: round_to(change, 1),
        direction,
        advice,
        sentence,
    }
}

/// Rank categories by how much their spend moved between the two windows
///
/// Keeps at most `limit` entries, largest absolute percent change first.
/// Ties keep alphabetical category order.
pub fn trend_insights(totals: &WindowTotals, limit: usize) -> Vec<TrendInsight> {
    let categories: BTreeSet<&String> = totals.recent.keys().chain(totals.prior.keys()).collect();

    let mut rows: Vec<TrendInsight> = categories
        .into_iter()
        .filter_map(|category| {
            let current = totals.recent.get(category).copied().unwrap_or(0.0);
            let previous = totals.prior.get(category).copied().unwrap_or(0.0);
            if current == 0.0 && previous == 0.0 {
                return None;
            }
            Some(narrate(category, current, previous))
        })
        .collect();

    rows.sort_by(|a, b| {
        b.percent_change
            .abs()
            .partial_cmp(&a.percent_change.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows.truncate(limit);
    rows
}
