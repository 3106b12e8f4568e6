//! Category spend over trailing windows

use chrono::{Duration, NaiveDate};

use crate::models::Transaction;

use super::types::{CategorySpend, WindowTotals};

/// Length of the trailing "recent" window and of the prior comparison window
pub const WINDOW_DAYS: i64 = 30;

/// Category that earns the coffee tip
const FOOD_AND_DRINK: &str = "Food & Drink";

/// Sum signed amounts per category, then make each sum non-negative.
///
/// The absolute value is taken on the net, not per transaction, so a refund
/// offsets a purchase in the same category.
fn net_by_category<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> CategorySpend {
    let mut sums = CategorySpend::new();
    for tx in transactions {
        *sums.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
    }
    for total in sums.values_mut() {
        *total = total.abs();
    }
    sums
}

/// Category totals for `[today-30d, today]` and `[today-60d, today-30d)`
pub fn window_totals(transactions: &[Transaction], today: NaiveDate) -> WindowTotals {
    let recent_start = today - Duration::days(WINDOW_DAYS);
    let prior_start = today - Duration::days(2 * WINDOW_DAYS);

    let recent = net_by_category(
        transactions
            .iter()
            .filter(|tx| tx.date >= recent_start && tx.date <= today),
    );
    let prior = net_by_category(
        transactions
            .iter()
            .filter(|tx| tx.date >= prior_start && tx.date < recent_start),
    );

    WindowTotals { recent, prior }
}

/// Absolute net spend per category over the trailing 30 days
pub fn category_spend(transactions: &[Transaction], today: NaiveDate) -> CategorySpend {
    window_totals(transactions, today).recent
}

/// Friendly nudges derived from recent spend
pub fn spending_tips(recent: &CategorySpend, food_threshold: f64) -> Vec<String> {
    let mut tips = Vec::new();

    if let Some(&food) = recent.get(FOOD_AND_DRINK) {
        if food > food_threshold {
            tips.push(format!(
                "You've spent ${} on {} in the last 30 days. Brewing at home could save money.",
                food.trunc() as i64,
                FOOD_AND_DRINK
            ));
        }
    }

    tips
}
