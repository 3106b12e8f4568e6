//! Savings-goal forecast
//!
//! Estimates how many months a goal takes from the average monthly surplus.
//! This is a single-number model: the mean of each calendar
//! month's signed net, with no trend or confidence interval.
//!
//! The monthly net keeps the sign convention (income positive, expenses
//! negative). Data that stores expenses as positive magnitudes inflates the
//! surplus and silently shortens the forecast.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{MonthKey, Transaction};

/// Goal amount used when the caller does not provide one
pub const DEFAULT_GOAL_AMOUNT: f64 = 3000.0;

/// Forecast horizon used when the caller does not provide one
pub const DEFAULT_FORECAST_MONTHS: u32 = 10;

/// Divisor used in place of a non-positive average surplus.
///
/// Keeps the forecast finite and positive; a household that never saves is
/// reported as reaching the goal at the horizon cap.
pub const NON_POSITIVE_SURPLUS_SUBSTITUTE: f64 = 1.0;

/// Projected time to reach a savings goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalForecast {
    /// Months needed, capped at the requested horizon
    pub projected_months_needed: i64,
    /// Raw average monthly net (may be zero or negative)
    pub monthly_surplus_estimate: f64,
}

impl GoalForecast {
    /// Forecast reported when there is no transaction data at all
    pub fn zeroed() -> Self {
        Self {
            projected_months_needed: 0,
            monthly_surplus_estimate: 0.0,
        }
    }
}

/// Signed net per calendar month over the whole history
pub fn monthly_net(transactions: &[Transaction]) -> BTreeMap<MonthKey, f64> {
    let mut months = BTreeMap::new();
    for tx in transactions {
        *months.entry(tx.month()).or_insert(0.0) += tx.amount;
    }
    months
}

/// Average monthly surplus, zero when there are no months
pub fn average_monthly_surplus(transactions: &[Transaction]) -> f64 {
    let months = monthly_net(transactions);
    if months.is_empty() {
        return 0.0;
    }
    months.values().sum::<f64>() / months.len() as f64
}

/// Months needed to save `goal_amount` at `avg_surplus`, without a horizon cap
pub fn months_needed(goal_amount: f64, avg_surplus: f64) -> i64 {
    let effective = if avg_surplus > 0.0 {
        avg_surplus
    } else {
        NON_POSITIVE_SURPLUS_SUBSTITUTE
    };

    // `as` saturates on overflow and maps NaN to 0
    (goal_amount / effective).ceil() as i64
}

/// Forecast months needed to save `goal_amount`, capped at `months`
pub fn compute_forecast(
    transactions: &[Transaction],
    goal_amount: f64,
    months: u32,
) -> GoalForecast {
    let avg_surplus = average_monthly_surplus(transactions);
    let projected = months_needed(goal_amount, avg_surplus).clamp(0, i64::from(months));

    tracing::debug!(
        goal_amount,
        horizon = months,
        avg_surplus,
        projected,
        "Goal forecast computed"
    );

    GoalForecast {
        projected_months_needed: projected,
        monthly_surplus_estimate: avg_surplus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, tx};

    fn three_months_of(net: f64) -> Vec<Transaction> {
        (1..=3)
            .flat_map(|month| {
                vec![
                    tx(month as i64 * 2, date(2024, month, 1), "Employer", "Income", 2000.0),
                    tx(
                        month as i64 * 2 + 1,
                        date(2024, month, 3),
                        "Landlord",
                        "Rent",
                        net - 2000.0,
                    ),
                ]
            })
            .collect()
    }

    #[test]
    fn test_steady_surplus() {
        let forecast = compute_forecast(&three_months_of(500.0), 3000.0, 10);
        assert_eq!(forecast.monthly_surplus_estimate, 500.0);
        assert_eq!(forecast.projected_months_needed, 6);
    }

    #[test]
    fn test_capped_at_horizon() {
        let forecast = compute_forecast(&three_months_of(100.0), 3000.0, 12);
        assert_eq!(forecast.projected_months_needed, 12);
        assert_eq!(forecast.monthly_surplus_estimate, 100.0);
    }

    #[test]
    fn test_exact_fit_at_horizon_is_not_capped() {
        assert_eq!(months_needed(3000.0, 300.0), 10);
        assert_eq!(months_needed(3000.0, 299.0), 11);

        let forecast = compute_forecast(&three_months_of(300.0), 3000.0, 10);
        assert_eq!(forecast.projected_months_needed, 10);
    }

    #[test]
    fn test_rounds_up_partial_month() {
        let forecast = compute_forecast(&three_months_of(700.0), 3000.0, 10);
        assert_eq!(forecast.projected_months_needed, 5);
    }

    #[test]
    fn test_negative_surplus_uses_substitute() {
        let forecast = compute_forecast(&three_months_of(-250.0), 5.0, 10);
        assert_eq!(forecast.monthly_surplus_estimate, -250.0);
        assert_eq!(forecast.projected_months_needed, 5);
    }

    #[test]
    fn test_empty_history() {
        let forecast = compute_forecast(&[], DEFAULT_GOAL_AMOUNT, DEFAULT_FORECAST_MONTHS);
        assert_eq!(forecast.monthly_surplus_estimate, 0.0);
        assert_eq!(forecast.projected_months_needed, 10);
    }

    #[test]
    fn test_never_negative() {
        let forecast = compute_forecast(&three_months_of(500.0), -3000.0, 10);
        assert_eq!(forecast.projected_months_needed, 0);

        let zero_horizon = compute_forecast(&three_months_of(500.0), 3000.0, 0);
        assert_eq!(zero_horizon.projected_months_needed, 0);
    }

    #[test]
    fn test_positive_expense_producers_inflate_surplus() {
        // Expenses stored as positive magnitudes read as income here.
        let txs = vec![
            tx(1, date(2024, 1, 1), "Employer", "Income", 2000.0),
            tx(2, date(2024, 1, 2), "Landlord", "Rent", 1500.0),
        ];

        let forecast = compute_forecast(&txs, 3000.0, 10);
        assert_eq!(forecast.monthly_surplus_estimate, 3500.0);
        assert_eq!(forecast.projected_months_needed, 1);
    }

    #[test]
    fn test_months_average_over_distinct_months_only() {
        let txs = vec![
            tx(1, date(2024, 1, 1), "Employer", "Income", 600.0),
            tx(2, date(2024, 4, 1), "Employer", "Income", 400.0),
        ];

        assert_eq!(average_monthly_surplus(&txs), 500.0);
        assert_eq!(monthly_net(&txs).len(), 2);
    }
}
