//! Savings-goal planning
//!
//! Combines the goal forecast with a recommendation. A deterministic
//! recommendation is always computed; the advisor may replace it with a
//! friendlier one. Advisor failures are reported in [`AdvisorStatus`] and
//! never fail the plan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::advisor::{top_spending_snapshots, Advisor, TOP_SPENDING_LIMIT};
use crate::error::{Error, Result};
use crate::forecast::{compute_forecast, GoalForecast};
use crate::insights::category_spend;
use crate::models::Transaction;

/// Horizon used for the forecast attached to a goal plan
pub const GOAL_PLAN_FORECAST_MONTHS: u32 = 12;

/// Days counted as one month when spreading the remaining amount
const DAYS_PER_MONTH: i64 = 30;

/// A savings goal requested by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub goal_amount: f64,
    pub target_date: NaiveDate,
}

impl Goal {
    /// Reject goals whose amount is not a finite number
    pub fn validate(&self) -> Result<()> {
        if !self.goal_amount.is_finite() {
            return Err(Error::InvalidData(
                "goal_amount must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of consulting the advisor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorStatus {
    /// Whether the recommendation came from the advisor
    pub used: bool,
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Why the fallback was used, when it was
    pub error: Option<String>,
}

/// Forecast plus recommendation for a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPlan {
    pub goal: Goal,
    pub forecast: GoalForecast,
    pub recommendation: String,
    pub ai: AdvisorStatus,
}

/// Whole months between `today` and `target_date`, never less than one
///
/// Uses floor division, so past target dates also land on one month.
pub fn months_left(today: NaiveDate, target_date: NaiveDate) -> i64 {
    let days = (target_date - today).num_days();
    days.div_euclid(DAYS_PER_MONTH).max(1)
}

/// Monthly amount needed to close the gap between the balance and the goal
pub fn monthly_target(transactions: &[Transaction], goal: &Goal, today: NaiveDate) -> f64 {
    let current_balance: f64 = transactions.iter().map(|tx| tx.amount).sum();
    let remaining = goal.goal_amount - current_balance;
    remaining / months_left(today, goal.target_date) as f64
}

/// Deterministic recommendation used whenever the advisor is not
pub fn fallback_recommendation(
    transactions: &[Transaction],
    goal: &Goal,
    today: NaiveDate,
) -> String {
    format!(
        "You need to save about ${:.2} per month to reach ${:.2} by {}. \
         Consider trimming spending in your top category to stay on track.",
        monthly_target(transactions, goal, today),
        goal.goal_amount,
        goal.target_date
    )
}

/// Build a goal plan, consulting the advisor at most once
pub async fn plan_goal<A>(
    transactions: &[Transaction],
    goal: &Goal,
    today: NaiveDate,
    advisor: &A,
) -> GoalPlan
where
    A: Advisor + ?Sized,
{
    let forecast = compute_forecast(transactions, goal.goal_amount, GOAL_PLAN_FORECAST_MONTHS);
    let fallback = fallback_recommendation(transactions, goal, today);

    let mut status = AdvisorStatus {
        used: false,
        provider: Some(advisor.provider().to_string()),
        model: Some(advisor.model().to_string()),
        error: None,
    };

    if !advisor.configured() {
        status.error = Some("Advisor is not configured".to_string());
        return GoalPlan {
            goal: goal.clone(),
            forecast,
            recommendation: fallback,
            ai: status,
        };
    }

    let top_spending =
        top_spending_snapshots(&category_spend(transactions, today), TOP_SPENDING_LIMIT);

    let recommendation = match advisor
        .recommend(goal.goal_amount, goal.target_date, &forecast, &top_spending)
        .await
    {
        Ok(text) => {
            info!(provider = advisor.provider(), "Advisor recommendation generated");
            status.used = true;
            text
        }
        Err(e) => {
            warn!(error = %e, "Advisor failed, using fallback recommendation");
            status.error = Some(e.to_string());
            fallback
        }
    };

    GoalPlan {
        goal: goal.clone(),
        forecast,
        recommendation,
        ai: status,
    }
}
