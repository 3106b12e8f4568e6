//! Goal planning handler

use std::sync::Arc;

use axum::{extract::State, Json};

use coach_core::{plan_goal, Goal, GoalPlan};

use super::{load_transactions, reject_invalid};
use crate::{AppError, AppState};

/// POST /api/goal - Forecast plus recommendation for a savings goal
///
/// The advisor is consulted at most once; its failures fall back to the
/// computed recommendation and are reported under `ai`.
pub async fn set_goal(
    State(state): State<Arc<AppState>>,
    Json(goal): Json<Goal>,
) -> Result<Json<GoalPlan>, AppError> {
    reject_invalid(goal.validate())?;

    let Some(transactions) = load_transactions(&state)? else {
        return Err(AppError::bad_request("No transactions found"));
    };

    let plan = plan_goal(&transactions, &goal, state.today(), &state.advisor).await;
    Ok(Json(plan))
}
