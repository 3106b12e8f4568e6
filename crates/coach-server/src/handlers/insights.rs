//! Insight and forecast handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use coach_core::forecast::{DEFAULT_FORECAST_MONTHS, DEFAULT_GOAL_AMOUNT};
use coach_core::{compute_forecast, compute_insights, GoalForecast, InsightReport};

use super::load_transactions;
use crate::{AppError, AppState};

/// Response wrapping the insight report
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub insights: InsightReport,
}

/// Query parameters for the goal forecast
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    #[serde(default = "default_goal_amount")]
    pub goal_amount: f64,
    #[serde(default = "default_months")]
    pub months: u32,
}

fn default_goal_amount() -> f64 {
    DEFAULT_GOAL_AMOUNT
}

fn default_months() -> u32 {
    DEFAULT_FORECAST_MONTHS
}

/// GET /api/insights - Dashboard insights, an empty report when there is no data
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InsightsResponse>, AppError> {
    let insights = match load_transactions(&state)? {
        Some(transactions) => compute_insights(&transactions, state.today()),
        None => InsightReport::default(),
    };

    Ok(Json(InsightsResponse { insights }))
}

/// GET /api/forecast - Months needed to reach a goal
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<GoalForecast>, AppError> {
    if !params.goal_amount.is_finite() {
        return Err(AppError::bad_request("goal_amount must be a finite number"));
    }

    let forecast = match load_transactions(&state)? {
        Some(transactions) => compute_forecast(&transactions, params.goal_amount, params.months),
        None => GoalForecast::zeroed(),
    };

    Ok(Json(forecast))
}
