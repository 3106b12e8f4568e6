//! Mock advisor for testing
//!
//! Deterministic, offline, and configurable to exercise every fallback path.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::forecast::GoalForecast;

use super::{format_currency, Advisor, SpendingSnapshot};

/// Mock advisor backend
#[derive(Clone, Default)]
pub struct MockAdvisor {
    /// Whether `configured()` reports true
    pub configured: bool,
    /// Fail every call with a provider error
    pub fail: bool,
    /// Fixed reply; a templated reply is built when unset
    pub response: Option<String>,
}

impl MockAdvisor {
    /// Create a configured mock that answers every request
    pub fn new() -> Self {
        Self {
            configured: true,
            fail: false,
            response: None,
        }
    }

    /// Create a mock that reports itself unconfigured
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Create a configured mock whose calls always fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Create a configured mock with a fixed reply
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            ..Self::new()
        }
    }
}

#[async_trait]
impl Advisor for MockAdvisor {
    fn configured(&self) -> bool {
        self.configured
    }

    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock"
    }

    async fn recommend(
        &self,
        goal_amount: f64,
        target_date: NaiveDate,
        forecast: &GoalForecast,
        top_spending: &[SpendingSnapshot],
    ) -> Result<String> {
        if !self.configured {
            return Err(Error::AdvisorUnavailable(
                "mock advisor is not configured".to_string(),
            ));
        }
        if self.fail {
            return Err(Error::AdvisorProvider("mock provider failure".to_string()));
        }
        if let Some(ref response) = self.response {
            return Ok(response.clone());
        }

        let focus = top_spending
            .first()
            .map(|s| s.category.as_str())
            .unwrap_or("your largest category");

        Ok(format!(
            "Aim to reach ${} by {} in about {} months. Start by trimming {}.",
            format_currency(goal_amount),
            target_date,
            forecast.projected_months_needed,
            focus
        ))
    }
}
