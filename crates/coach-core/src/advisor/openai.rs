//! OpenAI chat-completions advisor
//!
//! Works with the hosted OpenAI API or any server implementing
//! `POST {base_url}/chat/completions`.
//!
//! Calls are bounded by [`ADVISOR_TIMEOUT`] and never retried; a failed call
//! is reported once and the caller falls back.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::forecast::GoalForecast;

use super::{goal_prompt, Advisor, SpendingSnapshot};

/// Upper bound on a single advisor call
pub const ADVISOR_TIMEOUT: Duration = Duration::from_secs(20);

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_PROVIDER: &str = "openai";
const SYSTEM_PROMPT: &str = "You are SmartCoach, an expert personal finance assistant.";
const TEMPERATURE: f32 = 0.35;

/// OpenAI-compatible advisor backend
#[derive(Clone)]
pub struct OpenAiAdvisor {
    http_client: Client,
    chat_url: String,
    model: String,
    api_key: Option<String>,
    provider: String,
}

impl OpenAiAdvisor {
    /// Create an advisor without an API key (unconfigured)
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            chat_url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.to_string(),
            api_key: None,
            provider: DEFAULT_PROVIDER.to_string(),
        }
    }

    /// Create with an API key
    pub fn with_api_key(base_url: &str, model: &str, api_key: &str) -> Self {
        let mut advisor = Self::new(base_url, model);
        advisor.api_key = Some(api_key.to_string());
        advisor
    }

    /// Override the provider label
    pub fn with_provider(mut self, provider: &str) -> Self {
        self.provider = provider.to_string();
        self
    }

    /// Create from environment variables
    ///
    /// Optional: `OPENAI_API_KEY` (unconfigured without it)
    /// Optional: `OPENAI_MODEL` (default: gpt-4o-mini)
    /// Optional: `OPENAI_BASE_URL` (default: https://api.openai.com/v1)
    /// Optional: `OPENAI_PROVIDER_NAME` (default: openai)
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let provider =
            std::env::var("OPENAI_PROVIDER_NAME").unwrap_or_else(|_| DEFAULT_PROVIDER.to_string());
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let mut advisor = Self::new(&base_url, &model).with_provider(&provider);
        advisor.api_key = api_key;
        advisor
    }

    /// Full chat-completions endpoint
    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    /// Make a chat completion request
    async fn chat_completion(&self, api_key: &str, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
        };

        let response = self
            .http_client
            .post(&self.chat_url)
            .bearer_auth(api_key)
            .timeout(ADVISOR_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Advisor request failed");
                Error::AdvisorProvider(format!("Unable to contact AI provider: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Advisor returned an error status");
            return Err(Error::AdvisorProvider(format!(
                "AI provider error {}: {}",
                status, body
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Unexpected advisor response");
            Error::AdvisorProvider("Malformed response from AI provider".to_string())
        })?;

        let message = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                Error::AdvisorProvider("Malformed response from AI provider".to_string())
            })?;

        Ok(message)
    }
}

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

/// Chat message
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

/// Chat completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

/// Chat response message
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl Advisor for OpenAiAdvisor {
    fn configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn provider(&self) -> &str {
        &self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn recommend(
        &self,
        goal_amount: f64,
        target_date: NaiveDate,
        forecast: &GoalForecast,
        top_spending: &[SpendingSnapshot],
    ) -> Result<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(Error::AdvisorUnavailable(
                "OPENAI_API_KEY is not configured".to_string(),
            ));
        };

        let prompt = goal_prompt(goal_amount, target_date, forecast, top_spending);
        debug!(model = %self.model, url = %self.chat_url, "Requesting goal recommendation");

        self.chat_completion(api_key, &prompt).await
    }
}
