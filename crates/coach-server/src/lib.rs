//! Coach Web Server
//!
//! Axum-based REST API for the Coach personal finance helper.
//!
//! Every request reloads the transaction batch from the store, so edits to
//! the data file show up without a restart.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use coach_core::{Advisor, AdvisorClient, TransactionStore};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = any origin)
    pub allowed_origins: Vec<String>,
    /// Fixed analysis date; the local date is used when unset
    pub today: Option<NaiveDate>,
}

impl ServerConfig {
    /// Read configuration from the environment
    ///
    /// `COACH_ALLOWED_ORIGINS` is a comma-separated origin list.
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("COACH_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            allowed_origins,
            today: None,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn TransactionStore>,
    pub advisor: AdvisorClient,
    pub config: ServerConfig,
}

impl AppState {
    /// Date that anchors the trailing windows
    pub fn today(&self) -> NaiveDate {
        self.config
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Create the application router with the advisor taken from the environment
pub fn create_router(store: Arc<dyn TransactionStore>, config: ServerConfig) -> Router {
    let advisor = AdvisorClient::from_env();
    if advisor.configured() {
        info!(
            "Advisor configured: {} (model: {})",
            advisor.provider(),
            advisor.model()
        );
    } else {
        info!("Advisor not configured (set OPENAI_API_KEY for AI goal recommendations)");
    }

    create_router_with_state(AppState {
        store,
        advisor,
        config,
    })
}

/// Create the application router from prepared state (for testing)
pub fn create_router_with_state(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    let state = Arc::new(state);

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::add_transaction),
        )
        .route("/insights", get(handlers::get_insights))
        .route("/forecast", get(handlers::get_forecast))
        .route("/goal", post(handlers::set_goal));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Start the server
pub async fn serve(
    store: Arc<dyn TransactionStore>,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if config.allowed_origins.is_empty() {
        warn!("CORS allows any origin (set COACH_ALLOWED_ORIGINS to restrict)");
    }

    let app = create_router(store, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
