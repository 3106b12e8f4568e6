//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use coach_core::test_utils::{reference_date, sample_transactions};
use coach_core::{
    Error as CoreError, JsonFileStore, MemoryStore, MockAdvisor, NewTransaction, Transaction,
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

fn test_config() -> ServerConfig {
    ServerConfig {
        today: Some(reference_date()),
        ..Default::default()
    }
}

fn app_with(store: Arc<dyn TransactionStore>, advisor: AdvisorClient) -> Router {
    create_router_with_state(AppState {
        store,
        advisor,
        config: test_config(),
    })
}

fn setup_test_app() -> Router {
    app_with(
        Arc::new(MemoryStore::with_transactions(sample_transactions())),
        AdvisorClient::mock(),
    )
}

fn setup_missing_data_app() -> Router {
    app_with(Arc::new(MemoryStore::missing()), AdvisorClient::mock())
}

/// Store whose writes always fail
struct ReadOnlyStore;

impl TransactionStore for ReadOnlyStore {
    fn name(&self) -> &str {
        "read-only"
    }

    fn list(&self) -> coach_core::Result<Vec<Transaction>> {
        Ok(Vec::new())
    }

    fn append_dated(
        &self,
        _entry: NewTransaction,
        _date: NaiveDate,
    ) -> coach_core::Result<Transaction> {
        Err(CoreError::Persistence("disk full".to_string()))
    }
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let response = setup_test_app().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["advisor_configured"], true);
}

// ========== Transaction API Tests ==========

#[tokio::test]
async fn test_list_transactions() {
    let response = setup_test_app()
        .oneshot(get("/api/transactions"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let transactions = json["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), sample_transactions().len());
    assert_eq!(transactions[0]["date"], "2024-02-01");
}

#[tokio::test]
async fn test_list_transactions_missing_data() {
    let response = setup_missing_data_app()
        .oneshot(get("/api/transactions"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["transactions"], serde_json::json!([]));
}

#[tokio::test]
async fn test_add_transaction_persists_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transactions.json");
    let store = Arc::new(JsonFileStore::new(&path));
    let app = app_with(store.clone(), AdvisorClient::mock());

    let response = app
        .oneshot(post_json(
            "/api/transactions",
            serde_json::json!({"amount": -4.5, "category": "Food & Drink"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["message"], "Transaction added successfully");
    assert_eq!(json["transaction"]["id"], 1);
    assert_eq!(json["transaction"]["merchant"], "Manual Entry");
    assert_eq!(json["transaction"]["date"], "2024-06-15");

    let stored = store.list().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].amount, -4.5);
}

#[tokio::test]
async fn test_add_transaction_uses_description_and_next_id() {
    let app = setup_test_app();
    let next = sample_transactions().iter().map(|t| t.id).max().unwrap() + 1;

    let response = app
        .oneshot(post_json(
            "/api/transactions",
            serde_json::json!({
                "amount": -23.0,
                "category": "Shopping",
                "description": "Bookshop"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["transaction"]["id"], next);
    assert_eq!(json["transaction"]["merchant"], "Bookshop");
}

#[tokio::test]
async fn test_add_transaction_requires_category() {
    let response = setup_test_app()
        .oneshot(post_json(
            "/api/transactions",
            serde_json::json!({"amount": -1.0, "category": "  "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Category is required");
}

#[tokio::test]
async fn test_add_transaction_persistence_failure() {
    let app = app_with(Arc::new(ReadOnlyStore), AdvisorClient::mock());

    let response = app
        .oneshot(post_json(
            "/api/transactions",
            serde_json::json!({"amount": -1.0, "category": "Other"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = get_body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Error saving transaction"));
}

// ========== Insight API Tests ==========

#[tokio::test]
async fn test_get_insights() {
    let response = setup_test_app().oneshot(get("/api/insights")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let insights = &json["insights"];

    assert!(insights["category_spend_last_30d"]["Food & Drink"].as_f64().unwrap() > 100.0);
    assert!(insights["subscriptions"]
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s["merchant"] == "Netflix"));
    assert_eq!(insights["tips"].as_array().unwrap().len(), 1);

    let trends = insights["trend_insights"].as_array().unwrap();
    assert!(!trends.is_empty() && trends.len() <= 3);
    for trend in trends {
        let direction = trend["direction"].as_str().unwrap();
        assert!(["increase", "decrease", "flat"].contains(&direction));
    }
}

#[tokio::test]
async fn test_get_insights_missing_data() {
    let response = setup_missing_data_app()
        .oneshot(get("/api/insights"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["insights"]["subscriptions"], serde_json::json!([]));
    assert_eq!(
        json["insights"]["category_spend_last_30d"],
        serde_json::json!({})
    );
}

// ========== Forecast API Tests ==========

#[tokio::test]
async fn test_forecast_defaults() {
    let response = setup_test_app().oneshot(get("/api/forecast")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["projected_months_needed"], 2);
    assert!(json["monthly_surplus_estimate"].as_f64().unwrap() > 1500.0);
}

#[tokio::test]
async fn test_forecast_with_params() {
    let response = setup_test_app()
        .oneshot(get("/api/forecast?goal_amount=100000&months=4"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["projected_months_needed"], 4);
}

#[tokio::test]
async fn test_forecast_invalid_param() {
    let response = setup_test_app()
        .oneshot(get("/api/forecast?months=-3"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forecast_missing_data() {
    let response = setup_missing_data_app()
        .oneshot(get("/api/forecast"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["projected_months_needed"], 0);
    assert_eq!(json["monthly_surplus_estimate"], 0.0);
}

// ========== Goal API Tests ==========

#[tokio::test]
async fn test_set_goal_with_advisor() {
    let response = setup_test_app()
        .oneshot(post_json(
            "/api/goal",
            serde_json::json!({"goal_amount": 5000.0, "target_date": "2024-12-31"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["goal"]["goal_amount"], 5000.0);
    assert_eq!(json["goal"]["target_date"], "2024-12-31");
    assert_eq!(json["ai"]["used"], true);
    assert_eq!(json["ai"]["provider"], "mock");
    assert!(json["recommendation"]
        .as_str()
        .unwrap()
        .starts_with("Aim to reach $5,000.00 by 2024-12-31"));
    assert!(json["forecast"]["projected_months_needed"].as_i64().unwrap() <= 12);
}

#[tokio::test]
async fn test_set_goal_falls_back_when_advisor_fails() {
    let app = app_with(
        Arc::new(MemoryStore::with_transactions(sample_transactions())),
        AdvisorClient::Mock(MockAdvisor::failing()),
    );

    let response = app
        .oneshot(post_json(
            "/api/goal",
            serde_json::json!({"goal_amount": 3000.0, "target_date": "2024-12-31"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["ai"]["used"], false);
    assert!(json["ai"]["error"].is_string());
    assert!(json["recommendation"]
        .as_str()
        .unwrap()
        .starts_with("You need to save about $"));
}

#[tokio::test]
async fn test_set_goal_missing_data() {
    let response = setup_missing_data_app()
        .oneshot(post_json(
            "/api/goal",
            serde_json::json!({"goal_amount": 3000.0, "target_date": "2024-12-31"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "No transactions found");
}

#[tokio::test]
async fn test_set_goal_rejects_bad_date() {
    let response = setup_test_app()
        .oneshot(post_json(
            "/api/goal",
            serde_json::json!({"goal_amount": 3000.0, "target_date": "next year"}),
        ))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

// ========== CORS ==========

#[tokio::test]
async fn test_cors_permissive_by_default() {
    let response = setup_test_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_restricted_to_allowed_origins() {
    let app = create_router_with_state(AppState {
        store: Arc::new(MemoryStore::new()),
        advisor: AdvisorClient::mock(),
        config: ServerConfig {
            allowed_origins: vec!["https://coach.example.com".to_string()],
            today: Some(reference_date()),
        },
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("origin", "https://coach.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "https://coach.example.com"
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("origin", "https://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
