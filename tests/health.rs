mod common;

use std::sync::Arc;

use axum::extract::State;
use nutrichef_api::{llm::FakeProvider, routes::health::health_check};

#[tokio::test]
async fn health_check_returns_ok_without_a_database() {
    let state = common::offline_state(Arc::new(FakeProvider::new()), false);
    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = serde_json::to_value(response.0.data.expect("health data")).unwrap();
    assert_eq!(data["status"], "ok");
    assert_eq!(data["database"], "unavailable");
    assert_eq!(data["llm_provider"], "fake");
}
