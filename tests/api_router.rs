mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use nutrichef_api::{
    error::AppError,
    llm::FakeProvider,
    routes::{create_api_router, not_found},
    services::{auth_service::issue_token, recipe_service},
};
use serde_json::Value;
use tower::ServiceExt;

fn app(fake: Arc<FakeProvider>, allow_seed: bool) -> Router {
    Router::new()
        .nest("/api", create_api_router())
        .fallback(not_found)
        .with_state(common::offline_state(fake, allow_seed))
}

fn bearer(user_id: i32) -> String {
    format!("Bearer {}", issue_token(user_id, common::JWT_SECRET, 1).unwrap())
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn recipes_require_a_bearer_token() {
    let fake = Arc::new(FakeProvider::new());
    let request = Request::get("/api/recipes").body(Body::empty()).unwrap();
    let (status, body) = call(app(fake, false), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing Authorization header");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let fake = Arc::new(FakeProvider::new());
    let token = issue_token(1, "some-other-secret", 1).unwrap();
    let request = Request::get("/api/reports/categories")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(app(fake, false), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn suggestions_without_ingredients_are_rejected_before_the_provider() {
    let fake = Arc::new(FakeProvider::with_recipe_responses());
    let request = Request::get("/api/generate/recipes?ingredients=%20,%20")
        .header(header::AUTHORIZATION, bearer(1))
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(app(fake.clone(), false), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Ingredients are required");
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn suggestions_come_back_with_sequential_ids() {
    let fake = Arc::new(FakeProvider::with_recipe_responses());
    let request = Request::get("/api/generate/recipes?ingredients=pasta,butter")
        .header(header::AUTHORIZATION, bearer(1))
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(app(fake.clone(), false), request).await;
    assert_eq!(status, StatusCode::OK);
    let recipes = body["data"]["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 3);
    assert_eq!(recipes[0]["id"], "recipe-1");
    assert_eq!(recipes[0]["description"], "Spaghetti tossed in browned garlic butter.");
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn provider_failure_is_a_generic_500() {
    let fake = Arc::new(FakeProvider::new().with_failure("recipe_suggestions", "quota exceeded"));
    let request = Request::get("/api/generate/recipes?ingredients=rice")
        .header(header::AUTHORIZATION, bearer(1))
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(app(fake, false), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().contains("quota"));
}

#[tokio::test]
async fn detail_generation_requires_an_id() {
    let fake = Arc::new(FakeProvider::with_recipe_responses());
    for uri in ["/api/generate/recipe-details", "/api/generate/recipe-details?id="] {
        let request = Request::get(uri)
            .header(header::AUTHORIZATION, bearer(1))
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(app(fake.clone(), false), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Recipe ID is required");
    }
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn popular_recipe_requires_a_category() {
    let fake = Arc::new(FakeProvider::new());
    let request = Request::get("/api/recipes/popular").body(Body::empty()).unwrap();
    let (status, body) = call(app(fake, false), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Category ID is required");
}

#[tokio::test]
async fn seed_endpoint_is_disabled_by_default() {
    let fake = Arc::new(FakeProvider::new());
    let request = Request::get("/api/seed").body(Body::empty()).unwrap();
    let (status, body) = call(app(fake, false), request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");
}

#[tokio::test]
async fn invalid_recipe_form_lists_field_errors() {
    let fake = Arc::new(FakeProvider::new());
    let request = Request::post("/api/recipes")
        .header(header::AUTHORIZATION, bearer(1))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"title":"  ","description":"","cooking_time":"ten"}"#))
        .unwrap();
    let (status, body) = call(app(fake, false), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["title"][0], "Title is required.");
    assert_eq!(body["errors"]["description"][0], "Description is required.");
    assert_eq!(body["errors"]["cooking_time"][0], "Cooking time must be a valid number.");
}

#[tokio::test]
async fn creating_a_recipe_for_someone_else_is_forbidden() {
    let fake = Arc::new(FakeProvider::new());
    let request = Request::post("/api/recipes")
        .header(header::AUTHORIZATION, bearer(1))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"user_id":"2","title":"Soup","description":"Warm","cooking_time":20}"#,
        ))
        .unwrap();
    let (status, _) = call(app(fake, false), request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn non_numeric_recipe_id_is_a_json_400() {
    let fake = Arc::new(FakeProvider::new());
    let request = Request::get("/api/recipes/abc")
        .header(header::AUTHORIZATION, bearer(1))
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(app(fake, false), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn malformed_json_body_is_a_json_400() {
    let fake = Arc::new(FakeProvider::new());
    let request = Request::post("/api/recipes")
        .header(header::AUTHORIZATION, bearer(1))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = call(app(fake, false), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn bad_query_value_is_a_json_400() {
    let fake = Arc::new(FakeProvider::new());
    let request = Request::get("/api/recipes/recent?limit=x").body(Body::empty()).unwrap();
    let (status, body) = call(app(fake, false), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_route_is_a_json_404() {
    let fake = Arc::new(FakeProvider::new());
    let request = Request::get("/api/nowhere").body(Body::empty()).unwrap();
    let (status, body) = call(app(fake, false), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No route for /api/nowhere");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn overlong_title_update_is_rejected_before_the_database() {
    let state = common::offline_state(Arc::new(FakeProvider::new()), false);
    let result = recipe_service::update_recipe_title(&state, 1, &"x".repeat(256)).await;
    match result {
        Err(AppError::Validation(errors)) => assert_eq!(
            errors.get("title"),
            Some(&["Title must be at most 255 characters.".to_string()][..])
        ),
        other => panic!("expected a title validation error, got {other:?}"),
    }
}
