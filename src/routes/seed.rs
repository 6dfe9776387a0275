use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult,
    response::ApiResponse,
    services::seed_service::{SeedSummary, ensure_seed_allowed, reset_and_seed},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(seed))
}

#[utoipa::path(
    get,
    path = "/api/seed",
    responses(
        (status = 200, description = "Schema recreated and demo data loaded", body = ApiResponse<SeedSummary>),
        (status = 403, description = "Seeding is disabled")
    ),
    tag = "Seed"
)]
pub async fn seed(State(state): State<AppState>) -> AppResult<Json<ApiResponse<SeedSummary>>> {
    ensure_seed_allowed(&state)?;
    let summary = reset_and_seed(&state).await?;
    Ok(Json(ApiResponse::success("Database seeded successfully", summary, None)))
}
