use axum::{Router, http::Uri};

use crate::{error::AppError, state::AppState};

pub mod auth;
pub mod doc;
pub mod extract;
pub mod generate;
pub mod health;
pub mod ingredients;
pub mod lookups;
pub mod params;
pub mod recipes;
pub mod reports;
pub mod seed;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/recipes", recipes::router())
        .nest("/ingredients", ingredients::router())
        .nest("/lookups", lookups::router())
        .nest("/reports", reports::router())
        .nest("/generate", generate::router())
        .nest("/seed", seed::router())
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("No route for {}", uri.path()))
}
