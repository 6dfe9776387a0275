use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::lookups::{CategoryList, CuisineList, DietaryRestrictionList, UserOptionNames},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::lookup_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories))
        .route("/cuisines", get(cuisines))
        .route("/dietary-restrictions", get(dietary_restrictions))
        .route("/mine", get(my_options))
}

#[utoipa::path(
    get,
    path = "/api/lookups/categories",
    responses((status = 200, description = "All categories", body = ApiResponse<CategoryList>)),
    tag = "Lookups"
)]
pub async fn categories(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let items = lookup_service::fetch_categories(&state).await?;
    Ok(Json(ApiResponse::success("Categories", CategoryList { items }, None)))
}

#[utoipa::path(
    get,
    path = "/api/lookups/cuisines",
    responses((status = 200, description = "All cuisines", body = ApiResponse<CuisineList>)),
    tag = "Lookups"
)]
pub async fn cuisines(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CuisineList>>> {
    let items = lookup_service::fetch_cuisines(&state).await?;
    Ok(Json(ApiResponse::success("Cuisines", CuisineList { items }, None)))
}

#[utoipa::path(
    get,
    path = "/api/lookups/dietary-restrictions",
    responses((status = 200, description = "All dietary restrictions", body = ApiResponse<DietaryRestrictionList>)),
    tag = "Lookups"
)]
pub async fn dietary_restrictions(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DietaryRestrictionList>>> {
    let items = lookup_service::fetch_dietary_restrictions(&state).await?;
    Ok(Json(ApiResponse::success(
        "Dietary restrictions",
        DietaryRestrictionList { items },
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/lookups/mine",
    responses((status = 200, description = "Lookup names used by the caller's recipes", body = ApiResponse<UserOptionNames>)),
    security(("bearer_auth" = [])),
    tag = "Lookups"
)]
pub async fn my_options(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserOptionNames>>> {
    let names = lookup_service::fetch_user_option_names(&state, user.user_id).await?;
    Ok(Json(ApiResponse::success("Filter options", names, None)))
}
