use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::{
        recipes::RecipeList,
        reports::{CategoryCount, CategoryRestrictionCount, CuisineCount, PopularCuisine},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::report_service,
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct CategoryCountList {
    pub items: Vec<CategoryCount>,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryRestrictionCountList {
    pub items: Vec<CategoryRestrictionCount>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(recipes_by_category))
        .route("/top-cuisine", get(top_cuisine))
        .route("/category-restrictions", get(category_restrictions))
        .route("/all-restrictions", get(all_restrictions))
        .route("/popular-cuisine", get(popular_cuisine))
}

#[utoipa::path(
    get,
    path = "/api/reports/categories",
    responses(
        (status = 200, description = "Recipe count per category, zero included", body = ApiResponse<CategoryCountList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn recipes_by_category(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CategoryCountList>>> {
    let items = report_service::num_of_recipes_by_category(&state, user.user_id).await?;
    Ok(Json(ApiResponse::success(
        "Recipes by category",
        CategoryCountList { items },
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/reports/top-cuisine",
    responses(
        (status = 200, description = "Most frequent cuisine, null without tagged recipes", body = ApiResponse<CuisineCount>)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn top_cuisine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Option<CuisineCount>>>> {
    let top = report_service::max_cuisine_appearance(&state, user.user_id).await?;
    Ok(Json(ApiResponse::success("Top cuisine", top, None)))
}

#[utoipa::path(
    get,
    path = "/api/reports/category-restrictions",
    responses(
        (status = 200, description = "Recipe count per category and restriction pair", body = ApiResponse<CategoryRestrictionCountList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn category_restrictions(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CategoryRestrictionCountList>>> {
    let items = report_service::recipe_counts_nested_aggregation(&state, user.user_id).await?;
    Ok(Json(ApiResponse::success(
        "Recipes by category and restriction",
        CategoryRestrictionCountList { items },
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/reports/all-restrictions",
    responses(
        (status = 200, description = "Recipes tagged with every defined dietary restriction", body = ApiResponse<RecipeList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn all_restrictions(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<RecipeList>>> {
    let items = report_service::recipes_for_all_dietary_restrictions(&state, user.user_id).await?;
    Ok(Json(ApiResponse::success(
        "Recipes satisfying every restriction",
        RecipeList { items },
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/reports/popular-cuisine",
    responses(
        (status = 200, description = "Cuisine with the highest positive average popularity", body = ApiResponse<PopularCuisine>)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn popular_cuisine(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<Option<PopularCuisine>>>> {
    let cuisine = report_service::fetch_cuisine_with_most_popular_recipes(&state).await?;
    Ok(Json(ApiResponse::success("Most popular cuisine", cuisine, None)))
}
