use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::{
        generation::{DetailQuery, SuggestionList, SuggestionQuery},
        recipes::DetailedRecipe,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::{extract::AppQuery, params::parse_id},
    services::generation_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(suggest))
        .route("/recipe-details", get(recipe_details))
}

#[utoipa::path(
    get,
    path = "/api/generate/recipes",
    params(("ingredients" = String, Query, description = "Comma-separated ingredient list")),
    responses(
        (status = 200, description = "Three recipe ideas, not persisted", body = ApiResponse<SuggestionList>),
        (status = 400, description = "Ingredients are required"),
        (status = 500, description = "Completion service failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Generation"
)]
pub async fn suggest(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(query): AppQuery<SuggestionQuery>,
) -> AppResult<Json<ApiResponse<SuggestionList>>> {
    let recipes = generation_service::suggest_recipes(&state, &query.ingredient_list()).await?;
    Ok(Json(ApiResponse::success(
        "Recipe suggestions",
        SuggestionList { recipes },
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/generate/recipe-details",
    params(
        ("id" = String, Query, description = "Recipe ID"),
        ("refresh" = Option<bool>, Query, description = "Regenerate even when details are stored"),
    ),
    responses(
        (status = 200, description = "Recipe with generated and persisted details", body = ApiResponse<DetailedRecipe>),
        (status = 400, description = "Missing ID or unrecognized generated names"),
        (status = 404, description = "Recipe not found"),
        (status = 500, description = "Completion service failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Generation"
)]
pub async fn recipe_details(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<DetailQuery>,
) -> AppResult<Json<ApiResponse<DetailedRecipe>>> {
    let raw = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Recipe ID is required"))?;
    let recipe_id = parse_id(&raw, "Recipe ID must be a positive number")?;

    let recipe = generation_service::generate_recipe_details(
        &state,
        &user,
        recipe_id,
        query.refresh.unwrap_or(false),
    )
    .await?;
    Ok(Json(ApiResponse::success("Recipe details", recipe, None)))
}
