use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, put},
};
use sea_orm::TransactionTrait;

use crate::{
    dto::{
        lookups::PerishableList,
        recipes::{
            CreateRecipeRequest, CreatedRecipe, DeletedResponse, DetailedRecipe,
            IngredientSearchQuery, NutritionFieldsQuery, NutritionProjection, PopularQuery, RecentQuery,
            RecipeDetails, RecipeFilterQuery, RecipeList, RestrictionNamesQuery,
            UpdateTitleRequest, UpdatedResponse,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Recipe,
    response::ApiResponse,
    routes::{
        extract::{AppJson, AppPath, AppQuery},
        params::{NutritionField, parse_id},
    },
    services::recipe_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_recipes).post(create_recipe).delete(delete_all_recipes),
        )
        .route("/search", get(search_by_ingredient))
        .route("/by-restrictions", get(by_dietary_restrictions))
        .route("/recent", get(recent_recipes))
        .route("/popular", get(popular_recipe))
        .route("/{id}", get(get_recipe).delete(delete_recipe))
        .route("/{id}/title", patch(update_title))
        .route("/{id}/details", put(save_details))
        .route("/{id}/nutrition", get(nutrition))
        .route("/{id}/perishables", get(perishables))
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    params(
        ("category" = Option<String>, Query, description = "Category name"),
        ("cuisine" = Option<String>, Query, description = "Cuisine name"),
        ("dietary_restriction" = Option<String>, Query, description = "Dietary restriction name"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "Caller's recipes matching every given filter", body = ApiResponse<RecipeList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<RecipeFilterQuery>,
) -> AppResult<Json<ApiResponse<RecipeList>>> {
    let (filter, pagination) = query.split();
    let resp = recipe_service::list_recipes(&state, user.user_id, &filter, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = ApiResponse<CreatedRecipe>),
        (status = 400, description = "Validation failed or malformed body"),
        (status = 403, description = "user_id belongs to someone else")
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateRecipeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedRecipe>>)> {
    let form = payload.into_form(user.user_id);
    let recipe_id = recipe_service::insert_recipe(&state, &user, &form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Recipe created",
            CreatedRecipe { recipe_id },
            None,
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/recipes",
    responses(
        (status = 200, description = "All of the caller's recipes deleted", body = ApiResponse<DeletedResponse>)
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn delete_all_recipes(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DeletedResponse>>> {
    let deleted = recipe_service::delete_all_recipes(&state, user.user_id).await?;
    Ok(Json(ApiResponse::success(
        "Recipes deleted",
        DeletedResponse { deleted },
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/recipes/search",
    params(("ingredient" = String, Query, description = "Ingredient name fragment")),
    responses(
        (status = 200, description = "Recipes using a matching ingredient", body = ApiResponse<RecipeList>),
        (status = 400, description = "Missing ingredient")
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn search_by_ingredient(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(query): AppQuery<IngredientSearchQuery>,
) -> AppResult<Json<ApiResponse<RecipeList>>> {
    let term = query.ingredient.unwrap_or_default();
    let items = recipe_service::fetch_recipes_by_ingredient(&state, &term).await?;
    Ok(Json(ApiResponse::success("Recipes", RecipeList { items }, None)))
}

#[utoipa::path(
    get,
    path = "/api/recipes/by-restrictions",
    params(("names" = String, Query, description = "Comma-separated restriction names")),
    responses(
        (status = 200, description = "Caller's recipes tagged with every named restriction", body = ApiResponse<RecipeList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn by_dietary_restrictions(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<RestrictionNamesQuery>,
) -> AppResult<Json<ApiResponse<RecipeList>>> {
    let names: Vec<String> = query
        .names
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    let items =
        recipe_service::fetch_recipes_by_dietary_restrictions(&state, user.user_id, &names).await?;
    Ok(Json(ApiResponse::success("Recipes", RecipeList { items }, None)))
}

#[utoipa::path(
    get,
    path = "/api/recipes/recent",
    params(("limit" = Option<i64>, Query, description = "Number of recipes, default 10, max 100")),
    responses(
        (status = 200, description = "Most recently created recipes", body = ApiResponse<RecipeList>)
    ),
    tag = "Recipes"
)]
pub async fn recent_recipes(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RecentQuery>,
) -> AppResult<Json<ApiResponse<RecipeList>>> {
    let items = recipe_service::fetch_recent_recipes(&state, query.limit).await?;
    Ok(Json(ApiResponse::success("Recent recipes", RecipeList { items }, None)))
}

#[utoipa::path(
    get,
    path = "/api/recipes/popular",
    params(("category_id" = String, Query, description = "Category ID")),
    responses(
        (status = 200, description = "Most popular recipe in the category", body = ApiResponse<Recipe>),
        (status = 400, description = "Missing or invalid category ID"),
        (status = 404, description = "No recipe in this category")
    ),
    tag = "Recipes"
)]
pub async fn popular_recipe(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PopularQuery>,
) -> AppResult<Json<ApiResponse<Recipe>>> {
    let raw = query
        .category_id
        .ok_or_else(|| AppError::bad_request("Category ID is required"))?;
    let category_id = parse_id(&raw, "Category ID must be a positive number")?;
    let recipe = recipe_service::fetch_popular_recipe(&state, category_id).await?;
    Ok(Json(ApiResponse::success("Popular recipe", recipe, None)))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe with all stored details", body = ApiResponse<DetailedRecipe>),
        (status = 403, description = "Recipe belongs to another user"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<DetailedRecipe>>> {
    recipe_service::owned_recipe(&state, &user, id).await?;
    let recipe = recipe_service::fetch_detailed_recipe(&state, id).await?;
    Ok(Json(ApiResponse::success("Recipe", recipe, None)))
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe and its dependent rows deleted", body = ApiResponse<DeletedResponse>),
        (status = 403, description = "Recipe belongs to another user"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<DeletedResponse>>> {
    recipe_service::owned_recipe(&state, &user, id).await?;
    let deleted = recipe_service::delete_recipe(&state, id).await?;
    Ok(Json(ApiResponse::success(
        "Recipe deleted",
        DeletedResponse {
            deleted: u64::from(deleted),
        },
        None,
    )))
}

#[utoipa::path(
    patch,
    path = "/api/recipes/{id}/title",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = UpdateTitleRequest,
    responses(
        (status = 200, description = "Title updated", body = ApiResponse<UpdatedResponse>),
        (status = 400, description = "Empty or overlong title"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn update_title(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateTitleRequest>,
) -> AppResult<Json<ApiResponse<UpdatedResponse>>> {
    recipe_service::owned_recipe(&state, &user, id).await?;
    let updated = recipe_service::update_recipe_title(&state, id, &payload.title).await?;
    if !updated {
        return Err(AppError::not_found("Recipe not found"));
    }
    Ok(Json(ApiResponse::success(
        "Title updated",
        UpdatedResponse { updated },
        None,
    )))
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}/details",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = RecipeDetails,
    responses(
        (status = 200, description = "Details saved", body = ApiResponse<DetailedRecipe>),
        (status = 400, description = "Unrecognized category, cuisine or restriction name"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn save_details(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
    AppJson(details): AppJson<RecipeDetails>,
) -> AppResult<Json<ApiResponse<DetailedRecipe>>> {
    recipe_service::owned_recipe(&state, &user, id).await?;

    let txn = state.orm.begin().await?;
    recipe_service::save_recipe_details(&txn, id, &details).await?;
    txn.commit().await?;

    let recipe = recipe_service::fetch_detailed_recipe(&state, id).await?;
    Ok(Json(ApiResponse::success("Recipe details saved", recipe, None)))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/nutrition",
    params(
        ("id" = i32, Path, description = "Recipe ID"),
        ("fields" = Option<String>, Query, description = "Comma-separated subset of calories,proteins,fats"),
    ),
    responses(
        (status = 200, description = "Selected nutrition columns, null when none stored or selected", body = ApiResponse<NutritionProjection>),
        (status = 400, description = "Unknown field")
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn nutrition(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
    AppQuery(query): AppQuery<NutritionFieldsQuery>,
) -> AppResult<Json<ApiResponse<Option<NutritionProjection>>>> {
    recipe_service::owned_recipe(&state, &user, id).await?;
    let fields = NutritionField::parse_list(query.fields.as_deref().unwrap_or_default())?;
    let facts = recipe_service::fetch_custom_nutrition_facts(&state, id, &fields).await?;
    Ok(Json(ApiResponse::success("Nutrition facts", facts, None)))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/perishables",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Perishable ingredients, shortest shelf life first", body = ApiResponse<PerishableList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn perishables(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<PerishableList>>> {
    recipe_service::owned_recipe(&state, &user, id).await?;
    let items = recipe_service::fetch_perishable_ingredients(&state, id).await?;
    Ok(Json(ApiResponse::success(
        "Perishable ingredients",
        PerishableList { items },
        None,
    )))
}
