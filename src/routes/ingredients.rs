use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::lookups::AllergenList,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::extract::AppPath,
    services::recipe_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/allergens", get(allergens))
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}/allergens",
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses((status = 200, description = "Allergens of an ingredient", body = ApiResponse<AllergenList>)),
    security(("bearer_auth" = [])),
    tag = "Ingredients"
)]
pub async fn allergens(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<AllergenList>>> {
    let items = recipe_service::fetch_allergens(&state, id).await?;
    Ok(Json(ApiResponse::success("Allergens", AllergenList { items }, None)))
}
