use sea_orm::{EntityTrait, QueryOrder};

use crate::{
    dto::lookups::UserOptionNames,
    entity::{Categories, Cuisines, DietaryRestrictions, categories, cuisines, dietary_restrictions},
    error::AppResult,
    models::{Category, Cuisine, DietaryRestriction},
    state::AppState,
};

pub async fn fetch_categories(state: &AppState) -> AppResult<Vec<Category>> {
    let items = Categories::find()
        .order_by_asc(categories::Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| Category { id: c.id, name: c.name })
        .collect();
    Ok(items)
}

pub async fn fetch_cuisines(state: &AppState) -> AppResult<Vec<Cuisine>> {
    let items = Cuisines::find()
        .order_by_asc(cuisines::Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| Cuisine { id: c.id, name: c.name })
        .collect();
    Ok(items)
}

pub async fn fetch_dietary_restrictions(state: &AppState) -> AppResult<Vec<DietaryRestriction>> {
    let items = DietaryRestrictions::find()
        .order_by_asc(dietary_restrictions::Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|d| DietaryRestriction {
            id: d.id,
            name: d.name,
            description: d.description,
        })
        .collect();
    Ok(items)
}

pub async fn fetch_user_category_names(state: &AppState, user_id: i32) -> AppResult<Vec<String>> {
    let names = sqlx::query_scalar(
        r#"
        SELECT DISTINCT c.name
        FROM categories c
        JOIN recipe_categories rc ON c.id = rc.category_id
        JOIN recipes r ON r.id = rc.recipe_id
        WHERE r.user_id = $1
        ORDER BY c.name
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(names)
}

pub async fn fetch_user_cuisine_names(state: &AppState, user_id: i32) -> AppResult<Vec<String>> {
    let names = sqlx::query_scalar(
        r#"
        SELECT DISTINCT cu.name
        FROM cuisines cu
        JOIN recipe_cuisines rc ON cu.id = rc.cuisine_id
        JOIN recipes r ON r.id = rc.recipe_id
        WHERE r.user_id = $1
        ORDER BY cu.name
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(names)
}

pub async fn fetch_user_dietary_restriction_names(
    state: &AppState,
    user_id: i32,
) -> AppResult<Vec<String>> {
    let names = sqlx::query_scalar(
        r#"
        SELECT DISTINCT d.name
        FROM dietary_restrictions d
        JOIN recipe_dietary_restrictions rdr ON d.id = rdr.dietary_id
        JOIN recipes r ON r.id = rdr.recipe_id
        WHERE r.user_id = $1
        ORDER BY d.name
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(names)
}

pub async fn fetch_user_option_names(state: &AppState, user_id: i32) -> AppResult<UserOptionNames> {
    Ok(UserOptionNames {
        categories: fetch_user_category_names(state, user_id).await?,
        cuisines: fetch_user_cuisine_names(state, user_id).await?,
        dietary_restrictions: fetch_user_dietary_restriction_names(state, user_id).await?,
    })
}

/// Names of every row in the three lookup tables, used to constrain generated output.
#[derive(Debug, Clone, Default)]
pub struct LookupNames {
    pub categories: Vec<String>,
    pub cuisines: Vec<String>,
    pub dietary_restrictions: Vec<String>,
}

pub async fn fetch_lookup_names(state: &AppState) -> AppResult<LookupNames> {
    Ok(LookupNames {
        categories: fetch_categories(state).await?.into_iter().map(|c| c.name).collect(),
        cuisines: fetch_cuisines(state).await?.into_iter().map(|c| c.name).collect(),
        dietary_restrictions: fetch_dietary_restrictions(state)
            .await?
            .into_iter()
            .map(|d| d.name)
            .collect(),
    })
}
