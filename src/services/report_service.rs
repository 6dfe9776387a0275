use crate::{
    dto::reports::{CategoryCount, CategoryRestrictionCount, CuisineCount, PopularCuisine},
    error::AppResult,
    models::Recipe,
    state::AppState,
};

/// Every category with the number of `user_id`'s recipes tagged with it, zero included.
pub async fn num_of_recipes_by_category(state: &AppState, user_id: i32) -> AppResult<Vec<CategoryCount>> {
    let rows = sqlx::query_as::<_, CategoryCount>(
        r#"
        SELECT c.name AS category, COUNT(r.id) AS recipe_count
        FROM categories c
        LEFT JOIN recipe_categories rc ON c.id = rc.category_id
        LEFT JOIN recipes r ON r.id = rc.recipe_id AND r.user_id = $1
        GROUP BY c.id, c.name
        ORDER BY recipe_count DESC, c.name
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(rows)
}

/// Cuisine appearing on most of the user's recipes; ties go to the alphabetically first name.
pub async fn max_cuisine_appearance(state: &AppState, user_id: i32) -> AppResult<Option<CuisineCount>> {
    let row = sqlx::query_as::<_, CuisineCount>(
        r#"
        SELECT cu.name AS cuisine, COUNT(*) AS count
        FROM cuisines cu
        JOIN recipe_cuisines rc ON cu.id = rc.cuisine_id
        JOIN recipes r ON r.id = rc.recipe_id
        WHERE r.user_id = $1
        GROUP BY cu.id, cu.name
        ORDER BY count DESC, cu.name
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&state.pool)
    .await?;
    Ok(row)
}

#[derive(Debug, sqlx::FromRow)]
struct PairCountRow {
    category: String,
    restriction: String,
    recipes_num: i64,
}

/// Recipe count per (category, dietary restriction) pair for one user.
pub async fn recipe_counts_nested_aggregation(
    state: &AppState,
    user_id: i32,
) -> AppResult<Vec<CategoryRestrictionCount>> {
    let rows = sqlx::query_as::<_, PairCountRow>(
        r#"
        SELECT c.name AS category, d.name AS restriction, COUNT(DISTINCT r.id) AS recipes_num
        FROM recipes r
        JOIN recipe_categories rc ON r.id = rc.recipe_id
        JOIN categories c ON c.id = rc.category_id
        JOIN recipe_dietary_restrictions rdr ON r.id = rdr.recipe_id
        JOIN dietary_restrictions d ON d.id = rdr.dietary_id
        WHERE r.user_id = $1
        GROUP BY c.name, d.name
        ORDER BY recipes_num DESC, c.name, d.name
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(rows.into_iter().map(pair_count).collect())
}

fn pair_count(row: PairCountRow) -> CategoryRestrictionCount {
    CategoryRestrictionCount {
        category_restriction: format!("{}-{}", row.category, row.restriction),
        category: row.category,
        restriction: row.restriction,
        recipes_num: row.recipes_num,
    }
}

/// Recipes of `user_id` linked to every dietary restriction currently defined.
///
/// Written as a double negation: keep a recipe when no restriction exists
/// that lacks a link to it. With an empty restriction table every recipe
/// qualifies.
pub async fn recipes_for_all_dietary_restrictions(
    state: &AppState,
    user_id: i32,
) -> AppResult<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT r.id, r.user_id, r.title, r.description, r.cooking_time, r.popularity, r.created_at
        FROM recipes r
        WHERE r.user_id = $1
          AND NOT EXISTS (
            SELECT 1 FROM dietary_restrictions d
            WHERE NOT EXISTS (
              SELECT 1 FROM recipe_dietary_restrictions rdr
              WHERE rdr.recipe_id = r.id AND rdr.dietary_id = d.id
            )
          )
        ORDER BY r.id
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(rows)
}

/// Cuisine whose recipes have the highest positive average popularity.
pub async fn fetch_cuisine_with_most_popular_recipes(
    state: &AppState,
) -> AppResult<Option<PopularCuisine>> {
    let row = sqlx::query_as::<_, PopularCuisine>(
        r#"
        SELECT cu.name AS cuisine, AVG(r.popularity)::float8 AS average_popularity
        FROM cuisines cu
        JOIN recipe_cuisines rc ON cu.id = rc.cuisine_id
        JOIN recipes r ON r.id = rc.recipe_id
        GROUP BY cu.id, cu.name
        HAVING AVG(r.popularity) > 0
        ORDER BY average_popularity DESC, cu.name
        LIMIT 1
        "#,
    )
    .fetch_optional(&state.pool)
    .await?;
    Ok(row)
}
