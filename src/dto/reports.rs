use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema, FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub recipe_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema, FromRow)]
pub struct CuisineCount {
    pub cuisine: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryRestrictionCount {
    /// `"<category>-<restriction>"` label.
    pub category_restriction: String,
    pub category: String,
    pub restriction: String,
    pub recipes_num: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema, FromRow)]
pub struct PopularCuisine {
    pub cuisine: String,
    pub average_popularity: f64,
}
