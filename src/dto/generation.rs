use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SuggestionQuery {
    /// Comma-separated ingredient list.
    pub ingredients: Option<String>,
}

impl SuggestionQuery {
    pub fn ingredient_list(&self) -> Vec<String> {
        self.ingredients
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One idea as returned by the completion service.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSuggestion {
    pub title: String,
    pub overview: String,
    pub cooking_time: i32,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedSuggestions {
    pub recipes: Vec<GeneratedSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecipeSuggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cooking_time: i32,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionList {
    pub recipes: Vec<RecipeSuggestion>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DetailQuery {
    pub id: Option<String>,
    /// Regenerate even if details are already stored.
    pub refresh: Option<bool>,
}
