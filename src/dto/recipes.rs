use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{error::FieldErrors, models::Recipe, routes::params::Pagination};

const MAX_TITLE_LEN: usize = 255;

/// Unvalidated recipe form; every field arrives as text.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct RecipeForm {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cooking_time: String,
}

/// A recipe form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub cooking_time: i32,
}

impl RecipeForm {
    pub fn validate(&self) -> Result<NewRecipe, FieldErrors> {
        let mut errors = FieldErrors::default();

        let user_id = parse_digits(&self.user_id);
        if user_id.is_none() {
            errors.add("user_id", "Invalid user ID. Must be a number.");
        }

        let title = validate_title(&self.title, &mut errors);

        let description = self.description.trim();
        if description.is_empty() {
            errors.add("description", "Description is required.");
        }

        let cooking_time = parse_digits(&self.cooking_time);
        if cooking_time.is_none() {
            errors.add("cooking_time", "Cooking time must be a valid number.");
        }

        match (user_id, title, cooking_time) {
            (Some(user_id), Some(title), Some(cooking_time)) if errors.is_empty() => Ok(NewRecipe {
                user_id,
                title,
                description: description.to_string(),
                cooking_time,
            }),
            _ => Err(errors),
        }
    }
}

/// Trimmed title, or `None` with a `title` entry added to `errors`.
pub fn validate_title(raw: &str, errors: &mut FieldErrors) -> Option<String> {
    let title = raw.trim();
    if title.is_empty() {
        errors.add("title", "Title is required.");
        None
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.add("title", "Title must be at most 255 characters.");
        None
    } else {
        Some(title.to_string())
    }
}

fn parse_digits(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i32>().ok()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    /// Defaults to the authenticated user.
    pub user_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Minutes, as a number or a numeric string.
    #[serde(default)]
    #[schema(value_type = String)]
    pub cooking_time: Value,
}

impl CreateRecipeRequest {
    pub fn into_form(self, user_id: i32) -> RecipeForm {
        let cooking_time = match self.cooking_time {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        };
        RecipeForm {
            user_id: self.user_id.unwrap_or_else(|| user_id.to_string()),
            title: self.title,
            description: self.description,
            cooking_time,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedRecipe {
    pub recipe_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTitleRequest {
    pub title: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedResponse {
    pub updated: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: u64,
}

/// Optional equality filters on lookup names; `None` means unconstrained.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecipeFilter {
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub dietary_restriction: Option<String>,
}

impl RecipeFilter {
    pub fn new(
        category: Option<String>,
        cuisine: Option<String>,
        dietary_restriction: Option<String>,
    ) -> Self {
        Self {
            category: non_blank(category),
            cuisine: non_blank(cuisine),
            dietary_restriction: non_blank(dietary_restriction),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RecipeFilterQuery {
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub dietary_restriction: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl RecipeFilterQuery {
    pub fn split(self) -> (RecipeFilter, Pagination) {
        (
            RecipeFilter::new(self.category, self.cuisine, self.dietary_restriction),
            Pagination {
                page: self.page,
                per_page: self.per_page,
            },
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeList {
    pub items: Vec<Recipe>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct IngredientSearchQuery {
    pub ingredient: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestrictionNamesQuery {
    /// Comma-separated dietary restriction names.
    pub names: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PopularQuery {
    pub category_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NutritionFieldsQuery {
    /// Comma-separated subset of `calories,proteins,fats`.
    pub fields: Option<String>,
}

/// Subset of a recipe's nutrition facts; unselected columns are omitted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionProjection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proteins: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fats: Option<i32>,
}

/// Metadata attached to a recipe; the shape the generator produces and
/// `save_recipe_details` persists.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    #[serde(rename = "category", default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientDetail>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub nutrition_facts: Option<NutritionInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngredientDetail {
    pub name: String,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub storage_temp: Option<i32>,
    #[serde(default)]
    pub shelf_life: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionInput {
    pub calories: i32,
    pub proteins: i32,
    pub fats: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DetailedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(flatten)]
    pub details: RecipeDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn form(user_id: &str, title: &str, description: &str, cooking_time: &str) -> RecipeForm {
        RecipeForm {
            user_id: user_id.into(),
            title: title.into(),
            description: description.into(),
            cooking_time: cooking_time.into(),
        }
    }

    #[test]
    fn valid_form_is_converted() {
        let recipe = form("3", " Pancakes ", "Fluffy.", "20").validate().unwrap();
        assert_eq!(
            recipe,
            NewRecipe {
                user_id: 3,
                title: "Pancakes".into(),
                description: "Fluffy.".into(),
                cooking_time: 20,
            }
        );
    }

    #[rstest]
    #[case(form("abc", "t", "d", "10"), "user_id", "Invalid user ID. Must be a number.")]
    #[case(form("1", "", "d", "10"), "title", "Title is required.")]
    #[case(form("1", "   ", "d", "10"), "title", "Title is required.")]
    #[case(form("1", "t", "", "10"), "description", "Description is required.")]
    #[case(form("1", "t", "d", "ten"), "cooking_time", "Cooking time must be a valid number.")]
    #[case(form("1", "t", "d", "-5"), "cooking_time", "Cooking time must be a valid number.")]
    #[case(form("1", "t", "d", "99999999999"), "cooking_time", "Cooking time must be a valid number.")]
    fn invalid_field_is_reported(
        #[case] form: RecipeForm,
        #[case] field: &str,
        #[case] message: &str,
    ) {
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(field), Some(&[message.to_string()][..]));
    }

    #[test]
    fn reports_every_failing_field() {
        let errors = RecipeForm::default().validate().unwrap_err();
        for field in ["user_id", "title", "description", "cooking_time"] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
    }

    #[rstest]
    #[case("  Soup  ", 0, Some("Soup"))]
    #[case("", 255, Some(""))]
    #[case("", 256, None)]
    #[case(" ", 0, None)]
    fn title_check_trims_and_bounds(
        #[case] raw: &str,
        #[case] pad: usize,
        #[case] expected: Option<&str>,
    ) {
        let raw = format!("{raw}{}", "x".repeat(pad));
        let mut errors = FieldErrors::default();
        let title = validate_title(&raw, &mut errors);
        let expected = expected.map(|t| format!("{t}{}", "x".repeat(pad)));
        assert_eq!(title, expected);
        assert_eq!(errors.get("title").is_some(), expected.is_none());
    }

    #[test]
    fn overlong_title_is_rejected() {
        let title = "x".repeat(256);
        let errors = form("1", &title, "d", "5").validate().unwrap_err();
        assert!(errors.get("title").is_some());
    }

    #[test]
    fn create_request_accepts_numeric_cooking_time() {
        let request: CreateRecipeRequest = serde_json::from_value(json!({
            "title": "Soup",
            "description": "Warm",
            "cooking_time": 45
        }))
        .unwrap();
        let form = request.into_form(9);
        assert_eq!(form.user_id, "9");
        assert_eq!(form.cooking_time, "45");
    }

    #[test]
    fn blank_filters_mean_unconstrained() {
        let filter = RecipeFilter::new(Some("  ".into()), None, Some(" Vegan ".into()));
        assert_eq!(filter.category, None);
        assert_eq!(filter.cuisine, None);
        assert_eq!(filter.dietary_restriction.as_deref(), Some("Vegan"));
    }

    #[test]
    fn details_use_generator_field_names() {
        let details: RecipeDetails = serde_json::from_value(json!({
            "category": ["Dessert"],
            "cuisines": ["French"],
            "dietaryRestrictions": ["Vegetarian"],
            "ingredients": [{ "name": "Milk", "allergens": ["Dairy"], "shelf_life": 5 }],
            "steps": ["Whisk"],
            "nutritionFacts": { "calories": 300, "proteins": 10, "fats": 10 }
        }))
        .unwrap();
        assert_eq!(details.categories, vec!["Dessert"]);
        assert_eq!(details.ingredients[0].shelf_life, Some(5));
        assert_eq!(details.ingredients[0].storage_temp, None);
        assert_eq!(details.nutrition_facts.map(|n| n.calories), Some(300));
    }
}
