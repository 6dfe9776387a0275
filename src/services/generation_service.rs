use sea_orm::TransactionTrait;
use serde_json::{Value, json};

use crate::{
    dto::{
        generation::{GeneratedSuggestions, RecipeSuggestion},
        recipes::{DetailedRecipe, RecipeDetails},
    },
    error::{AppError, AppResult},
    llm::{LlmError, OutputSchema},
    middleware::auth::AuthUser,
    models::Recipe,
    services::{
        lookup_service::{LookupNames, fetch_lookup_names},
        recipe_service::{
            detailed_recipe_exists, fetch_detailed_recipe, owned_recipe, save_recipe_details,
        },
    },
    state::AppState,
};

pub const SUGGESTION_SCHEMA: &str = "recipe_suggestions";
pub const DETAIL_SCHEMA: &str = "detailed_recipe";
const SUGGESTION_COUNT: usize = 3;

pub fn suggestion_schema() -> OutputSchema {
    OutputSchema::new(
        SUGGESTION_SCHEMA,
        json!({
            "type": "object",
            "properties": {
                "recipes": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "overview": { "type": "string" },
                            "cooking_time": { "type": "integer" },
                            "ingredients": { "type": "array", "items": { "type": "string" } }
                        },
                        "required": ["title", "overview", "cooking_time", "ingredients"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["recipes"],
            "additionalProperties": false
        }),
    )
}

pub fn suggestion_prompt(ingredients: &[String]) -> String {
    format!(
        "Based on the ingredients: {}, recommend {SUGGESTION_COUNT} recipes. \
         For each give a title, a one or two sentence overview, the cooking time \
         in minutes and the ingredients it uses.",
        ingredients.join(", ")
    )
}

/// String array restricted to `names`; unconstrained when the lookup table is empty.
fn name_array(names: &[String]) -> Value {
    if names.is_empty() {
        json!({ "type": "array", "items": { "type": "string" } })
    } else {
        json!({ "type": "array", "items": { "type": "string", "enum": names } })
    }
}

pub fn detail_schema(names: &LookupNames) -> OutputSchema {
    OutputSchema::new(
        DETAIL_SCHEMA,
        json!({
            "type": "object",
            "properties": {
                "category": name_array(&names.categories),
                "cuisines": name_array(&names.cuisines),
                "dietaryRestrictions": name_array(&names.dietary_restrictions),
                "ingredients": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "allergens": { "type": "array", "items": { "type": "string" } },
                            "storage_temp": { "type": ["integer", "null"] },
                            "shelf_life": { "type": ["integer", "null"] }
                        },
                        "required": ["name", "allergens", "storage_temp", "shelf_life"],
                        "additionalProperties": false
                    }
                },
                "steps": { "type": "array", "items": { "type": "string" } },
                "nutritionFacts": {
                    "anyOf": [
                        {
                            "type": "object",
                            "properties": {
                                "calories": { "type": "integer" },
                                "proteins": { "type": "integer" },
                                "fats": { "type": "integer" }
                            },
                            "required": ["calories", "proteins", "fats"],
                            "additionalProperties": false
                        },
                        { "type": "null" }
                    ]
                }
            },
            "required": [
                "category",
                "cuisines",
                "dietaryRestrictions",
                "ingredients",
                "steps",
                "nutritionFacts"
            ],
            "additionalProperties": false
        }),
    )
}

pub fn detail_prompt(recipe: &Recipe, names: &LookupNames) -> String {
    format!(
        "Provide detailed information for the recipe titled '{title}' ({description}).\n\
         Pick categories only from: {categories}.\n\
         Pick cuisines only from: {cuisines}.\n\
         Pick dietary restrictions only from: {restrictions}.\n\
         List every ingredient with its allergens, a storage temperature in Celsius \
         and, for perishable ingredients, a shelf life in days. Give the preparation \
         steps in order and estimate calories, proteins and fats per serving.",
        title = recipe.title,
        description = recipe.description,
        categories = names.categories.join(", "),
        cuisines = names.cuisines.join(", "),
        restrictions = names.dietary_restrictions.join(", "),
    )
}

/// Ask the completion service for recipe ideas; nothing is persisted.
pub async fn suggest_recipes(state: &AppState, ingredients: &[String]) -> AppResult<Vec<RecipeSuggestion>> {
    if ingredients.is_empty() {
        return Err(AppError::bad_request("Ingredients are required"));
    }

    tracing::info!(
        provider = state.llm.provider_name(),
        model = state.llm.model_name(),
        ingredients = ingredients.len(),
        "requesting recipe suggestions"
    );

    let value = state
        .llm
        .complete(&suggestion_prompt(ingredients), &suggestion_schema())
        .await?;

    let generated: GeneratedSuggestions =
        serde_json::from_value(value).map_err(|e| LlmError::ParseError(e.to_string()))?;

    Ok(to_suggestions(generated))
}

fn to_suggestions(generated: GeneratedSuggestions) -> Vec<RecipeSuggestion> {
    generated
        .recipes
        .into_iter()
        .take(SUGGESTION_COUNT)
        .enumerate()
        .map(|(index, recipe)| RecipeSuggestion {
            id: format!("recipe-{}", index + 1),
            title: recipe.title,
            description: recipe.overview,
            cooking_time: recipe.cooking_time,
            ingredients: recipe.ingredients,
        })
        .collect()
}

/// Generate, persist and return the full detail of one of the caller's recipes.
///
/// Stored details are returned as-is unless `refresh` is set. Generated
/// output is written in a single transaction.
pub async fn generate_recipe_details(
    state: &AppState,
    user: &AuthUser,
    recipe_id: i32,
    refresh: bool,
) -> AppResult<DetailedRecipe> {
    let recipe = owned_recipe(state, user, recipe_id).await?;

    if !refresh && detailed_recipe_exists(state, recipe_id).await? {
        tracing::debug!(recipe_id, "returning stored recipe details");
        return fetch_detailed_recipe(state, recipe_id).await;
    }

    let names = fetch_lookup_names(state).await?;

    tracing::info!(
        recipe_id,
        provider = state.llm.provider_name(),
        model = state.llm.model_name(),
        "requesting recipe details"
    );

    let value = state
        .llm
        .complete(&detail_prompt(&recipe, &names), &detail_schema(&names))
        .await?;

    let details: RecipeDetails =
        serde_json::from_value(value).map_err(|e| LlmError::ParseError(e.to_string()))?;

    let txn = state.orm.begin().await?;
    save_recipe_details(&txn, recipe_id, &details).await?;
    txn.commit().await?;

    tracing::info!(recipe_id, steps = details.steps.len(), "recipe details persisted");
    fetch_detailed_recipe(state, recipe_id).await
}
