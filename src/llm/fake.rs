//! Deterministic provider for tests and offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{LlmError, LlmProvider, OutputSchema};

/// Returns canned JSON for prompts or schema names containing a registered key.
///
/// Keys are matched case-insensitively in registration order; the first hit wins.
#[derive(Debug, Default)]
pub struct FakeProvider {
    responses: Vec<(String, Result<Value, String>)>,
    default_response: Option<Value>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, key: &str, response: Value) -> Self {
        self.responses.push((key.to_lowercase(), Ok(response)));
        self
    }

    /// Make prompts matching `key` fail as if the upstream returned an error.
    pub fn with_failure(mut self, key: &str, message: &str) -> Self {
        self.responses
            .push((key.to_lowercase(), Err(message.to_string())));
        self
    }

    pub fn with_default_response(mut self, response: Value) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Number of completions requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Canned answers for both generation schemas, using seeded lookup names.
    pub fn with_recipe_responses() -> Self {
        Self::new()
            .with_response(
                "recipe_suggestions",
                json!({
                    "recipes": [
                        {
                            "title": "Garlic Butter Pasta",
                            "overview": "Spaghetti tossed in browned garlic butter.",
                            "cooking_time": 20,
                            "ingredients": ["spaghetti", "garlic", "butter"]
                        },
                        {
                            "title": "Tomato Bruschetta",
                            "overview": "Toasted bread topped with fresh tomato.",
                            "cooking_time": 15,
                            "ingredients": ["bread", "tomato", "basil"]
                        },
                        {
                            "title": "Vegetable Stir Fry",
                            "overview": "Crisp vegetables in a soy glaze.",
                            "cooking_time": 25,
                            "ingredients": ["broccoli", "carrot", "soy sauce"]
                        }
                    ]
                }),
            )
            .with_response(
                "detailed_recipe",
                json!({
                    "category": ["Main Dish"],
                    "cuisines": ["Italian"],
                    "dietaryRestrictions": ["Vegetarian"],
                    "ingredients": [
                        { "name": "Spaghetti", "allergens": ["Gluten"], "storage_temp": 20, "shelf_life": null },
                        { "name": "Butter", "allergens": ["Dairy"], "storage_temp": 4, "shelf_life": 30 }
                    ],
                    "steps": [
                        "Boil the spaghetti in salted water.",
                        "Brown the butter with sliced garlic.",
                        "Toss the pasta in the butter and serve."
                    ],
                    "nutritionFacts": { "calories": 520, "proteins": 14, "fats": 22 }
                }),
            )
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str, schema: &OutputSchema) -> Result<Value, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let prompt = prompt.to_lowercase();
        let schema_name = schema.name.to_lowercase();
        // Prompt matches take precedence over the schema name.
        let hit = self
            .responses
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
            .or_else(|| self.responses.iter().find(|(key, _)| schema_name == *key));

        match (hit, &self.default_response) {
            (Some((_, Ok(value))), _) => Ok(value.clone()),
            (Some((_, Err(message))), _) => Err(LlmError::ApiError {
                status: 500,
                message: message.clone(),
            }),
            (None, Some(value)) => Ok(value.clone()),
            (None, None) => Err(LlmError::RequestFailed(format!(
                "FakeProvider: no response configured for schema {}",
                schema.name
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(name: &'static str) -> OutputSchema {
        OutputSchema::new(name, json!({ "type": "object" }))
    }

    #[tokio::test]
    async fn matches_prompt_case_insensitively() {
        let provider = FakeProvider::new().with_response("PASTA", json!({ "ok": true }));
        let value = provider.complete("make pasta", &schema("x")).await.unwrap();
        assert_eq!(value, json!({ "ok": true }));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn matches_schema_name() {
        let provider = FakeProvider::with_recipe_responses();
        let value = provider
            .complete("anything", &schema("detailed_recipe"))
            .await
            .unwrap();
        assert_eq!(value["category"][0], "Main Dish");
    }

    #[tokio::test]
    async fn prompt_match_wins_over_schema_name() {
        let provider = FakeProvider::with_recipe_responses().with_response("soup", json!({ "soup": 1 }));
        let value = provider
            .complete("Details for Miso Soup", &schema("detailed_recipe"))
            .await
            .unwrap();
        assert_eq!(value, json!({ "soup": 1 }));
    }

    #[tokio::test]
    async fn configured_failure_is_an_api_error() {
        let provider = FakeProvider::new().with_failure("boom", "upstream down");
        let err = provider.complete("boom", &schema("x")).await.unwrap_err();
        assert!(matches!(err, LlmError::ApiError { status: 500, .. }));
    }

    #[tokio::test]
    async fn falls_back_to_default_or_errors() {
        let provider = FakeProvider::new();
        assert!(provider.complete("hello", &schema("x")).await.is_err());

        let provider = FakeProvider::new().with_default_response(json!([]));
        assert_eq!(provider.complete("hello", &schema("x")).await.unwrap(), json!([]));
    }
}
