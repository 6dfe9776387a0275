use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        generation::{RecipeSuggestion, SuggestionList},
        lookups::{
            AllergenList, CategoryList, CuisineList, DietaryRestrictionList, PerishableList,
            UserOptionNames,
        },
        recipes::{
            CreateRecipeRequest, CreatedRecipe, DeletedResponse, DetailedRecipe, IngredientDetail,
            NutritionInput, NutritionProjection, RecipeDetails, RecipeList, UpdateTitleRequest,
            UpdatedResponse,
        },
        reports::{CategoryCount, CategoryRestrictionCount, CuisineCount, PopularCuisine},
    },
    error::{ErrorBody, FieldErrors},
    models::{
        Allergen, Category, Cuisine, DietaryRestriction, Ingredient, NutritionFact,
        PerishableIngredient, Recipe, RecipeStep, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        auth, generate, health, ingredients, lookups, params, recipes, reports, seed,
    },
    services::seed_service::SeedSummary,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        recipes::list_recipes,
        recipes::create_recipe,
        recipes::delete_all_recipes,
        recipes::search_by_ingredient,
        recipes::by_dietary_restrictions,
        recipes::recent_recipes,
        recipes::popular_recipe,
        recipes::get_recipe,
        recipes::delete_recipe,
        recipes::update_title,
        recipes::save_details,
        recipes::nutrition,
        recipes::perishables,
        ingredients::allergens,
        lookups::categories,
        lookups::cuisines,
        lookups::dietary_restrictions,
        lookups::my_options,
        reports::recipes_by_category,
        reports::top_cuisine,
        reports::category_restrictions,
        reports::all_restrictions,
        reports::popular_cuisine,
        generate::suggest,
        generate::recipe_details,
        seed::seed
    ),
    components(
        schemas(
            User,
            Recipe,
            Category,
            Cuisine,
            DietaryRestriction,
            Ingredient,
            PerishableIngredient,
            Allergen,
            RecipeStep,
            NutritionFact,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateRecipeRequest,
            CreatedRecipe,
            UpdateTitleRequest,
            UpdatedResponse,
            DeletedResponse,
            RecipeList,
            RecipeDetails,
            IngredientDetail,
            NutritionInput,
            NutritionProjection,
            DetailedRecipe,
            CategoryList,
            CuisineList,
            DietaryRestrictionList,
            AllergenList,
            PerishableList,
            UserOptionNames,
            CategoryCount,
            CuisineCount,
            CategoryRestrictionCount,
            PopularCuisine,
            reports::CategoryCountList,
            reports::CategoryRestrictionCountList,
            RecipeSuggestion,
            SuggestionList,
            SeedSummary,
            params::Pagination,
            params::NutritionField,
            ErrorBody,
            FieldErrors,
            Meta,
            ApiResponse<Recipe>,
            ApiResponse<RecipeList>,
            ApiResponse<DetailedRecipe>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Recipes", description = "Recipe history, filtering and details"),
        (name = "Ingredients", description = "Ingredient endpoints"),
        (name = "Lookups", description = "Categories, cuisines and dietary restrictions"),
        (name = "Reports", description = "Aggregate statistics over the caller's recipes"),
        (name = "Generation", description = "Completion-backed recipe generation"),
        (name = "Seed", description = "Schema reset and demo data"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/recipes",
            "/api/recipes/{id}/details",
            "/api/reports/all-restrictions",
            "/api/generate/recipe-details",
            "/api/seed",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        assert!(
            doc.components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("bearer_auth"))
        );
    }
}
