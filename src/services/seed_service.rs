use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    db::execute_script,
    dto::recipes::{IngredientDetail, NutritionInput, RecipeDetails},
    entity::{Categories, Cuisines, DietaryRestrictions, Users, categories, cuisines, dietary_restrictions, recipes, users},
    error::{AppError, AppResult},
    seed_data::{CATEGORIES, CUISINES, DEMO_USER_EMAIL, DEMO_USER_PASSWORD, DIETARY_RESTRICTIONS},
    services::{auth_service::hash_password, recipe_service::save_recipe_details},
    state::AppState,
};

const SCHEMA_SQL: &str = include_str!("../../migrations/20241101000000_init.sql");

/// Dependents first so every drop succeeds without relying on CASCADE ordering.
const APP_TABLES: &[&str] = &[
    "ingredient_allergens",
    "perishable_ingredients",
    "recipe_ingredients",
    "recipe_steps",
    "nutrition_facts",
    "recipe_dietary_restrictions",
    "recipe_cuisines",
    "recipe_categories",
    "allergens",
    "dietary_restrictions",
    "cuisines",
    "categories",
    "ingredients",
    "recipes",
    "users",
];

#[derive(Debug, Serialize, ToSchema)]
pub struct SeedSummary {
    pub categories: usize,
    pub cuisines: usize,
    pub dietary_restrictions: usize,
    pub demo_user_id: i32,
    pub demo_recipes: usize,
}

/// Insert the fixed lookup rows; existing names are left alone.
pub async fn seed_lookups<C: ConnectionTrait>(conn: &C) -> AppResult<()> {
    Categories::insert_many(CATEGORIES.iter().map(|name| categories::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
    }))
    .on_conflict(
        OnConflict::column(categories::Column::Name)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;

    Cuisines::insert_many(CUISINES.iter().map(|name| cuisines::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
    }))
    .on_conflict(
        OnConflict::column(cuisines::Column::Name)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;

    DietaryRestrictions::insert_many(DIETARY_RESTRICTIONS.iter().map(|(name, description)| {
        dietary_restrictions::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
        }
    }))
    .on_conflict(
        OnConflict::column(dietary_restrictions::Column::Name)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;

    Ok(())
}

/// Create the demo account if missing and return its id.
pub async fn ensure_demo_user<C: ConnectionTrait>(conn: &C) -> AppResult<i32> {
    if let Some(user) = Users::find()
        .filter(users::Column::Email.eq(DEMO_USER_EMAIL))
        .one(conn)
        .await?
    {
        return Ok(user.id);
    }

    let user = users::ActiveModel {
        id: NotSet,
        email: Set(DEMO_USER_EMAIL.to_string()),
        password: Set(hash_password(DEMO_USER_PASSWORD)?),
    }
    .insert(conn)
    .await?;
    Ok(user.id)
}

struct DemoRecipe {
    title: &'static str,
    description: &'static str,
    cooking_time: i32,
    popularity: i32,
    details: RecipeDetails,
}

fn ingredient(name: &str, allergens: &[&str], storage_temp: i32, shelf_life: Option<i32>) -> IngredientDetail {
    IngredientDetail {
        name: name.to_string(),
        allergens: allergens.iter().map(|a| a.to_string()).collect(),
        storage_temp: Some(storage_temp),
        shelf_life,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn demo_recipes() -> Vec<DemoRecipe> {
    vec![
        DemoRecipe {
            title: "Margherita Pizza",
            description: "Thin crust pizza with tomato, mozzarella and basil.",
            cooking_time: 35,
            popularity: 8,
            details: RecipeDetails {
                categories: strings(&["Main Dish", "Bread"]),
                cuisines: strings(&["Italian"]),
                dietary_restrictions: strings(&["Vegetarian"]),
                ingredients: vec![
                    ingredient("Pizza Dough", &["Gluten"], 4, Some(3)),
                    ingredient("Tomato Sauce", &[], 4, Some(7)),
                    ingredient("Mozzarella", &["Dairy"], 4, Some(14)),
                    ingredient("Basil", &[], 10, Some(5)),
                ],
                steps: strings(&[
                    "Preheat the oven to 250C.",
                    "Stretch the dough and spread the sauce.",
                    "Top with mozzarella and bake for 10 minutes.",
                    "Finish with fresh basil.",
                ]),
                nutrition_facts: Some(NutritionInput {
                    calories: 780,
                    proteins: 32,
                    fats: 28,
                }),
            },
        },
        DemoRecipe {
            title: "Chickpea Curry",
            description: "Creamy coconut curry with chickpeas and spinach.",
            cooking_time: 30,
            popularity: 5,
            details: RecipeDetails {
                categories: strings(&["Main Dish"]),
                cuisines: strings(&["Indian"]),
                dietary_restrictions: strings(&["Vegan", "Vegetarian", "Gluten-Free"]),
                ingredients: vec![
                    ingredient("Chickpeas", &[], 20, None),
                    ingredient("Coconut Milk", &["Tree Nuts"], 20, None),
                    ingredient("Spinach", &[], 4, Some(5)),
                    ingredient("Onion", &[], 20, None),
                ],
                steps: strings(&[
                    "Soften the onion with curry spices.",
                    "Add chickpeas and coconut milk and simmer for 15 minutes.",
                    "Stir in the spinach until wilted.",
                ]),
                nutrition_facts: Some(NutritionInput {
                    calories: 540,
                    proteins: 17,
                    fats: 30,
                }),
            },
        },
        DemoRecipe {
            title: "Miso Soup",
            description: "Light soup of dashi, miso, tofu and wakame.",
            cooking_time: 15,
            popularity: 3,
            details: RecipeDetails {
                categories: strings(&["Soup", "Side Dish"]),
                cuisines: strings(&["Japanese"]),
                dietary_restrictions: strings(&["Low-Calorie", "Low-Fat"]),
                ingredients: vec![
                    ingredient("Dashi", &["Fish"], 4, Some(3)),
                    ingredient("Miso Paste", &["Soy"], 4, Some(180)),
                    ingredient("Tofu", &["Soy"], 4, Some(5)),
                    ingredient("Wakame", &[], 20, None),
                ],
                steps: strings(&[
                    "Warm the dashi without boiling.",
                    "Dissolve the miso paste into the broth.",
                    "Add cubed tofu and wakame and serve.",
                ]),
                nutrition_facts: Some(NutritionInput {
                    calories: 90,
                    proteins: 7,
                    fats: 3,
                }),
            },
        },
    ]
}

/// Drop and recreate every application table, then load lookups and demo data.
///
/// Runs in one transaction: on failure the previous schema and rows remain.
pub async fn reset_and_seed(state: &AppState) -> AppResult<SeedSummary> {
    let txn = state.orm.begin().await?;

    for table in APP_TABLES {
        txn.execute_unprepared(&format!("DROP TABLE IF EXISTS {table} CASCADE"))
            .await?;
    }
    execute_script(&txn, SCHEMA_SQL).await?;

    seed_lookups(&txn).await?;
    let demo_user_id = ensure_demo_user(&txn).await?;

    let demos = demo_recipes();
    for demo in &demos {
        let recipe = recipes::ActiveModel {
            id: NotSet,
            user_id: Set(demo_user_id),
            title: Set(demo.title.to_string()),
            description: Set(demo.description.to_string()),
            cooking_time: Set(demo.cooking_time),
            popularity: Set(demo.popularity),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        save_recipe_details(&txn, recipe.id, &demo.details).await?;
    }

    txn.commit().await?;

    let summary = SeedSummary {
        categories: CATEGORIES.len(),
        cuisines: CUISINES.len(),
        dietary_restrictions: DIETARY_RESTRICTIONS.len(),
        demo_user_id,
        demo_recipes: demos.len(),
    };
    tracing::info!(?summary, "database reset and seeded");
    Ok(summary)
}

/// Reset is destructive; only allowed when explicitly enabled.
pub fn ensure_seed_allowed(state: &AppState) -> AppResult<()> {
    if !state.config.allow_seed_endpoint {
        tracing::warn!("seed endpoint called while disabled");
        return Err(AppError::Forbidden);
    }
    Ok(())
}
