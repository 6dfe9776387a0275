mod common;

use std::sync::Arc;

use nutrichef_api::{
    dto::recipes::{IngredientDetail, NutritionInput, NutritionProjection, RecipeDetails, RecipeFilter},
    error::AppError,
    llm::FakeProvider,
    routes::params::{NutritionField, Pagination},
    services::{
        recipe_service::{self, save_recipe_details},
        seed_service::seed_lookups,
    },
};
use sea_orm::TransactionTrait;

fn details(categories: &[&str], cuisines: &[&str], restrictions: &[&str]) -> RecipeDetails {
    RecipeDetails {
        categories: categories.iter().map(|s| s.to_string()).collect(),
        cuisines: cuisines.iter().map(|s| s.to_string()).collect(),
        dietary_restrictions: restrictions.iter().map(|s| s.to_string()).collect(),
        ingredients: vec![
            IngredientDetail {
                name: "Fresh Basil".into(),
                allergens: vec![],
                storage_temp: Some(10),
                shelf_life: Some(5),
            },
            IngredientDetail {
                name: "Parmesan".into(),
                allergens: vec!["Dairy".into()],
                storage_temp: Some(4),
                shelf_life: Some(60),
            },
            IngredientDetail {
                name: "Pine Nuts".into(),
                allergens: vec!["Tree Nuts".into()],
                storage_temp: Some(20),
                shelf_life: None,
            },
        ],
        steps: vec!["Toast the nuts.".into(), "Blend everything.".into()],
        nutrition_facts: Some(NutritionInput {
            calories: 410,
            proteins: 12,
            fats: 36,
        }),
    }
}

// Repository flow: details upsert, filtering, search, projections and cascade delete.
#[tokio::test]
async fn recipe_repository_flow() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Arc::new(FakeProvider::new())).await? else {
        return Ok(());
    };
    seed_lookups(&state.orm).await?;

    let owner = common::create_user(&state, "owner@example.com").await?;
    let other = common::create_user(&state, "other@example.com").await?;

    let pesto = common::create_recipe(&state, owner, "Pesto Pasta").await?;
    let salad = common::create_recipe(&state, owner, "Greek Salad").await?;
    let stew = common::create_recipe(&state, other, "Beef Stew").await?;

    // Idempotent details upsert
    let pesto_details = details(&["Main Dish"], &["Italian"], &["Vegetarian", "Gluten-Free"]);
    save_recipe_details(&state.orm, pesto, &pesto_details).await?;
    let snapshot = [
        common::count(&state, "recipe_categories", pesto).await?,
        common::count(&state, "recipe_cuisines", pesto).await?,
        common::count(&state, "recipe_dietary_restrictions", pesto).await?,
        common::count(&state, "recipe_ingredients", pesto).await?,
        common::count(&state, "recipe_steps", pesto).await?,
        common::count(&state, "nutrition_facts", pesto).await?,
        common::count_all(&state, "ingredients").await?,
        common::count_all(&state, "allergens").await?,
        common::count_all(&state, "ingredient_allergens").await?,
        common::count_all(&state, "perishable_ingredients").await?,
    ];
    assert_eq!(snapshot, [1, 1, 2, 3, 2, 1, 3, 2, 2, 2]);

    save_recipe_details(&state.orm, pesto, &pesto_details).await?;
    let again = [
        common::count(&state, "recipe_categories", pesto).await?,
        common::count(&state, "recipe_cuisines", pesto).await?,
        common::count(&state, "recipe_dietary_restrictions", pesto).await?,
        common::count(&state, "recipe_ingredients", pesto).await?,
        common::count(&state, "recipe_steps", pesto).await?,
        common::count(&state, "nutrition_facts", pesto).await?,
        common::count_all(&state, "ingredients").await?,
        common::count_all(&state, "allergens").await?,
        common::count_all(&state, "ingredient_allergens").await?,
        common::count_all(&state, "perishable_ingredients").await?,
    ];
    assert_eq!(snapshot, again);

    save_recipe_details(&state.orm, salad, &details(&["Salad"], &["Greek"], &["Vegetarian"])).await?;
    save_recipe_details(&state.orm, stew, &details(&["Main Dish"], &["Italian"], &["Vegetarian"])).await?;

    // Unknown lookup names are rejected before anything is written
    let ingredients_before = common::count_all(&state, "ingredients").await?;
    let bogus = common::create_recipe(&state, owner, "Mystery Dish").await?;
    let mut bad = details(&["Brunch"], &["Italian"], &["Vegetarian"]);
    bad.ingredients[0].name = "Saffron".into();
    let txn = state.orm.begin().await?;
    let err = save_recipe_details(&txn, bogus, &bad).await.unwrap_err();
    txn.rollback().await?;
    match err {
        AppError::Validation(errors) => assert!(errors.get("category").is_some()),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(common::count(&state, "recipe_cuisines", bogus).await?, 0);
    assert_eq!(common::count(&state, "recipe_steps", bogus).await?, 0);
    assert_eq!(common::count_all(&state, "ingredients").await?, ingredients_before);

    // Filter composition
    let all = recipe_service::fetch_filtered_recipes(&state, owner, &RecipeFilter::default()).await?;
    assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![pesto, salad, bogus]);

    let vegetarian = RecipeFilter::new(None, None, Some("Vegetarian".into()));
    let found = recipe_service::fetch_filtered_recipes(&state, owner, &vegetarian).await?;
    assert_eq!(found.iter().map(|r| r.id).collect::<Vec<_>>(), vec![pesto, salad]);

    let all_three = RecipeFilter::new(
        Some("Main Dish".into()),
        Some("Italian".into()),
        Some("Gluten-Free".into()),
    );
    let found = recipe_service::fetch_filtered_recipes(&state, owner, &all_three).await?;
    assert_eq!(found.iter().map(|r| r.id).collect::<Vec<_>>(), vec![pesto]);

    let mismatch = RecipeFilter::new(Some("Salad".into()), Some("Italian".into()), None);
    assert!(recipe_service::fetch_filtered_recipes(&state, owner, &mismatch).await?.is_empty());

    let page = recipe_service::list_recipes(
        &state,
        owner,
        &RecipeFilter::default(),
        Pagination {
            page: Some(2),
            per_page: Some(2),
        },
    )
    .await?;
    assert_eq!(page.data.as_ref().map(|d| d.items.len()), Some(1));
    assert_eq!(page.meta.as_ref().and_then(|m| m.total), Some(3));

    // Restriction-name division over the given names
    let both = recipe_service::fetch_recipes_by_dietary_restrictions(
        &state,
        owner,
        &["Vegetarian".into(), "Gluten-Free".into(), "Vegetarian".into()],
    )
    .await?;
    assert_eq!(both.iter().map(|r| r.id).collect::<Vec<_>>(), vec![pesto]);

    // Ingredient search is case-insensitive and spans owners
    let found = recipe_service::fetch_recipes_by_ingredient(&state, "parMESan").await?;
    assert_eq!(found.iter().map(|r| r.id).collect::<Vec<_>>(), vec![pesto, salad, stew]);
    assert!(recipe_service::fetch_recipes_by_ingredient(&state, "%").await?.is_empty());

    // Projections and detail reads
    let projection = recipe_service::fetch_custom_nutrition_facts(
        &state,
        pesto,
        &[NutritionField::Calories, NutritionField::Fats],
    )
    .await?;
    assert_eq!(
        projection,
        Some(NutritionProjection {
            calories: Some(410),
            proteins: None,
            fats: Some(36),
        })
    );
    assert_eq!(recipe_service::fetch_custom_nutrition_facts(&state, pesto, &[]).await?, None);

    let detailed = recipe_service::fetch_detailed_recipe(&state, pesto).await?;
    assert_eq!(detailed.details.categories, vec!["Main Dish"]);
    assert_eq!(detailed.details.steps, vec!["Toast the nuts.", "Blend everything."]);
    let parmesan = detailed
        .details
        .ingredients
        .iter()
        .find(|i| i.name == "Parmesan")
        .expect("parmesan");
    assert_eq!(parmesan.allergens, vec!["Dairy"]);
    assert_eq!(parmesan.shelf_life, Some(60));
    assert!(recipe_service::detailed_recipe_exists(&state, pesto).await?);
    assert!(!recipe_service::detailed_recipe_exists(&state, bogus).await?);

    let ingredients = recipe_service::fetch_recipe_ingredients(&state, pesto).await?;
    assert_eq!(
        ingredients.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
        vec!["Fresh Basil", "Parmesan", "Pine Nuts"]
    );
    let parmesan_id = ingredients[1].id;
    let allergens = recipe_service::fetch_allergens(&state, parmesan_id).await?;
    assert_eq!(allergens.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(), vec!["Dairy"]);
    let steps = recipe_service::fetch_recipe_steps(&state, pesto).await?;
    assert_eq!(steps.iter().map(|s| s.step_num).collect::<Vec<_>>(), vec![1, 2]);
    let facts = recipe_service::fetch_nutrition_facts(&state, pesto).await?.expect("facts");
    assert_eq!((facts.calories, facts.proteins, facts.fats), (410, 12, 36));

    let perishables = recipe_service::fetch_perishable_ingredients(&state, pesto).await?;
    assert_eq!(
        perishables.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Fresh Basil", "Parmesan"]
    );

    // Title updates report whether a row changed
    assert!(recipe_service::update_recipe_title(&state, pesto, "Basil Pesto").await?);
    assert!(!recipe_service::update_recipe_title(&state, 999_999, "Ghost").await?);
    assert_eq!(recipe_service::fetch_recipe(&state, pesto).await?.title, "Basil Pesto");
    assert!(matches!(
        recipe_service::update_recipe_title(&state, pesto, &"x".repeat(256)).await,
        Err(AppError::Validation(errors)) if errors.get("title").is_some()
    ));
    assert_eq!(recipe_service::fetch_recipe(&state, pesto).await?.title, "Basil Pesto");

    // Cascade delete keeps shared lookup rows
    assert!(matches!(
        recipe_service::delete_recipe(&state, 0).await,
        Err(AppError::BadRequest(_))
    ));
    let ingredients = common::count_all(&state, "ingredients").await?;
    assert!(recipe_service::delete_recipe(&state, pesto).await?);
    for table in [
        "recipe_categories",
        "recipe_cuisines",
        "recipe_dietary_restrictions",
        "recipe_ingredients",
        "recipe_steps",
        "nutrition_facts",
    ] {
        assert_eq!(common::count(&state, table, pesto).await?, 0, "{table}");
    }
    assert_eq!(common::count_all(&state, "ingredients").await?, ingredients);
    assert_eq!(common::count_all(&state, "categories").await?, 10);
    assert!(matches!(
        recipe_service::fetch_recipe(&state, pesto).await,
        Err(AppError::NotFound(_))
    ));

    assert_eq!(recipe_service::delete_all_recipes(&state, owner).await?, 2);
    assert_eq!(recipe_service::fetch_recipes_by_user(&state, other).await?.len(), 1);

    Ok(())
}
