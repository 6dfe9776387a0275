use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use crate::{
    dto::recipes::{
        DetailedRecipe, IngredientDetail, NutritionInput, NutritionProjection, RecipeDetails,
        RecipeFilter, RecipeForm, RecipeList, validate_title,
    },
    entity::{
        Allergens, Categories, Cuisines, DietaryRestrictions, IngredientAllergens, Ingredients,
        NutritionFacts, PerishableIngredients, RecipeCategories, RecipeCuisines,
        RecipeDietaryRestrictions, RecipeIngredients, RecipeSteps, Recipes, allergens, categories,
        cuisines, dietary_restrictions, ingredient_allergens, ingredients, nutrition_facts,
        perishable_ingredients, recipe_categories, recipe_cuisines, recipe_dietary_restrictions,
        recipe_ingredients, recipe_steps,
        recipes::{self, ActiveModel as RecipeActive, Column as RecipeCol, Model as RecipeModel},
    },
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_owner},
    models::{Allergen, Ingredient, NutritionFact, PerishableIngredient, Recipe, RecipeStep},
    response::ApiResponse,
    routes::params::{NutritionField, Pagination},
    state::AppState,
};

/// Validate the form and insert it as a recipe owned by `user`.
pub async fn insert_recipe(state: &AppState, user: &AuthUser, form: &RecipeForm) -> AppResult<i32> {
    let recipe = form.validate().map_err(AppError::Validation)?;
    ensure_owner(user, recipe.user_id)?;

    let model = RecipeActive {
        id: NotSet,
        user_id: Set(recipe.user_id),
        title: Set(recipe.title),
        description: Set(recipe.description),
        cooking_time: Set(recipe.cooking_time),
        popularity: NotSet,
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(recipe_id = model.id, user_id = model.user_id, "recipe inserted");
    Ok(model.id)
}

/// Returns whether a row was changed.
pub async fn update_recipe_title(state: &AppState, recipe_id: i32, new_title: &str) -> AppResult<bool> {
    let mut errors = FieldErrors::default();
    let Some(new_title) = validate_title(new_title, &mut errors) else {
        return Err(AppError::Validation(errors));
    };

    let result = Recipes::update_many()
        .col_expr(RecipeCol::Title, Expr::value(new_title))
        .filter(RecipeCol::Id.eq(recipe_id))
        .exec(&state.orm)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Dependent rows (steps, join rows, nutrition facts) go with the recipe via cascading keys.
pub async fn delete_recipe(state: &AppState, recipe_id: i32) -> AppResult<bool> {
    if recipe_id <= 0 {
        return Err(AppError::bad_request("Recipe ID is required."));
    }

    let result = Recipes::delete_by_id(recipe_id).exec(&state.orm).await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete_all_recipes(state: &AppState, user_id: i32) -> AppResult<u64> {
    let result = Recipes::delete_many()
        .filter(RecipeCol::UserId.eq(user_id))
        .exec(&state.orm)
        .await?;
    Ok(result.rows_affected)
}

pub async fn fetch_recipe(state: &AppState, recipe_id: i32) -> AppResult<Recipe> {
    Recipes::find_by_id(recipe_id)
        .one(&state.orm)
        .await?
        .map(recipe_from_entity)
        .ok_or_else(|| AppError::not_found("Recipe not found"))
}

/// Fetch a recipe and check it belongs to `user`.
pub async fn owned_recipe(state: &AppState, user: &AuthUser, recipe_id: i32) -> AppResult<Recipe> {
    let recipe = fetch_recipe(state, recipe_id).await?;
    ensure_owner(user, recipe.user_id)?;
    Ok(recipe)
}

pub async fn fetch_recipes_by_user(state: &AppState, user_id: i32) -> AppResult<Vec<Recipe>> {
    let items = Recipes::find()
        .filter(RecipeCol::UserId.eq(user_id))
        .order_by_asc(RecipeCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(recipe_from_entity)
        .collect();
    Ok(items)
}

/// Owner-scoped recipe query; each present filter adds an inner join to its
/// lookup table and a bound equality predicate on the name.
pub fn filtered_recipes_query(user_id: i32, filter: &RecipeFilter) -> Select<Recipes> {
    let mut select = Recipes::find().filter(RecipeCol::UserId.eq(user_id));

    if let Some(category) = &filter.category {
        select = select
            .join(JoinType::InnerJoin, recipes::Relation::RecipeCategories.def())
            .join(JoinType::InnerJoin, recipe_categories::Relation::Categories.def())
            .filter(categories::Column::Name.eq(category.as_str()));
    }

    if let Some(cuisine) = &filter.cuisine {
        select = select
            .join(JoinType::InnerJoin, recipes::Relation::RecipeCuisines.def())
            .join(JoinType::InnerJoin, recipe_cuisines::Relation::Cuisines.def())
            .filter(cuisines::Column::Name.eq(cuisine.as_str()));
    }

    if let Some(restriction) = &filter.dietary_restriction {
        select = select
            .join(
                JoinType::InnerJoin,
                recipes::Relation::RecipeDietaryRestrictions.def(),
            )
            .join(
                JoinType::InnerJoin,
                recipe_dietary_restrictions::Relation::DietaryRestrictions.def(),
            )
            .filter(dietary_restrictions::Column::Name.eq(restriction.as_str()));
    }

    select.distinct().order_by_asc(RecipeCol::Id)
}

pub async fn fetch_filtered_recipes(
    state: &AppState,
    user_id: i32,
    filter: &RecipeFilter,
) -> AppResult<Vec<Recipe>> {
    let items = filtered_recipes_query(user_id, filter)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(recipe_from_entity)
        .collect();
    Ok(items)
}

pub async fn list_recipes(
    state: &AppState,
    user_id: i32,
    filter: &RecipeFilter,
    pagination: Pagination,
) -> AppResult<ApiResponse<RecipeList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = filtered_recipes_query(user_id, filter);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(recipe_from_entity)
        .collect();

    Ok(ApiResponse::paged("Recipes", RecipeList { items }, page, limit, total))
}

/// Case-insensitive substring match on ingredient names across all recipes.
pub async fn fetch_recipes_by_ingredient(state: &AppState, term: &str) -> AppResult<Vec<Recipe>> {
    let term = term.trim();
    if term.is_empty() {
        return Err(AppError::bad_request("Ingredient name is required"));
    }

    let recipes = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT DISTINCT r.id, r.user_id, r.title, r.description, r.cooking_time, r.popularity, r.created_at
        FROM recipes r
        JOIN recipe_ingredients ri ON r.id = ri.recipe_id
        JOIN ingredients i ON ri.ingredient_id = i.id
        WHERE i.name ILIKE '%' || $1 || '%'
        ORDER BY r.id
        "#,
    )
    .bind(escape_like(term))
    .fetch_all(&state.pool)
    .await?;

    Ok(recipes)
}

/// Recipes of `user_id` tagged with every one of the given restriction names.
pub async fn fetch_recipes_by_dietary_restrictions(
    state: &AppState,
    user_id: i32,
    names: &[String],
) -> AppResult<Vec<Recipe>> {
    let names: Vec<String> = names
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let recipes = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT r.id, r.user_id, r.title, r.description, r.cooking_time, r.popularity, r.created_at
        FROM recipes r
        JOIN recipe_dietary_restrictions rdr ON r.id = rdr.recipe_id
        JOIN dietary_restrictions dr ON rdr.dietary_id = dr.id
        WHERE r.user_id = $1 AND dr.name = ANY($2)
        GROUP BY r.id
        HAVING COUNT(DISTINCT dr.name) = $3
        ORDER BY r.id
        "#,
    )
    .bind(user_id)
    .bind(&names)
    .bind(names.len() as i64)
    .fetch_all(&state.pool)
    .await?;

    Ok(recipes)
}

pub async fn fetch_recent_recipes(state: &AppState, limit: Option<i64>) -> AppResult<Vec<Recipe>> {
    let limit = limit.unwrap_or(10).clamp(1, 100);
    let items = Recipes::find()
        .order_by_desc(RecipeCol::CreatedAt)
        .order_by_desc(RecipeCol::Id)
        .limit(limit as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(recipe_from_entity)
        .collect();
    Ok(items)
}

pub async fn fetch_popular_recipe(state: &AppState, category_id: i32) -> AppResult<Recipe> {
    let recipe = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT r.id, r.user_id, r.title, r.description, r.cooking_time, r.popularity, r.created_at
        FROM recipes r
        JOIN recipe_categories rc ON r.id = rc.recipe_id
        WHERE rc.category_id = $1
        ORDER BY r.popularity DESC, r.id
        LIMIT 1
        "#,
    )
    .bind(category_id)
    .fetch_optional(&state.pool)
    .await?;

    recipe.ok_or_else(|| AppError::not_found("No recipes found for this category"))
}

/// A recipe counts as detailed once it has at least one step.
pub async fn detailed_recipe_exists(state: &AppState, recipe_id: i32) -> AppResult<bool> {
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM recipe_steps WHERE recipe_id = $1)")
            .bind(recipe_id)
            .fetch_one(&state.pool)
            .await?;
    Ok(exists.0)
}

pub async fn fetch_recipe_steps(state: &AppState, recipe_id: i32) -> AppResult<Vec<RecipeStep>> {
    let steps = RecipeSteps::find()
        .filter(recipe_steps::Column::RecipeId.eq(recipe_id))
        .order_by_asc(recipe_steps::Column::StepNum)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|s| RecipeStep {
            recipe_id: s.recipe_id,
            step_num: s.step_num,
            description: s.description,
        })
        .collect();
    Ok(steps)
}

pub async fn fetch_nutrition_facts(state: &AppState, recipe_id: i32) -> AppResult<Option<NutritionFact>> {
    let fact = NutritionFacts::find()
        .filter(nutrition_facts::Column::RecipeId.eq(recipe_id))
        .one(&state.orm)
        .await?
        .map(|n| NutritionFact {
            nutrition_id: n.nutrition_id,
            recipe_id: n.recipe_id,
            calories: n.calories,
            proteins: n.proteins,
            fats: n.fats,
        });
    Ok(fact)
}

/// Project only the requested nutrition columns; an empty selection yields `None`.
pub async fn fetch_custom_nutrition_facts(
    state: &AppState,
    recipe_id: i32,
    fields: &[NutritionField],
) -> AppResult<Option<NutritionProjection>> {
    if fields.is_empty() {
        return Ok(None);
    }

    let mut select = NutritionFacts::find().select_only();
    for field in fields {
        select = select.column(field.column());
    }

    let row = select
        .filter(nutrition_facts::Column::RecipeId.eq(recipe_id))
        .into_json()
        .one(&state.orm)
        .await?;

    row.map(serde_json::from_value::<NutritionProjection>)
        .transpose()
        .map_err(|e| AppError::Internal(e.into()))
}

pub async fn fetch_recipe_ingredients(state: &AppState, recipe_id: i32) -> AppResult<Vec<Ingredient>> {
    let rows = sqlx::query_as::<_, Ingredient>(
        r#"
        SELECT i.id, i.name, i.storage_temp
        FROM ingredients i
        JOIN recipe_ingredients ri ON i.id = ri.ingredient_id
        WHERE ri.recipe_id = $1
        ORDER BY i.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(rows)
}

pub async fn fetch_perishable_ingredients(
    state: &AppState,
    recipe_id: i32,
) -> AppResult<Vec<PerishableIngredient>> {
    let rows = sqlx::query_as::<_, PerishableIngredient>(
        r#"
        SELECT i.id, i.name, i.storage_temp, pi.shelf_life
        FROM ingredients i
        JOIN recipe_ingredients ri ON i.id = ri.ingredient_id
        JOIN perishable_ingredients pi ON i.id = pi.id
        WHERE ri.recipe_id = $1
        ORDER BY pi.shelf_life, i.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(rows)
}

pub async fn fetch_allergens(state: &AppState, ingredient_id: i32) -> AppResult<Vec<Allergen>> {
    let rows = sqlx::query_as::<_, Allergen>(
        r#"
        SELECT a.id, a.name
        FROM allergens a
        JOIN ingredient_allergens ia ON a.id = ia.allergen_id
        WHERE ia.ingredient_id = $1
        ORDER BY a.name
        "#,
    )
    .bind(ingredient_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(rows)
}

#[derive(Debug, sqlx::FromRow)]
struct IngredientRow {
    id: i32,
    name: String,
    storage_temp: Option<i32>,
    shelf_life: Option<i32>,
}

/// Recipe plus every piece of attached metadata.
pub async fn fetch_detailed_recipe(state: &AppState, recipe_id: i32) -> AppResult<DetailedRecipe> {
    let recipe = fetch_recipe(state, recipe_id).await?;

    let categories: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT c.name FROM categories c
        JOIN recipe_categories rc ON c.id = rc.category_id
        WHERE rc.recipe_id = $1
        ORDER BY c.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(&state.pool)
    .await?;

    let cuisines: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT cu.name FROM cuisines cu
        JOIN recipe_cuisines rc ON cu.id = rc.cuisine_id
        WHERE rc.recipe_id = $1
        ORDER BY cu.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(&state.pool)
    .await?;

    let dietary_restrictions: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT d.name FROM dietary_restrictions d
        JOIN recipe_dietary_restrictions rdr ON d.id = rdr.dietary_id
        WHERE rdr.recipe_id = $1
        ORDER BY d.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(&state.pool)
    .await?;

    let ingredient_rows = sqlx::query_as::<_, IngredientRow>(
        r#"
        SELECT i.id, i.name, i.storage_temp, pi.shelf_life
        FROM ingredients i
        JOIN recipe_ingredients ri ON i.id = ri.ingredient_id
        LEFT JOIN perishable_ingredients pi ON i.id = pi.id
        WHERE ri.recipe_id = $1
        ORDER BY i.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(&state.pool)
    .await?;

    let ingredient_ids: Vec<i32> = ingredient_rows.iter().map(|row| row.id).collect();
    let allergen_rows: Vec<(i32, String)> = sqlx::query_as(
        r#"
        SELECT ia.ingredient_id, a.name
        FROM ingredient_allergens ia
        JOIN allergens a ON a.id = ia.allergen_id
        WHERE ia.ingredient_id = ANY($1)
        ORDER BY a.name
        "#,
    )
    .bind(&ingredient_ids)
    .fetch_all(&state.pool)
    .await?;

    let mut allergens_by_ingredient: HashMap<i32, Vec<String>> = HashMap::new();
    for (ingredient_id, name) in allergen_rows {
        allergens_by_ingredient
            .entry(ingredient_id)
            .or_default()
            .push(name);
    }

    let ingredients = ingredient_rows
        .into_iter()
        .map(|row| IngredientDetail {
            allergens: allergens_by_ingredient.remove(&row.id).unwrap_or_default(),
            name: row.name,
            storage_temp: row.storage_temp,
            shelf_life: row.shelf_life,
        })
        .collect();

    let steps = fetch_recipe_steps(state, recipe_id)
        .await?
        .into_iter()
        .map(|s| s.description)
        .collect();

    let nutrition_facts = fetch_nutrition_facts(state, recipe_id)
        .await?
        .map(|n| NutritionInput {
            calories: n.calories,
            proteins: n.proteins,
            fats: n.fats,
        });

    Ok(DetailedRecipe {
        recipe,
        details: RecipeDetails {
            categories,
            cuisines,
            dietary_restrictions,
            ingredients,
            steps,
            nutrition_facts,
        },
    })
}

/// Attach generated or hand-written metadata to a recipe.
///
/// Lookup names are resolved before anything is written; an unknown name
/// rejects the whole payload. Every write is an upsert, so repeating a call
/// with the same payload leaves the same rows behind. Pass a transaction to
/// make the whole graph atomic.
pub async fn save_recipe_details<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    details: &RecipeDetails,
) -> AppResult<()> {
    if Recipes::find_by_id(recipe_id).one(conn).await?.is_none() {
        return Err(AppError::not_found("Recipe not found"));
    }

    let lookups = resolve_lookups(conn, details).await?;

    if !lookups.category_ids.is_empty() {
        RecipeCategories::insert_many(lookups.category_ids.iter().map(|&id| {
            recipe_categories::ActiveModel {
                recipe_id: Set(recipe_id),
                category_id: Set(id),
            }
        }))
        .on_conflict(
            OnConflict::columns([
                recipe_categories::Column::RecipeId,
                recipe_categories::Column::CategoryId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    if !lookups.cuisine_ids.is_empty() {
        RecipeCuisines::insert_many(lookups.cuisine_ids.iter().map(|&id| {
            recipe_cuisines::ActiveModel {
                recipe_id: Set(recipe_id),
                cuisine_id: Set(id),
            }
        }))
        .on_conflict(
            OnConflict::columns([
                recipe_cuisines::Column::RecipeId,
                recipe_cuisines::Column::CuisineId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    if !lookups.restriction_ids.is_empty() {
        RecipeDietaryRestrictions::insert_many(lookups.restriction_ids.iter().map(|&id| {
            recipe_dietary_restrictions::ActiveModel {
                recipe_id: Set(recipe_id),
                dietary_id: Set(id),
            }
        }))
        .on_conflict(
            OnConflict::columns([
                recipe_dietary_restrictions::Column::RecipeId,
                recipe_dietary_restrictions::Column::DietaryId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    for ingredient in &details.ingredients {
        save_ingredient(conn, recipe_id, ingredient).await?;
    }

    if !details.steps.is_empty() {
        RecipeSteps::insert_many(details.steps.iter().enumerate().map(|(index, step)| {
            recipe_steps::ActiveModel {
                recipe_id: Set(recipe_id),
                step_num: Set(index as i32 + 1),
                description: Set(step.clone()),
            }
        }))
        .on_conflict(
            OnConflict::columns([
                recipe_steps::Column::RecipeId,
                recipe_steps::Column::StepNum,
            ])
            .update_column(recipe_steps::Column::Description)
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    if let Some(facts) = details.nutrition_facts {
        NutritionFacts::insert(nutrition_facts::ActiveModel {
            nutrition_id: NotSet,
            recipe_id: Set(recipe_id),
            calories: Set(facts.calories),
            proteins: Set(facts.proteins),
            fats: Set(facts.fats),
        })
        .on_conflict(
            OnConflict::column(nutrition_facts::Column::RecipeId)
                .update_columns([
                    nutrition_facts::Column::Calories,
                    nutrition_facts::Column::Proteins,
                    nutrition_facts::Column::Fats,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    tracing::debug!(
        recipe_id,
        ingredients = details.ingredients.len(),
        steps = details.steps.len(),
        "recipe details saved"
    );
    Ok(())
}

async fn save_ingredient<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    ingredient: &IngredientDetail,
) -> AppResult<()> {
    let name = ingredient.name.trim();
    if name.is_empty() {
        return Ok(());
    }

    let ingredient_id = Ingredients::insert(ingredients::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        storage_temp: Set(ingredient.storage_temp),
    })
    .on_conflict(
        OnConflict::column(ingredients::Column::Name)
            .update_column(ingredients::Column::StorageTemp)
            .to_owned(),
    )
    .exec(conn)
    .await?
    .last_insert_id;

    RecipeIngredients::insert(recipe_ingredients::ActiveModel {
        recipe_id: Set(recipe_id),
        ingredient_id: Set(ingredient_id),
    })
    .on_conflict(
        OnConflict::columns([
            recipe_ingredients::Column::RecipeId,
            recipe_ingredients::Column::IngredientId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;

    if let Some(shelf_life) = ingredient.shelf_life {
        PerishableIngredients::insert(perishable_ingredients::ActiveModel {
            id: Set(ingredient_id),
            shelf_life: Set(shelf_life),
        })
        .on_conflict(
            OnConflict::column(perishable_ingredients::Column::Id)
                .update_column(perishable_ingredients::Column::ShelfLife)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    for allergen in ingredient.allergens.iter().map(|a| a.trim()).filter(|a| !a.is_empty()) {
        Allergens::insert(allergens::ActiveModel {
            id: NotSet,
            name: Set(allergen.to_string()),
        })
        .on_conflict(
            OnConflict::column(allergens::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

        let Some(allergen) = Allergens::find()
            .filter(allergens::Column::Name.eq(allergen))
            .one(conn)
            .await?
        else {
            continue;
        };

        IngredientAllergens::insert(ingredient_allergens::ActiveModel {
            ingredient_id: Set(ingredient_id),
            allergen_id: Set(allergen.id),
        })
        .on_conflict(
            OnConflict::columns([
                ingredient_allergens::Column::IngredientId,
                ingredient_allergens::Column::AllergenId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    Ok(())
}

#[derive(Debug, Default)]
struct ResolvedLookups {
    category_ids: Vec<i32>,
    cuisine_ids: Vec<i32>,
    restriction_ids: Vec<i32>,
}

async fn resolve_lookups<C: ConnectionTrait>(
    conn: &C,
    details: &RecipeDetails,
) -> AppResult<ResolvedLookups> {
    let mut errors = FieldErrors::default();

    let found: Vec<(i32, String)> = Categories::find()
        .select_only()
        .column(categories::Column::Id)
        .column(categories::Column::Name)
        .filter(categories::Column::Name.is_in(details.categories.iter().cloned()))
        .into_tuple()
        .all(conn)
        .await?;
    let category_ids = match_names("category", &details.categories, &found, &mut errors);

    let found: Vec<(i32, String)> = Cuisines::find()
        .select_only()
        .column(cuisines::Column::Id)
        .column(cuisines::Column::Name)
        .filter(cuisines::Column::Name.is_in(details.cuisines.iter().cloned()))
        .into_tuple()
        .all(conn)
        .await?;
    let cuisine_ids = match_names("cuisines", &details.cuisines, &found, &mut errors);

    let found: Vec<(i32, String)> = DietaryRestrictions::find()
        .select_only()
        .column(dietary_restrictions::Column::Id)
        .column(dietary_restrictions::Column::Name)
        .filter(
            dietary_restrictions::Column::Name
                .is_in(details.dietary_restrictions.iter().cloned()),
        )
        .into_tuple()
        .all(conn)
        .await?;
    let restriction_ids = match_names(
        "dietaryRestrictions",
        &details.dietary_restrictions,
        &found,
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(ResolvedLookups {
        category_ids,
        cuisine_ids,
        restriction_ids,
    })
}

/// Map requested names to ids by exact match, recording every unknown name.
fn match_names(
    field: &str,
    requested: &[String],
    found: &[(i32, String)],
    errors: &mut FieldErrors,
) -> Vec<i32> {
    let by_name: HashMap<&str, i32> = found.iter().map(|(id, name)| (name.as_str(), *id)).collect();
    let mut ids = BTreeSet::new();
    for name in requested {
        match by_name.get(name.as_str()) {
            Some(id) => {
                ids.insert(*id);
            }
            None => errors.add(field, format!("Unrecognized name: {name}")),
        }
    }
    ids.into_iter().collect()
}

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn recipe_from_entity(model: RecipeModel) -> Recipe {
    Recipe {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        description: model.description,
        cooking_time: model.cooking_time,
        popularity: model.popularity,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
