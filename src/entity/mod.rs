pub mod allergens;
pub mod categories;
pub mod cuisines;
pub mod dietary_restrictions;
pub mod ingredient_allergens;
pub mod ingredients;
pub mod nutrition_facts;
pub mod perishable_ingredients;
pub mod recipe_categories;
pub mod recipe_cuisines;
pub mod recipe_dietary_restrictions;
pub mod recipe_ingredients;
pub mod recipe_steps;
pub mod recipes;
pub mod users;

pub use allergens::Entity as Allergens;
pub use categories::Entity as Categories;
pub use cuisines::Entity as Cuisines;
pub use dietary_restrictions::Entity as DietaryRestrictions;
pub use ingredient_allergens::Entity as IngredientAllergens;
pub use ingredients::Entity as Ingredients;
pub use nutrition_facts::Entity as NutritionFacts;
pub use perishable_ingredients::Entity as PerishableIngredients;
pub use recipe_categories::Entity as RecipeCategories;
pub use recipe_cuisines::Entity as RecipeCuisines;
pub use recipe_dietary_restrictions::Entity as RecipeDietaryRestrictions;
pub use recipe_ingredients::Entity as RecipeIngredients;
pub use recipe_steps::Entity as RecipeSteps;
pub use recipes::Entity as Recipes;
pub use users::Entity as Users;
