use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Allergen, Category, Cuisine, DietaryRestriction, PerishableIngredient};

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CuisineList {
    pub items: Vec<Cuisine>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DietaryRestrictionList {
    pub items: Vec<DietaryRestriction>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AllergenList {
    pub items: Vec<Allergen>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PerishableList {
    pub items: Vec<PerishableIngredient>,
}

/// Distinct lookup names used by one user's recipes, for filter dropdowns.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserOptionNames {
    pub categories: Vec<String>,
    pub cuisines: Vec<String>,
    pub dietary_restrictions: Vec<String>,
}
