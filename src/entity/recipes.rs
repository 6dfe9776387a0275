use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub cooking_time: i32,
    pub popularity: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::recipe_categories::Entity")]
    RecipeCategories,
    #[sea_orm(has_many = "super::recipe_cuisines::Entity")]
    RecipeCuisines,
    #[sea_orm(has_many = "super::recipe_dietary_restrictions::Entity")]
    RecipeDietaryRestrictions,
    #[sea_orm(has_many = "super::recipe_ingredients::Entity")]
    RecipeIngredients,
    #[sea_orm(has_many = "super::recipe_steps::Entity")]
    RecipeSteps,
    #[sea_orm(has_one = "super::nutrition_facts::Entity")]
    NutritionFacts,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::recipe_steps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeSteps.def()
    }
}

impl Related<super::nutrition_facts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NutritionFacts.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::recipe_categories::Relation::Categories.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::recipe_categories::Relation::Recipes.def().rev())
    }
}

impl Related<super::cuisines::Entity> for Entity {
    fn to() -> RelationDef {
        super::recipe_cuisines::Relation::Cuisines.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::recipe_cuisines::Relation::Recipes.def().rev())
    }
}

impl Related<super::dietary_restrictions::Entity> for Entity {
    fn to() -> RelationDef {
        super::recipe_dietary_restrictions::Relation::DietaryRestrictions.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::recipe_dietary_restrictions::Relation::Recipes.def().rev())
    }
}

impl Related<super::ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        super::recipe_ingredients::Relation::Ingredients.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::recipe_ingredients::Relation::Recipes.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
