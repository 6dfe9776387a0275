use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recipe_dietary_restrictions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub recipe_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub dietary_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recipes::Entity",
        from = "Column::RecipeId",
        to = "super::recipes::Column::Id",
        on_delete = "Cascade"
    )]
    Recipes,
    #[sea_orm(
        belongs_to = "super::dietary_restrictions::Entity",
        from = "Column::DietaryId",
        to = "super::dietary_restrictions::Column::Id",
        on_delete = "Cascade"
    )]
    DietaryRestrictions,
}

impl Related<super::recipes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipes.def()
    }
}

impl Related<super::dietary_restrictions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DietaryRestrictions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
