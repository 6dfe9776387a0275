use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub storage_temp: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::perishable_ingredients::Entity")]
    PerishableIngredients,
}

impl Related<super::perishable_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerishableIngredients.def()
    }
}

impl Related<super::allergens::Entity> for Entity {
    fn to() -> RelationDef {
        super::ingredient_allergens::Relation::Allergens.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::ingredient_allergens::Relation::Ingredients.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
