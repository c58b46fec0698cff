//! Group entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for yatube_core::domain::Group {
    fn from(model: Model) -> Self {
        Self::restore(model.id, model.title, model.slug, model.description)
    }
}

impl From<yatube_core::domain::Group> for ActiveModel {
    fn from(group: yatube_core::domain::Group) -> Self {
        Self {
            id: Set(group.id()),
            title: Set(group.title().to_string()),
            slug: Set(group.slug().to_string()),
            description: Set(group.description().to_string()),
        }
    }
}
