//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_by: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub images: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for postboard_core::domain::Post {
    fn from(model: Model) -> Self {
        let images = match model.images {
            Json::Array(images) => images,
            Json::Null => Vec::new(),
            other => vec![other],
        };
        Self {
            id: model.id,
            created_by: model.created_by,
            text: model.text,
            images,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<postboard_core::domain::Post> for ActiveModel {
    fn from(post: postboard_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            created_by: Set(post.created_by),
            text: Set(post.text),
            images: Set(Json::Array(post.images)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
