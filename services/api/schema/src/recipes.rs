use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recipe aggregate, one row per document.
///
/// `ingredients`, `likes`, and `comments` are JSONB columns embedded in the
/// row, so the aggregate is read and written as a single document. A
/// single-row UPDATE of one of these columns is atomic at the store level;
/// concurrent writers to the same recipe are last-write-wins per column.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub ingredients: Ingredients,
    pub instructions: String,
    pub image: String,
    pub country: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub likes: Likes,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: Comments,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Ordered ingredient list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Ingredients(pub Vec<String>);

/// Embedded likes, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Likes(pub Vec<LikeEntry>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeEntry {
    pub user_id: Uuid,
}

/// Embedded comments, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Comments(pub Vec<CommentEntry>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEntry {
    pub user_id: Uuid,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
