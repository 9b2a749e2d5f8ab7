use std::collections::HashMap;

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
    sea_query::{Expr, extension::postgres::PgExpr},
};
use uuid::Uuid;

use foodbook_api_schema::{recipes, users};

use crate::domain::repository::{RecipeRepository, UserRepository};
use crate::domain::types::{Comment, Like, Recipe, RecipeContent, User};
use crate::error::FoodbookServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, FoodbookServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FoodbookServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, FoodbookServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), FoodbookServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, FoodbookServiceError> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn find_usernames(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, FoodbookServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find usernames")?;
        Ok(models.into_iter().map(|m| (m.id, m.username)).collect())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl RecipeRepository for DbRecipeRepository {
    async fn list(&self) -> Result<Vec<Recipe>, FoodbookServiceError> {
        let models = recipes::Entity::find()
            .order_by_desc(recipes::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list recipes")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn list_by_country(&self, country: &str) -> Result<Vec<Recipe>, FoodbookServiceError> {
        let pattern = format!("%{}%", escape_like(country));
        let models = recipes::Entity::find()
            .filter(Expr::col(recipes::Column::Country).ilike(pattern))
            .order_by_desc(recipes::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list recipes by country")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Recipe>, FoodbookServiceError> {
        let models = recipes::Entity::find()
            .filter(recipes::Column::UserId.eq(user_id))
            .order_by_desc(recipes::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list recipes by user")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, FoodbookServiceError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        Ok(model.map(recipe_from_model))
    }

    async fn create(&self, recipe: &Recipe) -> Result<(), FoodbookServiceError> {
        recipes::ActiveModel {
            id: Set(recipe.id),
            user_id: Set(recipe.user_id),
            title: Set(recipe.title.clone()),
            ingredients: Set(recipes::Ingredients(recipe.ingredients.clone())),
            instructions: Set(recipe.instructions.clone()),
            image: Set(recipe.image.clone()),
            country: Set(recipe.country.clone()),
            likes: Set(likes_to_entries(&recipe.likes)),
            comments: Set(comments_to_entries(&recipe.comments)),
            created_at: Set(recipe.created_at),
        }
        .insert(&self.db)
        .await
        .context("create recipe")?;
        Ok(())
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &RecipeContent,
    ) -> Result<bool, FoodbookServiceError> {
        let result = recipes::Entity::update_many()
            .filter(recipes::Column::Id.eq(id))
            .col_expr(recipes::Column::Title, Expr::value(content.title.clone()))
            .col_expr(
                recipes::Column::Ingredients,
                Expr::value(recipes::Ingredients(content.ingredients.clone())),
            )
            .col_expr(
                recipes::Column::Instructions,
                Expr::value(content.instructions.clone()),
            )
            .col_expr(recipes::Column::Image, Expr::value(content.image.clone()))
            .col_expr(
                recipes::Column::Country,
                Expr::value(content.country.clone()),
            )
            .exec(&self.db)
            .await
            .context("update recipe content")?;
        Ok(result.rows_affected > 0)
    }

    async fn update_likes(
        &self,
        id: Uuid,
        likes: &[Like],
    ) -> Result<bool, FoodbookServiceError> {
        // Single-column single-row UPDATE — atomic at the store level.
        let result = recipes::Entity::update_many()
            .filter(recipes::Column::Id.eq(id))
            .col_expr(recipes::Column::Likes, Expr::value(likes_to_entries(likes)))
            .exec(&self.db)
            .await
            .context("update recipe likes")?;
        Ok(result.rows_affected > 0)
    }

    async fn update_comments(
        &self,
        id: Uuid,
        comments: &[Comment],
    ) -> Result<bool, FoodbookServiceError> {
        let result = recipes::Entity::update_many()
            .filter(recipes::Column::Id.eq(id))
            .col_expr(
                recipes::Column::Comments,
                Expr::value(comments_to_entries(comments)),
            )
            .exec(&self.db)
            .await
            .context("update recipe comments")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, FoodbookServiceError> {
        let result = recipes::Entity::delete_many()
            .filter(recipes::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }
}

fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        ingredients: model.ingredients.0,
        instructions: model.instructions,
        image: model.image,
        country: model.country,
        likes: model
            .likes
            .0
            .into_iter()
            .map(|l| Like { user_id: l.user_id })
            .collect(),
        comments: model
            .comments
            .0
            .into_iter()
            .map(|c| Comment {
                user_id: c.user_id,
                text: c.text,
                created_at: c.created_at,
            })
            .collect(),
        created_at: model.created_at,
    }
}

fn likes_to_entries(likes: &[Like]) -> recipes::Likes {
    recipes::Likes(
        likes
            .iter()
            .map(|l| recipes::LikeEntry { user_id: l.user_id })
            .collect(),
    )
}

fn comments_to_entries(comments: &[Comment]) -> recipes::Comments {
    recipes::Comments(
        comments
            .iter()
            .map(|c| recipes::CommentEntry {
                user_id: c.user_id,
                text: c.text.clone(),
                created_at: c.created_at,
            })
            .collect(),
    )
}

/// Escape LIKE wildcards so the country query matches them literally.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
