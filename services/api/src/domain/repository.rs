#![allow(async_fn_in_trait)]

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::types::{Comment, Like, Recipe, RecipeContent, User};
use crate::error::FoodbookServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, FoodbookServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FoodbookServiceError>;
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, FoodbookServiceError>;
    async fn create(&self, user: &User) -> Result<(), FoodbookServiceError>;
    async fn list(&self) -> Result<Vec<User>, FoodbookServiceError>;

    /// Batch-resolve display names for the given user ids in one query.
    /// Ids without a matching account are absent from the map.
    async fn find_usernames(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, FoodbookServiceError>;
}

/// Repository for recipe aggregates.
///
/// All list operations return newest-created-first. The `update_*` methods
/// each replace one embedded column of a single row; the store guarantees
/// row-level atomicity for such writes, which is the only concurrency
/// guarantee the mutation protocol relies on.
pub trait RecipeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Recipe>, FoodbookServiceError>;

    /// Recipes whose country matches `country` case-insensitively as a substring.
    async fn list_by_country(&self, country: &str) -> Result<Vec<Recipe>, FoodbookServiceError>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Recipe>, FoodbookServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, FoodbookServiceError>;

    async fn create(&self, recipe: &Recipe) -> Result<(), FoodbookServiceError>;

    /// Replace the content fields. Returns `true` if the row existed.
    async fn update_content(
        &self,
        id: Uuid,
        content: &RecipeContent,
    ) -> Result<bool, FoodbookServiceError>;

    /// Replace the embedded likes. Returns `true` if the row existed.
    async fn update_likes(&self, id: Uuid, likes: &[Like]) -> Result<bool, FoodbookServiceError>;

    /// Replace the embedded comments. Returns `true` if the row existed.
    async fn update_comments(
        &self,
        id: Uuid,
        comments: &[Comment],
    ) -> Result<bool, FoodbookServiceError>;

    /// Delete permanently. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, FoodbookServiceError>;
}
