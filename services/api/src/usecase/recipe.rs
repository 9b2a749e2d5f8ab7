use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{RecipeRepository, UserRepository};
use crate::domain::types::{
    Comment, CommentDetails, Like, Recipe, RecipeContent, RecipeDetails, UserRef,
};
use crate::error::FoodbookServiceError;

fn validate_content(content: &RecipeContent) -> Result<(), FoodbookServiceError> {
    if content.title.trim().is_empty() {
        return Err(FoodbookServiceError::Validation("title is required"));
    }
    if content.ingredients.is_empty() {
        return Err(FoodbookServiceError::Validation(
            "at least one ingredient is required",
        ));
    }
    if content.ingredients.iter().any(|i| i.trim().is_empty()) {
        return Err(FoodbookServiceError::Validation(
            "ingredients must not be blank",
        ));
    }
    if content.instructions.trim().is_empty() {
        return Err(FoodbookServiceError::Validation("instructions are required"));
    }
    if content.image.trim().is_empty() {
        return Err(FoodbookServiceError::Validation("image URL is required"));
    }
    if content.country.trim().is_empty() {
        return Err(FoodbookServiceError::Validation("country is required"));
    }
    Ok(())
}

// ── Display-name resolution ──────────────────────────────────────────────────

fn referenced_user_ids(recipes: &[Recipe]) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for recipe in recipes {
        ids.push(recipe.user_id);
        ids.extend(recipe.likes.iter().map(|l| l.user_id));
        ids.extend(recipe.comments.iter().map(|c| c.user_id));
    }
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn user_ref(names: &HashMap<Uuid, String>, id: Uuid) -> UserRef {
    UserRef {
        id,
        username: names.get(&id).cloned().unwrap_or_default(),
    }
}

fn into_details(recipe: Recipe, names: &HashMap<Uuid, String>) -> RecipeDetails {
    RecipeDetails {
        id: recipe.id,
        owner: user_ref(names, recipe.user_id),
        title: recipe.title,
        ingredients: recipe.ingredients,
        instructions: recipe.instructions,
        image: recipe.image,
        country: recipe.country,
        likes: recipe
            .likes
            .iter()
            .map(|l| user_ref(names, l.user_id))
            .collect(),
        comments: recipe
            .comments
            .into_iter()
            .map(|c| CommentDetails {
                user: user_ref(names, c.user_id),
                text: c.text,
                created_at: c.created_at,
            })
            .collect(),
        created_at: recipe.created_at,
    }
}

/// Resolve display names for a batch of recipes with a single user lookup.
async fn resolve_all<U: UserRepository>(
    users: &U,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeDetails>, FoodbookServiceError> {
    let ids = referenced_user_ids(&recipes);
    let names = users.find_usernames(&ids).await?;
    Ok(recipes
        .into_iter()
        .map(|r| into_details(r, &names))
        .collect())
}

async fn resolve_one<U: UserRepository>(
    users: &U,
    recipe: Recipe,
) -> Result<RecipeDetails, FoodbookServiceError> {
    let ids = referenced_user_ids(std::slice::from_ref(&recipe));
    let names = users.find_usernames(&ids).await?;
    Ok(into_details(recipe, &names))
}

/// Fetch the committed aggregate after a write and resolve it. Every mutating
/// use case responds with this read-back, never with an in-memory projection.
async fn read_back<R: RecipeRepository, U: UserRepository>(
    recipes: &R,
    users: &U,
    id: Uuid,
) -> Result<RecipeDetails, FoodbookServiceError> {
    let stored = recipes
        .find_by_id(id)
        .await?
        .ok_or(FoodbookServiceError::RecipeNotFound)?;
    resolve_one(users, stored).await
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> ListRecipesUseCase<R, U> {
    pub async fn execute(&self) -> Result<Vec<RecipeDetails>, FoodbookServiceError> {
        let recipes = self.recipes.list().await?;
        resolve_all(&self.users, recipes).await
    }
}

// ── ListRecipesByCountry ─────────────────────────────────────────────────────

pub struct ListRecipesByCountryUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> ListRecipesByCountryUseCase<R, U> {
    pub async fn execute(
        &self,
        country: &str,
    ) -> Result<Vec<RecipeDetails>, FoodbookServiceError> {
        let recipes = self.recipes.list_by_country(country).await?;
        resolve_all(&self.users, recipes).await
    }
}

// ── ListRecipesByUser ────────────────────────────────────────────────────────

pub struct ListRecipesByUserUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> ListRecipesByUserUseCase<R, U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RecipeDetails>, FoodbookServiceError> {
        let recipes = self.recipes.list_by_user(user_id).await?;
        resolve_all(&self.users, recipes).await
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> GetRecipeUseCase<R, U> {
    pub async fn execute(&self, id: Uuid) -> Result<RecipeDetails, FoodbookServiceError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(FoodbookServiceError::RecipeNotFound)?;
        resolve_one(&self.users, recipe).await
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> CreateRecipeUseCase<R, U> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        content: RecipeContent,
    ) -> Result<RecipeDetails, FoodbookServiceError> {
        validate_content(&content)?;
        let recipe = Recipe {
            id: Uuid::now_v7(),
            user_id: owner_id,
            title: content.title,
            ingredients: content.ingredients,
            instructions: content.instructions,
            image: content.image,
            country: content.country,
            likes: vec![],
            comments: vec![],
            created_at: Utc::now(),
        };
        self.recipes.create(&recipe).await?;
        resolve_one(&self.users, recipe).await
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> UpdateRecipeUseCase<R, U> {
    pub async fn execute(
        &self,
        caller: Uuid,
        id: Uuid,
        content: RecipeContent,
    ) -> Result<RecipeDetails, FoodbookServiceError> {
        let existing = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(FoodbookServiceError::RecipeNotFound)?;
        // Ownership before body shape: a non-owner always sees 403.
        if existing.user_id != caller {
            return Err(FoodbookServiceError::Forbidden);
        }
        validate_content(&content)?;
        if !self.recipes.update_content(id, &content).await? {
            return Err(FoodbookServiceError::RecipeNotFound);
        }
        read_back(&self.recipes, &self.users, id).await
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(&self, caller: Uuid, id: Uuid) -> Result<(), FoodbookServiceError> {
        let existing = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(FoodbookServiceError::RecipeNotFound)?;
        if existing.user_id != caller {
            return Err(FoodbookServiceError::Forbidden);
        }
        if !self.recipes.delete(id).await? {
            return Err(FoodbookServiceError::RecipeNotFound);
        }
        Ok(())
    }
}

// ── LikeRecipe ───────────────────────────────────────────────────────────────

pub struct LikeRecipeUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> LikeRecipeUseCase<R, U> {
    pub async fn execute(
        &self,
        caller: Uuid,
        id: Uuid,
    ) -> Result<RecipeDetails, FoodbookServiceError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(FoodbookServiceError::RecipeNotFound)?;
        // O(likes) membership scan; a recipe's like count stays small.
        if recipe.likes.iter().any(|l| l.user_id == caller) {
            return Err(FoodbookServiceError::AlreadyLiked);
        }
        let mut likes = Vec::with_capacity(recipe.likes.len() + 1);
        likes.push(Like { user_id: caller });
        likes.extend(recipe.likes);
        if !self.recipes.update_likes(id, &likes).await? {
            return Err(FoodbookServiceError::RecipeNotFound);
        }
        read_back(&self.recipes, &self.users, id).await
    }
}

// ── UnlikeRecipe ─────────────────────────────────────────────────────────────

pub struct UnlikeRecipeUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> UnlikeRecipeUseCase<R, U> {
    pub async fn execute(
        &self,
        caller: Uuid,
        id: Uuid,
    ) -> Result<RecipeDetails, FoodbookServiceError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(FoodbookServiceError::RecipeNotFound)?;
        if !recipe.likes.iter().any(|l| l.user_id == caller) {
            return Err(FoodbookServiceError::NotLiked);
        }
        let likes: Vec<Like> = recipe
            .likes
            .into_iter()
            .filter(|l| l.user_id != caller)
            .collect();
        if !self.recipes.update_likes(id, &likes).await? {
            return Err(FoodbookServiceError::RecipeNotFound);
        }
        read_back(&self.recipes, &self.users, id).await
    }
}

// ── CommentRecipe ────────────────────────────────────────────────────────────

pub struct CommentRecipeUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> CommentRecipeUseCase<R, U> {
    pub async fn execute(
        &self,
        caller: Uuid,
        id: Uuid,
        text: String,
    ) -> Result<RecipeDetails, FoodbookServiceError> {
        if text.trim().is_empty() {
            return Err(FoodbookServiceError::Validation("text is required"));
        }
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(FoodbookServiceError::RecipeNotFound)?;
        // Prepend: comments are stored and returned newest-first.
        let mut comments = Vec::with_capacity(recipe.comments.len() + 1);
        comments.push(Comment {
            user_id: caller,
            text,
            created_at: Utc::now(),
        });
        comments.extend(recipe.comments);
        if !self.recipes.update_comments(id, &comments).await? {
            return Err(FoodbookServiceError::RecipeNotFound);
        }
        read_back(&self.recipes, &self.users, id).await
    }
}
