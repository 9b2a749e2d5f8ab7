use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodbook_auth::identity::Identity;

use crate::domain::types::{RecipeContent, RecipeDetails, UserRef};
use crate::error::FoodbookServiceError;
use crate::state::AppState;
use crate::usecase::recipe::{
    CommentRecipeUseCase, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    LikeRecipeUseCase, ListRecipesByCountryUseCase, ListRecipesByUserUseCase, ListRecipesUseCase,
    UnlikeRecipeUseCase, UpdateRecipeUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserRefResponse {
    pub id: String,
    pub username: String,
}

impl From<UserRef> for UserRefResponse {
    fn from(user: UserRef) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
        }
    }
}

#[derive(Serialize)]
pub struct LikeResponse {
    pub user: UserRefResponse,
}

#[derive(Serialize)]
pub struct CommentResponse {
    pub user: UserRefResponse,
    pub text: String,
    #[serde(serialize_with = "foodbook_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct RecipeResponse {
    pub id: String,
    pub user: UserRefResponse,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub image: String,
    pub country: String,
    pub likes: Vec<LikeResponse>,
    pub comments: Vec<CommentResponse>,
    #[serde(serialize_with = "foodbook_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<RecipeDetails> for RecipeResponse {
    fn from(details: RecipeDetails) -> Self {
        Self {
            id: details.id.to_string(),
            user: details.owner.into(),
            title: details.title,
            ingredients: details.ingredients,
            instructions: details.instructions,
            image: details.image,
            country: details.country,
            likes: details
                .likes
                .into_iter()
                .map(|user| LikeResponse { user: user.into() })
                .collect(),
            comments: details
                .comments
                .into_iter()
                .map(|c| CommentResponse {
                    user: c.user.into(),
                    text: c.text,
                    created_at: c.created_at,
                })
                .collect(),
            created_at: details.created_at,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

// Missing fields deserialize to empty values and fail shape validation in
// the use case, so the client sees a 400 VALIDATION error, not a 422.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RecipeRequest {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub image: String,
    pub country: String,
}

impl From<RecipeRequest> for RecipeContent {
    fn from(body: RecipeRequest) -> Self {
        Self {
            title: body.title,
            ingredients: body.ingredients,
            instructions: body.instructions,
            image: body.image,
            country: body.country,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CommentRequest {
    pub text: String,
}

/// A malformed recipe id is indistinguishable from an absent one.
fn parse_recipe_id(raw: &str) -> Result<Uuid, FoodbookServiceError> {
    raw.parse().map_err(|_| FoodbookServiceError::RecipeNotFound)
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeResponse>>, FoodbookServiceError> {
    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let recipes = usecase.execute().await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

// ── GET /recipes/country/{country} ───────────────────────────────────────────

pub async fn list_recipes_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<Vec<RecipeResponse>>, FoodbookServiceError> {
    let usecase = ListRecipesByCountryUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let recipes = usecase.execute(&country).await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

// ── GET /recipes/user/{user_id} ──────────────────────────────────────────────

pub async fn list_recipes_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<RecipeResponse>>, FoodbookServiceError> {
    let user_id: Uuid = user_id
        .parse()
        .map_err(|_| FoodbookServiceError::UserNotFound)?;
    let usecase = ListRecipesByUserUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let recipes = usecase.execute(user_id).await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, FoodbookServiceError> {
    let id = parse_recipe_id(&id)?;
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let details = usecase.execute(id).await?;
    Ok(Json(details.into()))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), FoodbookServiceError> {
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let details = usecase.execute(identity.user_id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(details.into())))
}

// ── PUT /recipes/{id} ────────────────────────────────────────────────────────

pub async fn update_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RecipeRequest>,
) -> Result<Json<RecipeResponse>, FoodbookServiceError> {
    let id = parse_recipe_id(&id)?;
    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let details = usecase.execute(identity.user_id, id, body.into()).await?;
    Ok(Json(details.into()))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, FoodbookServiceError> {
    let id = parse_recipe_id(&id)?;
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(Json(serde_json::json!({ "message": "recipe removed" })))
}

// ── PUT /recipes/like/{id} ───────────────────────────────────────────────────

pub async fn like_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, FoodbookServiceError> {
    let id = parse_recipe_id(&id)?;
    let usecase = LikeRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let details = usecase.execute(identity.user_id, id).await?;
    Ok(Json(details.into()))
}

// ── PUT /recipes/unlike/{id} ─────────────────────────────────────────────────

pub async fn unlike_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, FoodbookServiceError> {
    let id = parse_recipe_id(&id)?;
    let usecase = UnlikeRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let details = usecase.execute(identity.user_id, id).await?;
    Ok(Json(details.into()))
}

// ── POST /recipes/comment/{id} ───────────────────────────────────────────────

pub async fn comment_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CommentRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), FoodbookServiceError> {
    let id = parse_recipe_id(&id)?;
    let usecase = CommentRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let details = usecase.execute(identity.user_id, id, body.text).await?;
    Ok((StatusCode::CREATED, Json(details.into())))
}
