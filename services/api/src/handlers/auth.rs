use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use foodbook_auth::identity::Identity;

use crate::error::FoodbookServiceError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::account::{
    GetCurrentUserUseCase, LoginUseCase, RegisterInput, RegisterUseCase,
};

// ── POST /auth/register ──────────────────────────────────────────────────────

// Missing fields deserialize to empty strings and fail shape validation in
// the use case, so the client sees a 400 VALIDATION error, not a 422.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub token: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), FoodbookServiceError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { token: out.token }),
    ))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, FoodbookServiceError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(&body.email, &body.password).await?;
    Ok(Json(LoginResponse {
        token: out.token,
        user: out.user.into(),
    }))
}

// ── GET /auth/user ───────────────────────────────────────────────────────────

pub async fn get_current_user(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, FoodbookServiceError> {
    let usecase = GetCurrentUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}
