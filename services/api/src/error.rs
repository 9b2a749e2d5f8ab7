use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Foodbook service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum FoodbookServiceError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("missing or invalid token")]
    Unauthenticated,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("username or email already taken")]
    UserAlreadyExists,
    #[error("recipe already liked")]
    AlreadyLiked,
    #[error("recipe has not been liked")]
    NotLiked,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FoodbookServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::AlreadyLiked => "ALREADY_LIKED",
            Self::NotLiked => "NOT_LIKED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for FoodbookServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::RecipeNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists | Self::AlreadyLiked | Self::NotLiked => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
