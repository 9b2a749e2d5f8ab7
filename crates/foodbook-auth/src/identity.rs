//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use crate::token::validate_token;

/// Request header carrying the bearer token on private routes.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// HMAC secret for token validation, drawn from router state via [`FromRef`].
#[derive(Clone)]
pub struct TokenSecret(pub String);

/// Caller identity resolved from the `x-auth-token` request header.
///
/// Rejects with 401 when the header is absent or the token fails
/// validation. No database lookup happens here — a token for a since-vanished
/// user still extracts; handlers that need the profile look it up themselves.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
}

/// 401 rejection with the same `{kind, message}` body shape as service errors.
#[derive(Debug)]
pub struct Unauthenticated;

impl IntoResponse for Unauthenticated {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "UNAUTHENTICATED",
            "message": "missing or invalid token",
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    TokenSecret: FromRef<S>,
{
    type Rejection = Unauthenticated;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = TokenSecret::from_ref(state);
        let token = parts
            .headers
            .get(AUTH_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        async move {
            let token = token.ok_or(Unauthenticated)?;
            let info = validate_token(&token, &secret.0).map_err(|_| Unauthenticated)?;
            Ok(Self {
                user_id: info.user_id,
            })
        }
    }
}
