use chrono::Utc;
use uuid::Uuid;

use foodbook_auth::password::{hash_password, verify_password};
use foodbook_auth::token::issue_token;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, validate_email};
use crate::error::FoodbookServiceError;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub user: User,
    pub token: String,
    pub token_exp: u64,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(
        &self,
        input: RegisterInput,
    ) -> Result<RegisterOutput, FoodbookServiceError> {
        let username = input.username.trim();
        if username.is_empty() {
            return Err(FoodbookServiceError::Validation("username is required"));
        }
        if !validate_email(&input.email) {
            return Err(FoodbookServiceError::Validation("a valid email is required"));
        }
        if input.password.chars().count() < 6 {
            return Err(FoodbookServiceError::Validation(
                "password must be at least 6 characters",
            ));
        }
        if self.repo.find_by_username(username).await?.is_some() {
            return Err(FoodbookServiceError::UserAlreadyExists);
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(FoodbookServiceError::UserAlreadyExists);
        }

        let password_hash =
            hash_password(&input.password).map_err(|e| FoodbookServiceError::Internal(e.into()))?;
        let user = User {
            id: Uuid::now_v7(),
            username: username.to_owned(),
            email: input.email,
            password_hash,
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;

        let (token, token_exp) = issue_token(user.id, &self.jwt_secret)
            .map_err(|e| FoodbookServiceError::Internal(e.into()))?;
        Ok(RegisterOutput {
            user,
            token,
            token_exp,
        })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub token: String,
    pub token_exp: u64,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> LoginUseCase<R> {
    /// Unknown email and wrong password return the same error, so responses
    /// cannot be used to enumerate accounts.
    pub async fn execute(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutput, FoodbookServiceError> {
        let Some(user) = self.repo.find_by_email(email).await? else {
            return Err(FoodbookServiceError::InvalidCredentials);
        };
        if !verify_password(password, &user.password_hash) {
            return Err(FoodbookServiceError::InvalidCredentials);
        }

        let (token, token_exp) = issue_token(user.id, &self.jwt_secret)
            .map_err(|e| FoodbookServiceError::Internal(e.into()))?;
        Ok(LoginOutput {
            user,
            token,
            token_exp,
        })
    }
}

// ── GetCurrentUser ───────────────────────────────────────────────────────────

pub struct GetCurrentUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetCurrentUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, FoodbookServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(FoodbookServiceError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, FoodbookServiceError> {
        self.repo.list().await
    }
}
