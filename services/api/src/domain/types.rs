use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User account. `password_hash` is an argon2 PHC string and is never
/// serialized to clients.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Recipe aggregate with its embedded likes and comments.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub image: String,
    pub country: String,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

/// A like inside a recipe aggregate. At most one per user; newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub user_id: Uuid,
}

/// A comment inside a recipe aggregate. Never edited or deleted; newest first.
#[derive(Debug, Clone)]
pub struct Comment {
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied content fields of a recipe, shared by create and update.
#[derive(Debug, Clone)]
pub struct RecipeContent {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub image: String,
    pub country: String,
}

/// A user reference with its display name resolved.
#[derive(Debug, Clone)]
pub struct UserRef {
    pub id: Uuid,
    pub username: String,
}

/// Recipe aggregate with every user reference resolved for display.
#[derive(Debug, Clone)]
pub struct RecipeDetails {
    pub id: Uuid,
    pub owner: UserRef,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub image: String,
    pub country: String,
    pub likes: Vec<UserRef>,
    pub comments: Vec<CommentDetails>,
    pub created_at: DateTime<Utc>,
}

/// A comment with its author resolved.
#[derive(Debug, Clone)]
pub struct CommentDetails {
    pub user: UserRef,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Syntactic email check: one `@`, non-empty local part, domain with a dot,
/// no whitespace. Deliverability is not our problem.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.split_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
