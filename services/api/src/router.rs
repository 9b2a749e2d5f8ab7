use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use foodbook_core::health::{healthz, readyz};
use foodbook_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{get_current_user, login, register},
    recipe::{
        comment_recipe, create_recipe, delete_recipe, get_recipe, like_recipe, list_recipes,
        list_recipes_by_country, list_recipes_by_user, unlike_recipe, update_recipe,
    },
    user::list_users,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/user", get(get_current_user))
        // Users
        .route("/users", get(list_users))
        // Recipes
        .route("/recipes", get(list_recipes))
        .route("/recipes", post(create_recipe))
        .route("/recipes/country/{country}", get(list_recipes_by_country))
        .route("/recipes/user/{user_id}", get(list_recipes_by_user))
        .route("/recipes/like/{id}", put(like_recipe))
        .route("/recipes/unlike/{id}", put(unlike_recipe))
        .route("/recipes/comment/{id}", post(comment_recipe))
        .route("/recipes/{id}", get(get_recipe))
        .route("/recipes/{id}", put(update_recipe))
        .route("/recipes/{id}", delete(delete_recipe))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
