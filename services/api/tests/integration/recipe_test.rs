use uuid::Uuid;

use foodbook_api::domain::types::{RecipeContent, RecipeDetails};
use foodbook_api::error::FoodbookServiceError;
use foodbook_api::usecase::recipe::{
    CommentRecipeUseCase, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    LikeRecipeUseCase, ListRecipesByCountryUseCase, ListRecipesByUserUseCase, ListRecipesUseCase,
    UnlikeRecipeUseCase, UpdateRecipeUseCase,
};

use crate::helpers::{MockRecipeRepo, MockUserRepo, carbonara_content, test_user};

struct Fixture {
    users: MockUserRepo,
    recipes: MockRecipeRepo,
}

impl Fixture {
    fn new() -> Self {
        Self {
            users: MockUserRepo::empty(),
            recipes: MockRecipeRepo::empty(),
        }
    }

    fn add_user(&self, username: &str) -> Uuid {
        let user = test_user(username, &format!("{username}@example.com"));
        let id = user.id;
        self.users.users.lock().unwrap().push(user);
        id
    }

    async fn create_recipe(&self, owner: Uuid, content: RecipeContent) -> RecipeDetails {
        CreateRecipeUseCase {
            recipes: self.recipes.clone(),
            users: self.users.clone(),
        }
        .execute(owner, content)
        .await
        .unwrap()
    }

    async fn like(&self, caller: Uuid, id: Uuid) -> Result<RecipeDetails, FoodbookServiceError> {
        LikeRecipeUseCase {
            recipes: self.recipes.clone(),
            users: self.users.clone(),
        }
        .execute(caller, id)
        .await
    }

    async fn unlike(&self, caller: Uuid, id: Uuid) -> Result<RecipeDetails, FoodbookServiceError> {
        UnlikeRecipeUseCase {
            recipes: self.recipes.clone(),
            users: self.users.clone(),
        }
        .execute(caller, id)
        .await
    }

    async fn comment(
        &self,
        caller: Uuid,
        id: Uuid,
        text: &str,
    ) -> Result<RecipeDetails, FoodbookServiceError> {
        CommentRecipeUseCase {
            recipes: self.recipes.clone(),
            users: self.users.clone(),
        }
        .execute(caller, id, text.to_owned())
        .await
    }
}

// ── Feed and resolution ──────────────────────────────────────────────────────

#[tokio::test]
async fn created_recipe_appears_in_feed_with_owner_resolved() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    let feed = ListRecipesUseCase {
        recipes: fx.recipes.clone(),
        users: fx.users.clone(),
    }
    .execute()
    .await
    .unwrap();

    assert_eq!(feed.len(), 1);
    let entry = &feed[0];
    assert_eq!(entry.id, created.id);
    assert_eq!(entry.owner.username, "alice");
    assert_eq!(entry.likes.len(), 0);
    assert_eq!(entry.comments.len(), 0);
    assert_eq!(entry.ingredients.len(), 2);
}

#[tokio::test]
async fn feed_is_newest_created_first() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");

    let first = fx.create_recipe(alice, carbonara_content()).await;
    let mut second_content = carbonara_content();
    second_content.title = "Cacio e Pepe".to_owned();
    let second = fx.create_recipe(alice, second_content).await;

    let feed = ListRecipesUseCase {
        recipes: fx.recipes.clone(),
        users: fx.users.clone(),
    }
    .execute()
    .await
    .unwrap();

    assert_eq!(feed[0].id, second.id);
    assert_eq!(feed[1].id, first.id);
}

#[tokio::test]
async fn list_by_user_returns_only_that_users_recipes() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let bob = fx.add_user("bob");
    fx.create_recipe(alice, carbonara_content()).await;
    fx.create_recipe(bob, carbonara_content()).await;

    let listed = ListRecipesByUserUseCase {
        recipes: fx.recipes.clone(),
        users: fx.users.clone(),
    }
    .execute(alice)
    .await
    .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].owner.id, alice);
}

#[tokio::test]
async fn country_search_is_case_insensitive_substring() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    for query in ["ital", "ITALY", "Ita"] {
        let found = ListRecipesByCountryUseCase {
            recipes: fx.recipes.clone(),
            users: fx.users.clone(),
        }
        .execute(query)
        .await
        .unwrap();
        assert_eq!(found.len(), 1, "query {query:?} should match");
        assert_eq!(found[0].id, created.id);
    }

    let none = ListRecipesByCountryUseCase {
        recipes: fx.recipes.clone(),
        users: fx.users.clone(),
    }
    .execute("France")
    .await
    .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn get_by_id_returns_not_found_for_unknown_recipe() {
    let fx = Fixture::new();
    let result = GetRecipeUseCase {
        recipes: fx.recipes.clone(),
        users: fx.users.clone(),
    }
    .execute(Uuid::now_v7())
    .await;
    assert!(matches!(result, Err(FoodbookServiceError::RecipeNotFound)));
}

// ── Ownership ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn non_owner_update_fails_forbidden_regardless_of_body() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let mallory = fx.add_user("mallory");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    let update = UpdateRecipeUseCase {
        recipes: fx.recipes.clone(),
        users: fx.users.clone(),
    };

    // Valid body.
    let valid = update
        .execute(mallory, created.id, carbonara_content())
        .await;
    assert!(matches!(valid, Err(FoodbookServiceError::Forbidden)));

    // Invalid body: still 403, never validation detail.
    let mut broken = carbonara_content();
    broken.title = String::new();
    let invalid = update.execute(mallory, created.id, broken).await;
    assert!(matches!(invalid, Err(FoodbookServiceError::Forbidden)));
}

#[tokio::test]
async fn non_owner_delete_fails_forbidden() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let mallory = fx.add_user("mallory");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    let result = DeleteRecipeUseCase {
        recipes: fx.recipes.clone(),
    }
    .execute(mallory, created.id)
    .await;

    assert!(matches!(result, Err(FoodbookServiceError::Forbidden)));
    assert!(fx.recipes.stored(created.id).is_some());
}

#[tokio::test]
async fn owner_can_update_and_delete() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    let mut new_content = carbonara_content();
    new_content.title = "Better Carbonara".to_owned();
    let updated = UpdateRecipeUseCase {
        recipes: fx.recipes.clone(),
        users: fx.users.clone(),
    }
    .execute(alice, created.id, new_content)
    .await
    .unwrap();
    assert_eq!(updated.title, "Better Carbonara");

    DeleteRecipeUseCase {
        recipes: fx.recipes.clone(),
    }
    .execute(alice, created.id)
    .await
    .unwrap();
    assert!(fx.recipes.stored(created.id).is_none());
}

// ── Likes ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn double_like_fails_and_leaves_likes_unchanged() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let bob = fx.add_user("bob");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    let first = fx.like(bob, created.id).await.unwrap();
    assert_eq!(first.likes.len(), 1);

    let second = fx.like(bob, created.id).await;
    assert!(matches!(second, Err(FoodbookServiceError::AlreadyLiked)));
    assert_eq!(fx.recipes.stored(created.id).unwrap().likes.len(), 1);
}

#[tokio::test]
async fn like_then_unlike_restores_prior_membership() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let bob = fx.add_user("bob");
    let carol = fx.add_user("carol");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    fx.like(carol, created.id).await.unwrap();
    let before: Vec<Uuid> = fx
        .recipes
        .stored(created.id)
        .unwrap()
        .likes
        .iter()
        .map(|l| l.user_id)
        .collect();

    fx.like(bob, created.id).await.unwrap();
    let after_unlike = fx.unlike(bob, created.id).await.unwrap();

    let restored: Vec<Uuid> = fx
        .recipes
        .stored(created.id)
        .unwrap()
        .likes
        .iter()
        .map(|l| l.user_id)
        .collect();
    assert_eq!(restored, before);
    assert_eq!(after_unlike.likes.len(), 1);
    assert_eq!(after_unlike.likes[0].id, carol);
}

#[tokio::test]
async fn unlike_without_prior_like_fails() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let bob = fx.add_user("bob");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    let result = fx.unlike(bob, created.id).await;
    assert!(matches!(result, Err(FoodbookServiceError::NotLiked)));
}

#[tokio::test]
async fn like_resolves_liker_username_in_response() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let bob = fx.add_user("bob");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    let details = fx.like(bob, created.id).await.unwrap();
    assert_eq!(details.likes.len(), 1);
    assert_eq!(details.likes[0].username, "bob");
    assert_eq!(details.owner.username, "alice");
}

// ── Comments ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn comments_are_returned_newest_first() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let bob = fx.add_user("bob");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    fx.comment(bob, created.id, "comment A").await.unwrap();
    let details = fx.comment(bob, created.id, "comment B").await.unwrap();

    let texts: Vec<&str> = details.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["comment B", "comment A"]);
}

#[tokio::test]
async fn blank_comment_text_fails_validation() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    let result = fx.comment(alice, created.id, "   ").await;
    assert!(matches!(result, Err(FoodbookServiceError::Validation(_))));
    assert!(fx.recipes.stored(created.id).unwrap().comments.is_empty());
}

#[tokio::test]
async fn comment_resolves_author_username() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let bob = fx.add_user("bob");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    let details = fx.comment(bob, created.id, "looks delicious").await.unwrap();
    assert_eq!(details.comments[0].user.username, "bob");
}

// ── End-to-end like lifecycle ────────────────────────────────────────────────

#[tokio::test]
async fn like_lifecycle_seen_through_get_by_id() {
    let fx = Fixture::new();
    let alice = fx.add_user("alice");
    let bob = fx.add_user("bob");
    let created = fx.create_recipe(alice, carbonara_content()).await;

    fx.like(bob, created.id).await.unwrap();
    let get = GetRecipeUseCase {
        recipes: fx.recipes.clone(),
        users: fx.users.clone(),
    };
    let liked = get.execute(created.id).await.unwrap();
    assert_eq!(liked.likes.len(), 1);
    assert_eq!(liked.likes[0].username, "bob");

    fx.unlike(bob, created.id).await.unwrap();
    let unliked = get.execute(created.id).await.unwrap();
    assert_eq!(unliked.likes.len(), 0);
}
