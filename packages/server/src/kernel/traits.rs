// Entity-store contracts for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Actions and
// resolvers are domain functions that use these traits, which keeps the
// core testable without a database (see test_dependencies.rs).
//
// Criteria surface is deliberately small: equality lookups, in-set lookups
// ("id = ANY(...)"), create, and upsert-by-id save.

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{PostId, UserId};
use crate::domains::comments::models::{Comment, NewComment};
use crate::domains::posts::models::{NewPost, Post};
use crate::domains::users::models::{NewUser, User};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Batched in-set lookup. One call per relation traversal, never N
    /// individual lookups. Result order is unspecified; each matching user
    /// appears once even when `ids` contains duplicates.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>>;

    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Upsert keyed by id. Last write wins; the store is the sole arbiter
    /// of write ordering.
    async fn save(&self, user: &User) -> Result<User>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>>;

    /// Posts by one creator, oldest first.
    async fn find_by_creator(&self, creator: UserId) -> Result<Vec<Post>>;

    /// Batched in-set lookup over creators, oldest first.
    async fn find_by_creators(&self, creators: &[UserId]) -> Result<Vec<Post>>;

    async fn create(&self, new_post: NewPost) -> Result<Post>;

    /// Upsert keyed by id.
    async fn save(&self, post: &Post) -> Result<Post>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Comments on one post, oldest first.
    async fn find_by_post(&self, post_id: PostId) -> Result<Vec<Comment>>;

    async fn create(&self, new_comment: NewComment) -> Result<Comment>;
}
