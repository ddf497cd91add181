//! Server dependencies shared by resolvers and actions.
//!
//! Built once at startup and passed by reference into each request context;
//! nothing here is process-global, which keeps the core testable without
//! process-wide mutation.

use std::sync::Arc;

use sqlx::PgPool;

use crate::domains::auth::JwtService;
use crate::domains::comments::models::PgCommentStore;
use crate::domains::posts::models::PgPostStore;
use crate::domains::users::models::PgUserStore;
use crate::kernel::traits::{CommentStore, PostStore, UserStore};

/// Dependency container for the API core
#[derive(Clone)]
pub struct ServerDeps {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub comments: Arc<dyn CommentStore>,
    /// Session token codec (shared signing secret lives in here)
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
        comments: Arc<dyn CommentStore>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            users,
            posts,
            comments,
            jwt_service,
        }
    }

    /// Production wiring: Postgres-backed stores over one shared pool.
    pub fn postgres(pool: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self::new(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgPostStore::new(pool.clone())),
            Arc::new(PgCommentStore::new(pool)),
            jwt_service,
        )
    }
}
