use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{CommentId, PostId, UserId};
use crate::kernel::traits::CommentStore;

/// Comment record - SQL persistence layer. Immutable once written.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub message: String,
    pub post_id: PostId,
    pub creator: UserId,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub message: String,
    pub post_id: PostId,
    pub creator: UserId,
}

/// Postgres-backed comment store
#[derive(Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn find_by_post(&self, post_id: PostId) -> Result<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE post_id = $1 ORDER BY created_at ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn create(&self, new_comment: NewComment) -> Result<Comment> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (id, message, post_id, creator)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(CommentId::new())
        .bind(&new_comment.message)
        .bind(new_comment.post_id)
        .bind(new_comment.creator)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }
}
