use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{PostId, UserId};
use crate::kernel::traits::PostStore;

/// Post record - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    /// Ownership reference, not an embedded user.
    pub creator: UserId,
    /// Users who liked this post, in like order. Duplicates are allowed.
    pub likes: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub creator: UserId,
}

/// Postgres-backed post store
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn find_by_creator(&self, creator: UserId) -> Result<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE creator = $1 ORDER BY created_at ASC",
        )
        .bind(creator)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn find_by_creators(&self, creators: &[UserId]) -> Result<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE creator = ANY($1) ORDER BY created_at ASC",
        )
        .bind(creators)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn create(&self, new_post: NewPost) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (id, title, content, creator)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(PostId::new())
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(new_post.creator)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn save(&self, post: &Post) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (id, title, content, creator, likes, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                content = EXCLUDED.content,
                likes = EXCLUDED.likes
             RETURNING *",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.creator)
        .bind(&post.likes)
        .bind(post.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }
}
