use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::UserId;
use crate::kernel::traits::UserStore;

/// User record - SQL persistence layer
///
/// `password_hash` never leaves this layer; outward GraphQL projections are
/// built from the data types, which do not carry it.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    /// Followed users, in follow order. Duplicates are allowed.
    pub friends: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Postgres-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, first_name, last_name, email, password_hash)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(UserId::new())
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn save(&self, user: &User) -> Result<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, first_name, last_name, email, password_hash, avatar_url, friends, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                password_hash = EXCLUDED.password_hash,
                avatar_url = EXCLUDED.avatar_url,
                friends = EXCLUDED.friends
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar_url)
        .bind(&user.friends)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }
}
