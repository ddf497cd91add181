//! User mutations: avatar updates and following.
//!
//! Both are read-modify-write against the user store; a failed save fails
//! the mutation, never reporting silent success.

use anyhow::{Context, Result};
use tracing::info;

use crate::common::UserId;
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Replace the caller's avatar URL and return the updated user.
pub async fn update_avatar(caller: UserId, url: String, deps: &ServerDeps) -> Result<User> {
    let mut user = deps
        .users
        .find_by_id(caller)
        .await?
        .context("User not found")?;

    user.avatar_url = Some(url);
    deps.users.save(&user).await
}

/// Append `friend` to the caller's friends list and return the updated user.
///
/// Appends are not deduplicated: following the same user twice records two
/// entries, mirroring the like counter semantics.
pub async fn follow(caller: UserId, friend: UserId, deps: &ServerDeps) -> Result<User> {
    let mut user = deps
        .users
        .find_by_id(caller)
        .await?
        .context("User not found")?;

    user.friends.push(friend);
    let user = deps.users.save(&user).await?;
    info!(user_id = %caller, friend_id = %friend, "User followed");

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::{actions::register, JwtService};
    use crate::kernel::test_dependencies::memory_deps;
    use std::sync::Arc;

    async fn deps_with_user() -> (ServerDeps, UserId) {
        let jwt = Arc::new(JwtService::new("test_secret", "test_issuer".to_string()));
        let (deps, _) = memory_deps(jwt);
        let authed = register("Ada", "Lovelace", "ada@example.com", "pw", &deps)
            .await
            .unwrap();
        (deps, authed.user.id)
    }

    #[tokio::test]
    async fn update_avatar_persists_url() {
        let (deps, caller) = deps_with_user().await;

        let user = update_avatar(caller, "https://cdn.example.com/a.png".into(), &deps)
            .await
            .unwrap();

        assert_eq!(user.avatar_url.as_deref(), Some("https://cdn.example.com/a.png"));
        let reloaded = deps.users.find_by_id(caller).await.unwrap().unwrap();
        assert_eq!(reloaded.avatar_url, user.avatar_url);
    }

    #[tokio::test]
    async fn follow_appends_in_order_without_dedup() {
        let (deps, caller) = deps_with_user().await;
        let friend = UserId::new();

        follow(caller, friend, &deps).await.unwrap();
        let user = follow(caller, friend, &deps).await.unwrap();

        assert_eq!(user.friends, vec![friend, friend]);
    }
}
