//! Post mutations and the feed query.

use anyhow::{Context, Result};
use tracing::info;

use crate::common::{PostId, UserId};
use crate::domains::posts::models::{NewPost, Post};
use crate::kernel::ServerDeps;

/// Create a post owned by the caller.
pub async fn create_post(
    caller: UserId,
    title: String,
    content: String,
    deps: &ServerDeps,
) -> Result<Post> {
    let post = deps
        .posts
        .create(NewPost {
            title,
            content,
            creator: caller,
        })
        .await?;

    info!(post_id = %post.id, creator = %caller, "Post created");
    Ok(post)
}

/// Append the caller to a post's likes and return the updated post.
///
/// Likes are append-only events: liking twice records two entries, and the
/// exposed like count goes up by two.
pub async fn like_post(caller: UserId, post_id: PostId, deps: &ServerDeps) -> Result<Post> {
    let mut post = deps
        .posts
        .find_by_id(post_id)
        .await?
        .context("Post not found")?;

    post.likes.push(caller);
    deps.posts.save(&post).await
}

/// Posts from the caller's friends (and the caller), oldest first.
///
/// Two sequential steps: the caller's friends list first, then one batched
/// in-set query over the combined creator set.
pub async fn feed(caller: UserId, deps: &ServerDeps) -> Result<Vec<Post>> {
    let user = deps
        .users
        .find_by_id(caller)
        .await?
        .context("User not found")?;

    let mut creators = user.friends;
    creators.push(caller);

    deps.posts.find_by_creators(&creators).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::{actions::register, JwtService};
    use crate::domains::users::actions::follow;
    use crate::kernel::test_dependencies::memory_deps;
    use std::sync::Arc;

    async fn deps_with_users() -> (ServerDeps, UserId, UserId) {
        let jwt = Arc::new(JwtService::new("test_secret", "test_issuer".to_string()));
        let (deps, _) = memory_deps(jwt);
        let a = register("Ada", "Lovelace", "ada@example.com", "pw", &deps)
            .await
            .unwrap();
        let b = register("Grace", "Hopper", "grace@example.com", "pw", &deps)
            .await
            .unwrap();
        (deps, a.user.id, b.user.id)
    }

    #[tokio::test]
    async fn like_post_twice_counts_twice() {
        let (deps, a, _) = deps_with_users().await;
        let post = create_post(a, "title".into(), "content".into(), &deps)
            .await
            .unwrap();

        like_post(a, post.id, &deps).await.unwrap();
        let post = like_post(a, post.id, &deps).await.unwrap();

        // No dedup: the second like is a second entry.
        assert_eq!(post.likes.len(), 2);
        assert_eq!(post.likes, vec![a, a]);
    }

    #[tokio::test]
    async fn like_post_on_missing_post_fails() {
        let (deps, a, _) = deps_with_users().await;

        let err = like_post(a, PostId::new(), &deps).await.unwrap_err();
        assert!(err.to_string().contains("Post not found"));
    }

    #[tokio::test]
    async fn feed_is_friends_and_self_oldest_first() {
        let (deps, a, b) = deps_with_users().await;
        let stranger = register("Evil", "Eve", "eve@example.com", "pw", &deps)
            .await
            .unwrap()
            .user
            .id;

        follow(a, b, &deps).await.unwrap();

        let first = create_post(b, "first".into(), "by b".into(), &deps)
            .await
            .unwrap();
        let own = create_post(a, "own".into(), "by a".into(), &deps)
            .await
            .unwrap();
        create_post(stranger, "hidden".into(), "by eve".into(), &deps)
            .await
            .unwrap();
        let last = create_post(b, "last".into(), "by b".into(), &deps)
            .await
            .unwrap();

        let feed = feed(a, &deps).await.unwrap();

        let ids: Vec<_> = feed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first.id, own.id, last.id]);
    }

    #[tokio::test]
    async fn feed_excludes_non_friends() {
        let (deps, a, b) = deps_with_users().await;

        // No follow: b's posts must never appear in a's feed.
        create_post(b, "unseen".into(), "by b".into(), &deps)
            .await
            .unwrap();

        assert!(feed(a, &deps).await.unwrap().is_empty());
    }
}
