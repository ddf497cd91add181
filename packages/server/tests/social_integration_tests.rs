//! Integration tests for the social graph: following, posting, liking,
//! commenting, and feed assembly.

mod common;

use common::{GraphQLClient, TestHarness};
use server_core::common::UserId;
use server_core::domains::posts::models::NewPost;

async fn register(harness: &TestHarness, first: &str, last: &str, email: &str) -> UserId {
    let data = harness
        .graphql_public()
        .execute_ok(&format!(
            r#"mutation {{
                register(input: {{firstName: "{first}", lastName: "{last}", email: "{email}", password: "pw"}}) {{
                    user {{ id }}
                }}
            }}"#
        ))
        .await;
    UserId::parse(data["register"]["user"]["id"].as_str().unwrap()).unwrap()
}

async fn create_post(client: &GraphQLClient, title: &str, content: &str) -> String {
    let data = client
        .execute_ok(&format!(
            r#"mutation {{ createPost(input: {{title: "{title}", content: "{content}"}}) {{ id }} }}"#
        ))
        .await;
    data["createPost"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_follow_then_feed_end_to_end() {
    let harness = TestHarness::new();
    let a = register(&harness, "Ada", "Lovelace", "ada@example.com").await;
    let b = register(&harness, "Grace", "Hopper", "grace@example.com").await;

    // A follows B
    harness
        .graphql_as(a)
        .execute_ok(&format!(
            r#"mutation {{ follow(friend: "{b}") {{ friends {{ id }} }} }}"#
        ))
        .await;

    // B creates a post
    create_post(&harness.graphql_as(b), "Compilers", "Notes on compilers").await;

    // A's feed contains exactly that post
    let data = harness
        .graphql_as(a)
        .execute_ok("{ feed { title likes creator { displayName } } }")
        .await;

    let feed = data["feed"].as_array().unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["title"], "Compilers");
    assert_eq!(feed[0]["likes"], 0);
    assert_eq!(feed[0]["creator"]["displayName"], "Grace Hopper");
}

#[tokio::test]
async fn test_feed_is_ordered_and_excludes_non_friends() {
    let harness = TestHarness::new();
    let a = register(&harness, "Ada", "Lovelace", "ada@example.com").await;
    let b = register(&harness, "Grace", "Hopper", "grace@example.com").await;
    let stranger = register(&harness, "Evil", "Eve", "eve@example.com").await;

    harness
        .graphql_as(a)
        .execute_ok(&format!(r#"mutation {{ follow(friend: "{b}") {{ id }} }}"#))
        .await;

    create_post(&harness.graphql_as(b), "first", "by b").await;
    create_post(&harness.graphql_as(a), "own", "by a").await;
    create_post(&harness.graphql_as(stranger), "hidden", "by eve").await;
    create_post(&harness.graphql_as(b), "last", "by b").await;

    let data = harness.graphql_as(a).execute_ok("{ feed { title } }").await;

    let titles: Vec<&str> = data["feed"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "own", "last"]);
}

#[tokio::test]
async fn test_like_post_twice_counts_twice() {
    let harness = TestHarness::new();
    let a = register(&harness, "Ada", "Lovelace", "ada@example.com").await;
    let client = harness.graphql_as(a);

    let post_id = create_post(&client, "t", "c").await;

    let like = format!(r#"mutation {{ likePost(postId: "{post_id}") {{ likes }} }}"#);
    let first = client.execute_ok(&like).await;
    assert_eq!(first["likePost"]["likes"], 1);

    let second = client.execute_ok(&like).await;
    assert_eq!(second["likePost"]["likes"], 2);
}

#[tokio::test]
async fn test_comment_post_and_read_back() {
    let harness = TestHarness::new();
    let a = register(&harness, "Ada", "Lovelace", "ada@example.com").await;
    let b = register(&harness, "Grace", "Hopper", "grace@example.com").await;

    let post_id = create_post(&harness.graphql_as(b), "t", "c").await;

    harness
        .graphql_as(a)
        .execute_ok(&format!(
            r#"mutation {{ commentPost(input: {{message: "nice one", postId: "{post_id}"}}) {{ id message }} }}"#
        ))
        .await;

    // Via the comments query
    let data = harness
        .graphql_as(b)
        .execute_ok(&format!(
            r#"{{ comments(postId: "{post_id}") {{ message creator {{ displayName }} }} }}"#
        ))
        .await;
    let comments = data["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["message"], "nice one");
    assert_eq!(comments[0]["creator"]["displayName"], "Ada Lovelace");

    // And via the post's comments relation
    let data = harness
        .graphql_as(b)
        .execute_ok(&format!(
            r#"{{ post(postId: "{post_id}") {{ comments {{ message }} }} }}"#
        ))
        .await;
    assert_eq!(data["post"]["comments"][0]["message"], "nice one");
}

#[tokio::test]
async fn test_update_avatar_round_trip() {
    let harness = TestHarness::new();
    let a = register(&harness, "Ada", "Lovelace", "ada@example.com").await;
    let client = harness.graphql_as(a);

    let data = client
        .execute_ok(
            r#"mutation { updateAvatar(input: {url: "https://cdn.example.com/ada.png"}) { avatar { url } } }"#,
        )
        .await;
    assert_eq!(
        data["updateAvatar"]["avatar"]["url"],
        "https://cdn.example.com/ada.png"
    );

    let me = client.execute_ok("{ me { avatar { url } } }").await;
    assert_eq!(me["me"]["avatar"]["url"], "https://cdn.example.com/ada.png");
}

#[tokio::test]
async fn test_profile_lookup() {
    let harness = TestHarness::new();
    let a = register(&harness, "Ada", "Lovelace", "ada@example.com").await;
    let b = register(&harness, "Grace", "Hopper", "grace@example.com").await;
    let client = harness.graphql_as(a);

    let data = client
        .execute_ok(&format!(r#"{{ profile(userId: "{b}") {{ displayName }} }}"#))
        .await;
    assert_eq!(data["profile"]["displayName"], "Grace Hopper");

    // Omitted id resolves to null, not the caller
    let data = client.execute_ok("{ profile { id } }").await;
    assert!(data["profile"].is_null());
}

#[tokio::test]
async fn test_missing_creator_resolves_to_null_not_an_error() {
    let harness = TestHarness::new();
    let a = register(&harness, "Ada", "Lovelace", "ada@example.com").await;

    // A post whose creator id matches no stored user
    let orphan = harness
        .deps
        .posts
        .create(NewPost {
            title: "orphan".to_string(),
            content: "no author".to_string(),
            creator: UserId::new(),
        })
        .await
        .unwrap();

    let data = harness
        .graphql_as(a)
        .execute_ok(&format!(
            r#"{{ post(postId: "{}") {{ title creator {{ displayName }} }} }}"#,
            orphan.id
        ))
        .await;

    assert_eq!(data["post"]["title"], "orphan");
    assert!(data["post"]["creator"].is_null());
}

#[tokio::test]
async fn test_store_failure_fails_only_that_branch() {
    let harness = TestHarness::new();
    let a = register(&harness, "Ada", "Lovelace", "ada@example.com").await;
    let client = harness.graphql_as(a);
    let post_id = create_post(&client, "t", "c").await;

    harness.stores.comments.set_failing(true);

    let response = client
        .execute(&format!(
            r#"{{ post(postId: "{post_id}") {{ title comments {{ message }} }} me {{ email }} }}"#
        ))
        .await;

    // The comments branch fails...
    let messages: Vec<&str> = response["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert!(messages.iter().any(|m| m.contains("comment store unavailable")));

    // ...while the sibling top-level field still resolves
    assert_eq!(response["data"]["me"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_duplicate_follows_are_kept() {
    let harness = TestHarness::new();
    let a = register(&harness, "Ada", "Lovelace", "ada@example.com").await;
    let b = register(&harness, "Grace", "Hopper", "grace@example.com").await;
    let client = harness.graphql_as(a);

    let follow = format!(r#"mutation {{ follow(friend: "{b}") {{ friends {{ id }} }} }}"#);
    client.execute_ok(&follow).await;
    let data = client.execute_ok(&follow).await;

    // The friends list records both entries; the resolved relation returns
    // each user once (in-set lookup).
    let friends = data["follow"]["friends"].as_array().unwrap();
    assert_eq!(friends.len(), 1);

    let user = harness.deps.users.find_by_id(a).await.unwrap().unwrap();
    assert_eq!(user.friends, vec![b, b]);
}
