//! GraphQL schema definition.
//!
//! Every protected field wraps its body in `guard::protected`; `register`
//! and `login` are the only unwrapped operations.

use juniper::{EmptySubscription, FieldError, FieldResult, RootNode};
use tracing::error;
use uuid::Uuid;

use super::context::GraphQLContext;
use crate::common::auth::guard;
use crate::common::{PostId, UserId};
use crate::domains::auth::actions as auth_actions;
use crate::domains::comments::actions as comment_actions;
use crate::domains::comments::data::{CommentData, CommentInput};
use crate::domains::posts::actions as post_actions;
use crate::domains::posts::data::{PostData, PostInput};
use crate::domains::users::actions as user_actions;
use crate::domains::users::data::{
    AuthPayload, AvatarInput, LoginInput, RegisterInput, UserData,
};

/// Convert anyhow::Error to juniper FieldError for thin resolvers
fn to_field_error(e: anyhow::Error) -> FieldError {
    FieldError::new(e.to_string(), juniper::Value::null())
}

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    /// The caller's own profile
    async fn me(ctx: &GraphQLContext) -> FieldResult<Option<UserData>> {
        guard::protected(ctx, |caller| async move {
            let user = ctx
                .deps
                .users
                .find_by_id(caller)
                .await
                .map_err(to_field_error)?;
            Ok(user.map(UserData::from))
        })
        .await
    }

    /// Look up any user's profile by id
    async fn profile(
        ctx: &GraphQLContext,
        user_id: Option<Uuid>,
    ) -> FieldResult<Option<UserData>> {
        guard::protected(ctx, |_| async move {
            let Some(user_id) = user_id else {
                return Ok(None);
            };
            let user = ctx
                .deps
                .users
                .find_by_id(UserId::from_uuid(user_id))
                .await
                .map_err(to_field_error)?;
            Ok(user.map(UserData::from))
        })
        .await
    }

    /// Posts by the caller's friends (and the caller), oldest first
    async fn feed(ctx: &GraphQLContext) -> FieldResult<Vec<PostData>> {
        guard::protected(ctx, |caller| async move {
            let posts = post_actions::feed(caller, &ctx.deps).await.map_err(|e| {
                error!("Failed to assemble feed: {}", e);
                to_field_error(e)
            })?;
            Ok(posts.into_iter().map(PostData::from).collect())
        })
        .await
    }

    /// A single post by id
    async fn post(ctx: &GraphQLContext, post_id: Uuid) -> FieldResult<Option<PostData>> {
        guard::protected(ctx, |_| async move {
            let post = ctx
                .deps
                .posts
                .find_by_id(PostId::from_uuid(post_id))
                .await
                .map_err(to_field_error)?;
            Ok(post.map(PostData::from))
        })
        .await
    }

    /// Comments on a post, oldest first
    async fn comments(ctx: &GraphQLContext, post_id: Uuid) -> FieldResult<Vec<CommentData>> {
        guard::protected(ctx, |_| async move {
            let comments = ctx
                .deps
                .comments
                .find_by_post(PostId::from_uuid(post_id))
                .await
                .map_err(to_field_error)?;
            Ok(comments.into_iter().map(CommentData::from).collect())
        })
        .await
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    /// Create an account and return the user with a session token
    async fn register(ctx: &GraphQLContext, input: RegisterInput) -> FieldResult<AuthPayload> {
        let authed = auth_actions::register(
            &input.first_name,
            &input.last_name,
            &input.email,
            &input.password,
            &ctx.deps,
        )
        .await?;

        Ok(AuthPayload {
            user: UserData::from(authed.user),
            token: authed.token,
        })
    }

    /// Exchange credentials for a session token
    async fn login(ctx: &GraphQLContext, input: LoginInput) -> FieldResult<AuthPayload> {
        let authed = auth_actions::login(&input.email, &input.password, &ctx.deps).await?;

        Ok(AuthPayload {
            user: UserData::from(authed.user),
            token: authed.token,
        })
    }

    /// Replace the caller's avatar
    async fn update_avatar(ctx: &GraphQLContext, input: AvatarInput) -> FieldResult<UserData> {
        guard::protected(ctx, |caller| async move {
            let user = user_actions::update_avatar(caller, input.url, &ctx.deps)
                .await
                .map_err(to_field_error)?;
            Ok(UserData::from(user))
        })
        .await
    }

    /// Create a post owned by the caller
    async fn create_post(ctx: &GraphQLContext, input: PostInput) -> FieldResult<PostData> {
        guard::protected(ctx, |caller| async move {
            let post = post_actions::create_post(caller, input.title, input.content, &ctx.deps)
                .await
                .map_err(to_field_error)?;
            Ok(PostData::from(post))
        })
        .await
    }

    /// Record a like by the caller on a post
    async fn like_post(ctx: &GraphQLContext, post_id: Uuid) -> FieldResult<PostData> {
        guard::protected(ctx, |caller| async move {
            let post = post_actions::like_post(caller, PostId::from_uuid(post_id), &ctx.deps)
                .await
                .map_err(to_field_error)?;
            Ok(PostData::from(post))
        })
        .await
    }

    /// Attach a comment by the caller to a post
    async fn comment_post(ctx: &GraphQLContext, input: CommentInput) -> FieldResult<CommentData> {
        guard::protected(ctx, |caller| async move {
            let comment = comment_actions::comment_post(
                caller,
                PostId::from_uuid(input.post_id),
                input.message,
                &ctx.deps,
            )
            .await
            .map_err(to_field_error)?;
            Ok(CommentData::from(comment))
        })
        .await
    }

    /// Append a user to the caller's friends list
    async fn follow(ctx: &GraphQLContext, friend: Uuid) -> FieldResult<UserData> {
        guard::protected(ctx, |caller| async move {
            let user = user_actions::follow(caller, UserId::from_uuid(friend), &ctx.deps)
                .await
                .map_err(to_field_error)?;
            Ok(UserData::from(user))
        })
        .await
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
