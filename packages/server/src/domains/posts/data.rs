use chrono::{DateTime, Utc};
use juniper::{FieldResult, GraphQLInputObject};
use uuid::Uuid;

use crate::common::{PostId, UserId};
use crate::domains::comments::data::CommentData;
use crate::domains::posts::models::Post;
use crate::domains::users::data::UserData;
use crate::server::graphql::context::GraphQLContext;

/// Post GraphQL data type
#[derive(Debug, Clone)]
pub struct PostData {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub creator: UserId,
    pub likes: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostData {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            creator: post.creator,
            likes: post.likes,
            created_at: post.created_at,
        }
    }
}

#[juniper::graphql_object(Context = GraphQLContext)]
impl PostData {
    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.content
    }

    /// Post author. Resolves to null if the user no longer exists, so one
    /// missing reference never fails sibling fields.
    async fn creator(&self, context: &GraphQLContext) -> FieldResult<Option<UserData>> {
        let user = context.deps.users.find_by_id(self.creator).await?;
        Ok(user.map(UserData::from))
    }

    /// Number of recorded likes (duplicates included)
    fn likes(&self) -> i32 {
        self.likes.len() as i32
    }

    /// Comments on this post, oldest first
    async fn comments(&self, context: &GraphQLContext) -> FieldResult<Vec<CommentData>> {
        let comments = context.deps.comments.find_by_post(self.id).await?;
        Ok(comments.into_iter().map(CommentData::from).collect())
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(GraphQLInputObject)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}
