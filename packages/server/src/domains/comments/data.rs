use chrono::{DateTime, Utc};
use juniper::{FieldResult, GraphQLInputObject};
use uuid::Uuid;

use crate::common::{CommentId, PostId, UserId};
use crate::domains::comments::models::Comment;
use crate::domains::users::data::UserData;
use crate::server::graphql::context::GraphQLContext;

/// Comment GraphQL data type
#[derive(Debug, Clone)]
pub struct CommentData {
    pub id: CommentId,
    pub message: String,
    pub post_id: PostId,
    pub creator: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentData {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            message: comment.message,
            post_id: comment.post_id,
            creator: comment.creator,
            created_at: comment.created_at,
        }
    }
}

#[juniper::graphql_object(Context = GraphQLContext)]
impl CommentData {
    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }

    fn message(&self) -> &str {
        &self.message
    }

    /// Comment author. Resolves to null if the user no longer exists.
    async fn creator(&self, context: &GraphQLContext) -> FieldResult<Option<UserData>> {
        let user = context.deps.users.find_by_id(self.creator).await?;
        Ok(user.map(UserData::from))
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(GraphQLInputObject)]
pub struct CommentInput {
    pub message: String,
    pub post_id: Uuid,
}
