use juniper::{FieldResult, GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::common::UserId;
use crate::domains::posts::data::PostData;
use crate::domains::users::models::User;
use crate::server::graphql::context::GraphQLContext;

/// Structured avatar value wrapping the stored URL
#[derive(Debug, Clone, GraphQLObject)]
pub struct AvatarData {
    pub url: Option<String>,
}

/// User GraphQL data type
///
/// Public API projection of a user. The password hash never crosses into
/// this type.
#[derive(Debug, Clone)]
pub struct UserData {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub friends: Vec<UserId>,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            avatar_url: user.avatar_url,
            friends: user.friends,
        }
    }
}

#[juniper::graphql_object(Context = GraphQLContext)]
impl UserData {
    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }

    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }

    fn email(&self) -> &str {
        &self.email
    }

    /// First and last name joined for display
    fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn avatar(&self) -> AvatarData {
        AvatarData {
            url: self.avatar_url.clone(),
        }
    }

    /// Followed users, resolved with one batched in-set lookup
    async fn friends(&self, context: &GraphQLContext) -> FieldResult<Vec<UserData>> {
        let users = context.deps.users.find_by_ids(&self.friends).await?;
        Ok(users.into_iter().map(UserData::from).collect())
    }

    /// Posts created by this user, oldest first
    async fn posts(&self, context: &GraphQLContext) -> FieldResult<Vec<PostData>> {
        let posts = context.deps.posts.find_by_creator(self.id).await?;
        Ok(posts.into_iter().map(PostData::from).collect())
    }
}

/// register/login response: the user plus their session token
#[derive(GraphQLObject)]
#[graphql(context = GraphQLContext)]
pub struct AuthPayload {
    pub user: UserData,
    pub token: String,
}

#[derive(GraphQLInputObject)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(GraphQLInputObject)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(GraphQLInputObject)]
pub struct AvatarInput {
    pub url: String,
}
