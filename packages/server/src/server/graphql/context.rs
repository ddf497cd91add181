use crate::common::auth::HasCaller;
use crate::common::UserId;
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Shared dependencies plus the per-request caller identity resolved by the
/// session middleware.
#[derive(Clone)]
pub struct GraphQLContext {
    pub deps: ServerDeps,
    pub auth_user: Option<AuthUser>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(deps: ServerDeps, auth_user: Option<AuthUser>) -> Self {
        Self { deps, auth_user }
    }
}

impl HasCaller for GraphQLContext {
    fn caller(&self) -> Option<UserId> {
        self.auth_user.map(|u| u.user_id)
    }
}
