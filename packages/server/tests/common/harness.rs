use std::sync::Arc;

use server_core::common::UserId;
use server_core::domains::auth::JwtService;
use server_core::kernel::test_dependencies::{memory_deps, TestStores};
use server_core::kernel::ServerDeps;
use server_core::server::graphql::GraphQLContext;
use server_core::server::middleware::AuthUser;

use super::GraphQLClient;

/// Test environment: in-memory stores plus the session token service.
///
/// No database or network; GraphQL operations execute directly against the
/// schema with an injected context.
pub struct TestHarness {
    pub deps: ServerDeps,
    pub stores: TestStores,
    pub jwt_service: Arc<JwtService>,
}

impl TestHarness {
    pub fn new() -> Self {
        let jwt_service = Arc::new(JwtService::new(
            "test_secret_key",
            "test_issuer".to_string(),
        ));
        let (deps, stores) = memory_deps(jwt_service.clone());
        Self {
            deps,
            stores,
            jwt_service,
        }
    }

    /// Client with no caller identity
    pub fn graphql_public(&self) -> GraphQLClient {
        GraphQLClient::with_context(GraphQLContext::new(self.deps.clone(), None))
    }

    /// Client authenticated as the given user
    pub fn graphql_as(&self, user_id: UserId) -> GraphQLClient {
        let auth_user = AuthUser { user_id };
        GraphQLClient::with_context(GraphQLContext::new(self.deps.clone(), Some(auth_user)))
    }

    /// Client whose identity is resolved from a bearer token, exactly as the
    /// session middleware would resolve it.
    pub fn graphql_with_token(&self, token: &str) -> GraphQLClient {
        let auth_user = self
            .jwt_service
            .verify_token(token)
            .map(|user_id| AuthUser { user_id });
        GraphQLClient::with_context(GraphQLContext::new(self.deps.clone(), auth_user))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
