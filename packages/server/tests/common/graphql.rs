use juniper::http::GraphQLRequest;
use serde_json::{json, Value};

use server_core::server::graphql::{create_schema, GraphQLContext, Schema};

/// Executes GraphQL operations against the schema with an injected context
pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

impl GraphQLClient {
    pub fn with_context(context: GraphQLContext) -> Self {
        Self {
            schema: create_schema(),
            context,
        }
    }

    /// Execute an operation and return the full response JSON
    /// (`{"data": ..., "errors": [...]}`).
    pub async fn execute(&self, query: &str) -> Value {
        let request: GraphQLRequest =
            serde_json::from_value(json!({ "query": query })).expect("valid request");
        let response = request.execute(&self.schema, &self.context).await;
        serde_json::to_value(&response).expect("serializable response")
    }

    /// Execute an operation that is expected to succeed; returns `data`.
    pub async fn execute_ok(&self, query: &str) -> Value {
        let response = self.execute(query).await;
        assert!(
            response.get("errors").is_none(),
            "unexpected errors: {}",
            response
        );
        response["data"].clone()
    }

    /// Execute an operation that is expected to fail; returns the error
    /// messages.
    pub async fn execute_err(&self, query: &str) -> Vec<String> {
        let response = self.execute(query).await;
        response["errors"]
            .as_array()
            .unwrap_or_else(|| panic!("expected errors, got: {}", response))
            .iter()
            .map(|e| e["message"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}
