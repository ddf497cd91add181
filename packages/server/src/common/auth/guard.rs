//! The access-policy guard for protected GraphQL fields.
//!
//! Policy is declarative: a field is protected by wrapping its resolver body
//! in [`protected`] at schema-definition time. The wrapper checks the
//! resolved caller identity once; the body never executes for anonymous
//! requests. Unprotected fields (`register`, `login`) simply don't wrap.

use std::future::Future;

use juniper::FieldResult;

use super::AuthError;
use crate::common::UserId;

/// A request context that may carry a verified caller identity.
pub trait HasCaller {
    /// The user identifier resolved from the session token, if any.
    fn caller(&self) -> Option<UserId>;
}

/// Runs `op` with the caller identity, or rejects with `Unauthenticated`.
///
/// The operation closure is not invoked at all when the context carries no
/// identity; its result (or failure) is passed through unchanged when it is.
pub async fn protected<C, F, Fut, T>(ctx: &C, op: F) -> FieldResult<T>
where
    C: HasCaller,
    F: FnOnce(UserId) -> Fut,
    Fut: Future<Output = FieldResult<T>>,
{
    match ctx.caller() {
        Some(caller) => op(caller).await,
        None => Err(AuthError::Unauthenticated.into()),
    }
}
