use thiserror::Error;

/// Authentication and account errors surfaced to API callers.
///
/// `InvalidCredentials` covers both unknown email and wrong password so the
/// login endpoint cannot be used to probe which addresses are registered.
/// `FieldError`'s `Display` conversion carries these into GraphQL responses.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
