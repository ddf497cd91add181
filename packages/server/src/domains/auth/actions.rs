//! Registration and login flows.

use tracing::info;

use crate::common::auth::AuthError;
use crate::domains::auth::password;
use crate::domains::users::models::{NewUser, User};
use crate::kernel::ServerDeps;

/// A freshly authenticated user and their session token
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

/// Create an account and mint a first session token.
///
/// Fails with [`AuthError::DuplicateEmail`] when the address is taken. A
/// hashing failure (empty password) aborts the registration.
pub async fn register(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
    deps: &ServerDeps,
) -> Result<AuthenticatedUser, AuthError> {
    if deps.users.find_by_email(email).await?.is_some() {
        return Err(AuthError::DuplicateEmail);
    }

    let password_hash = password::hash_password(password)?;

    let user = deps
        .users
        .create(NewUser {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await?;

    let token = deps.jwt_service.create_token(user.id)?;
    info!(user_id = %user.id, "Registered new user");

    Ok(AuthenticatedUser { user, token })
}

/// Verify credentials and mint a session token.
///
/// Unknown email and wrong password are indistinguishable to the caller:
/// both fail with [`AuthError::InvalidCredentials`].
pub async fn login(
    email: &str,
    password: &str,
    deps: &ServerDeps,
) -> Result<AuthenticatedUser, AuthError> {
    let user: User = deps
        .users
        .find_by_email(email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !password::verify_password(password, &user.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    let token = deps.jwt_service.create_token(user.id)?;
    info!(user_id = %user.id, "User logged in");

    Ok(AuthenticatedUser { user, token })
}
