pub mod auth;
pub mod comments;
pub mod posts;
pub mod users;
