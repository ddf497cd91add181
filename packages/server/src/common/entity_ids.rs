//! Typed ID aliases for the domain entities.
//!
//! ```rust
//! use server_core::common::{PostId, UserId};
//!
//! // Incompatible types - the compiler prevents mixing them up
//! let user_id: UserId = UserId::new();
//! let post_id: PostId = PostId::new();
//! ```

pub use super::id::Id;

/// Marker type for User entities.
pub struct User;

/// Marker type for Post entities.
pub struct Post;

/// Marker type for Comment entities.
pub struct Comment;

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Post entities.
pub type PostId = Id<Post>;

/// Typed ID for Comment entities.
pub type CommentId = Id<Comment>;
