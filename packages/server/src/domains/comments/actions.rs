//! Comment mutations.

use anyhow::Result;

use crate::common::{PostId, UserId};
use crate::domains::comments::models::{Comment, NewComment};
use crate::kernel::ServerDeps;

/// Attach a comment by the caller to a post.
///
/// The post id is stored as given; comments are immutable once written.
pub async fn comment_post(
    caller: UserId,
    post_id: PostId,
    message: String,
    deps: &ServerDeps,
) -> Result<Comment> {
    deps.comments
        .create(NewComment {
            message,
            post_id,
            creator: caller,
        })
        .await
}
