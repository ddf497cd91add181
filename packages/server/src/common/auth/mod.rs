//! Authorization module.
//!
//! `guard::protected` is the single enforcement point for every field that
//! requires a caller identity:
//!
//! ```rust,ignore
//! guard::protected(ctx, |caller| async move {
//!     // resolver body, runs only with a verified identity
//! })
//! .await
//! ```
//!
//! Marking a new operation protected means wrapping its body; nothing else.

mod errors;
pub mod guard;

pub use errors::AuthError;
pub use guard::{protected, HasCaller};
