//! Resource wrappers over the request pipeline.
//!
//! Each service is a thin enumeration of endpoint paths and parameter
//! shapes: one pipeline verb call per operation, with the classified
//! [`crate::client::Outcome`] passed straight back to the caller.
//! Sub-resources (emails, keys, comments, ...) are explicit composition:
//! an accessor constructs a child service borrowing the same client.

mod gists;
mod issues;
mod organizations;
mod repositories;
mod users;

pub use gists::*;
pub use issues::*;
pub use organizations::*;
pub use repositories::*;
pub use users::*;
