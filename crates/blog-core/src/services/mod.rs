//! Services - the rules of the blog, written against the ports only.
//!
//! Every operation takes the request's [`Principal`](crate::domain::Principal)
//! explicitly; nothing here reads ambient "current user" state.

mod authz;
mod content;
mod identity;
mod session;

pub use authz::{Authorization, require_admin};
pub use content::{AuthorSummary, CommentView, ContentGraph, PostSummary, PostThread};
pub use identity::IdentityDirectory;
pub use session::{Session, SessionManager};
