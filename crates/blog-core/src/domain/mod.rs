//! Domain entities - the core business objects.

mod comment;
mod post;
mod principal;
mod user;

pub use comment::{Comment, CommentId, NewComment};
pub use post::{BlogPost, NewPost, PostChanges, PostFields, PostId};
pub use principal::Principal;
pub use user::{
    AdminPolicy, FIRST_ACCOUNT_ID, NewUser, Role, RoleAssignment, User, UserId,
    mask_email,
};

use crate::error::DomainError;

/// Column width shared by every short text field.
pub const MAX_FIELD_LEN: usize = 250;

/// Reject blank values and values wider than their column.
pub(crate) fn require_field(field: &str, value: &str, max_len: Option<usize>) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    if let Some(max) = max_len {
        if value.chars().count() > max {
            return Err(DomainError::Validation(format!(
                "{field} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}
