use serde::{Deserialize, Serialize};

use super::{PostId, UserId, require_field};
use crate::error::DomainError;

pub type CommentId = i32;

/// Comment entity - a reader's reply attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub body: String,
}

/// A comment waiting to be inserted.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: PostId,
    pub author_id: UserId,
    pub body: String,
}

impl NewComment {
    pub fn new(post_id: PostId, author_id: UserId, body: String) -> Result<Self, DomainError> {
        require_field("Comment", &body, None)?;
        Ok(Self {
            post_id,
            author_id,
            body,
        })
    }
}
