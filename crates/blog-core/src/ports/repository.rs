use async_trait::async_trait;

use crate::domain::{
    BlogPost, Comment, CommentId, NewComment, NewPost, NewUser, PostChanges, PostId, User, UserId,
};
use crate::error::RepoError;

/// Generic repository trait shared by every table.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, UserId> {
    /// Find a user by their email address (exact, case-sensitive match).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a user and settle its role in the same transaction.
    ///
    /// A second insert with an existing email fails with
    /// [`RepoError::Constraint`].
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;

    /// Replace a user's password digest.
    async fn update_password_hash(&self, id: UserId, password_hash: String)
    -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<BlogPost, PostId> {
    /// All posts, ordered by identifier.
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    async fn find_by_author(&self, author_id: UserId) -> Result<Vec<BlogPost>, RepoError>;

    /// Insert a post. A duplicate title fails with [`RepoError::Constraint`].
    async fn insert(&self, post: NewPost) -> Result<BlogPost, RepoError>;

    /// Overwrite every editable field and the author of a post.
    async fn update(&self, id: PostId, changes: PostChanges) -> Result<BlogPost, RepoError>;

    /// Delete a post and all of its comments atomically.
    ///
    /// Returns the number of comments removed, or [`RepoError::NotFound`].
    async fn delete_cascade(&self, id: PostId) -> Result<u64, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, CommentId> {
    /// Comments of a post, oldest first.
    async fn find_by_post(&self, post_id: PostId) -> Result<Vec<Comment>, RepoError>;

    async fn find_by_author(&self, author_id: UserId) -> Result<Vec<Comment>, RepoError>;

    /// Insert a comment in a single statement.
    ///
    /// The post reference is checked by the store's foreign key, so a post
    /// that is missing or deleted concurrently fails with
    /// [`RepoError::MissingReference`].
    async fn insert(&self, comment: NewComment) -> Result<Comment, RepoError>;
}
