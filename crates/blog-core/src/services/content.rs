//! Content graph: posts, comments and the rules that keep them consistent.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::{
    BlogPost, Comment, NewComment, NewPost, PostChanges, PostFields, PostId, Principal, User,
    UserId,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, PostRepository, UserRepository};

use super::authz::{Authorization, require_admin};

const DUPLICATE_TITLE: &str = "a post with that title already exists";

/// Public view of an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: UserId,
    pub name: String,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

/// A comment together with its author.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub comment: Comment,
    pub author: Option<AuthorSummary>,
}

/// A post with its author, as shown in listings.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub post: BlogPost,
    pub author: Option<AuthorSummary>,
}

/// A post page: the post, its author and its comments.
#[derive(Debug, Clone, Serialize)]
pub struct PostThread {
    pub post: BlogPost,
    pub author: Option<AuthorSummary>,
    pub comments: Vec<CommentView>,
}

pub struct ContentGraph {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
}

impl ContentGraph {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            posts,
            comments,
            users,
        }
    }

    /// Publish a new post. Administrator only.
    pub async fn create_post(
        &self,
        principal: &Principal,
        fields: PostFields,
    ) -> Result<BlogPost, DomainError> {
        let admin = gate(principal, "create_post")?;
        fields.validate()?;

        let post = self
            .posts
            .insert(NewPost::new(admin.id, fields))
            .await
            .map_err(|e| title_conflict(e, None))?;

        tracing::info!(post_id = post.id, author_id = admin.id, "Post created");
        Ok(post)
    }

    /// Overwrite a post and make the editor its author. Administrator only.
    pub async fn edit_post(
        &self,
        principal: &Principal,
        post_id: PostId,
        fields: PostFields,
    ) -> Result<BlogPost, DomainError> {
        let admin = gate(principal, "edit_post")?;
        fields.validate()?;

        let changes = PostChanges {
            editor_id: admin.id,
            fields,
        };
        let post = self
            .posts
            .update(post_id, changes)
            .await
            .map_err(|e| title_conflict(e, Some(post_id)))?;

        tracing::info!(post_id, editor_id = admin.id, "Post edited");
        Ok(post)
    }

    /// Delete a post and every comment on it. Administrator only.
    pub async fn delete_post(&self, principal: &Principal, post_id: PostId) -> Result<(), DomainError> {
        let admin = gate(principal, "delete_post")?;

        let removed = self.posts.delete_cascade(post_id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("BlogPost", post_id),
            other => other.into(),
        })?;

        tracing::info!(post_id, actor_id = admin.id, comments_removed = removed, "Post deleted");
        Ok(())
    }

    /// Comment on a post. Any logged-in user.
    pub async fn add_comment(
        &self,
        principal: &Principal,
        post_id: PostId,
        body: String,
    ) -> Result<Comment, DomainError> {
        let user = principal.require_user()?;
        let new_comment = NewComment::new(post_id, user.id, body)?;

        let comment = self.comments.insert(new_comment).await.map_err(|e| match e {
            RepoError::MissingReference(_) | RepoError::NotFound => {
                DomainError::not_found("BlogPost", post_id)
            }
            other => other.into(),
        })?;

        tracing::info!(comment_id = comment.id, post_id, author_id = user.id, "Comment added");
        Ok(comment)
    }

    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, DomainError> {
        Ok(self.posts.find_all().await?)
    }

    pub async fn get_post(&self, post_id: PostId) -> Result<BlogPost, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("BlogPost", post_id))
    }

    /// All posts with their authors, ordered by identifier.
    pub async fn list_post_summaries(&self) -> Result<Vec<PostSummary>, DomainError> {
        let posts = self.posts.find_all().await?;
        let authors = self.author_index(posts.iter().map(|p| p.author_id)).await?;

        Ok(posts
            .into_iter()
            .map(|post| PostSummary {
                author: authors.get(&post.author_id).cloned().flatten(),
                post,
            })
            .collect())
    }

    /// Everything a post page shows.
    pub async fn post_thread(&self, post_id: PostId) -> Result<PostThread, DomainError> {
        let post = self.get_post(post_id).await?;
        let comments = self.comments.find_by_post(post_id).await?;

        let wanted = comments
            .iter()
            .map(|c| c.author_id)
            .chain(std::iter::once(post.author_id));
        let authors = self.author_index(wanted).await?;

        let author = authors.get(&post.author_id).cloned().flatten();
        let comments = comments
            .into_iter()
            .map(|comment| CommentView {
                author: authors.get(&comment.author_id).cloned().flatten(),
                comment,
            })
            .collect();

        Ok(PostThread {
            post,
            author,
            comments,
        })
    }

    pub async fn posts_by_author(&self, author_id: UserId) -> Result<Vec<BlogPost>, DomainError> {
        Ok(self.posts.find_by_author(author_id).await?)
    }

    pub async fn comments_by_author(&self, author_id: UserId) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.find_by_author(author_id).await?)
    }

    /// Look each distinct user up once. Missing users map to `None`.
    async fn author_index(
        &self,
        ids: impl IntoIterator<Item = UserId>,
    ) -> Result<HashMap<UserId, Option<AuthorSummary>>, DomainError> {
        let mut authors = HashMap::new();
        for id in ids {
            if !authors.contains_key(&id) {
                let summary = self.users.find_by_id(id).await?.as_ref().map(AuthorSummary::from);
                authors.insert(id, summary);
            }
        }
        Ok(authors)
    }
}

fn gate<'a>(principal: &'a Principal, action: &'static str) -> Result<&'a User, DomainError> {
    match require_admin(principal) {
        Authorization::Authorized(admin) => Ok(admin),
        Authorization::Denied => {
            tracing::warn!(
                action,
                user_id = principal.user().map(|u| u.id),
                "Privileged action denied"
            );
            Err(DomainError::Forbidden)
        }
    }
}

fn title_conflict(err: RepoError, post_id: Option<PostId>) -> DomainError {
    match (err, post_id) {
        (RepoError::Constraint(_), _) => DomainError::Duplicate(DUPLICATE_TITLE.to_string()),
        (RepoError::NotFound, Some(id)) => DomainError::not_found("BlogPost", id),
        (other, _) => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::{CommentId, NewUser, Role};
    use crate::ports::BaseRepository;

    /// A store that must never be reached.
    struct Untouchable;

    #[async_trait]
    impl BaseRepository<BlogPost, PostId> for Untouchable {
        async fn find_by_id(&self, _id: PostId) -> Result<Option<BlogPost>, RepoError> {
            panic!("post store touched")
        }
    }

    #[async_trait]
    impl PostRepository for Untouchable {
        async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
            panic!("post store touched")
        }
        async fn find_by_author(&self, _author_id: UserId) -> Result<Vec<BlogPost>, RepoError> {
            panic!("post store touched")
        }
        async fn insert(&self, _post: NewPost) -> Result<BlogPost, RepoError> {
            panic!("post store touched")
        }
        async fn update(&self, _id: PostId, _changes: PostChanges) -> Result<BlogPost, RepoError> {
            panic!("post store touched")
        }
        async fn delete_cascade(&self, _id: PostId) -> Result<u64, RepoError> {
            panic!("post store touched")
        }
    }

    #[async_trait]
    impl BaseRepository<Comment, CommentId> for Untouchable {
        async fn find_by_id(&self, _id: CommentId) -> Result<Option<Comment>, RepoError> {
            panic!("comment store touched")
        }
    }

    #[async_trait]
    impl CommentRepository for Untouchable {
        async fn find_by_post(&self, _post_id: PostId) -> Result<Vec<Comment>, RepoError> {
            panic!("comment store touched")
        }
        async fn find_by_author(&self, _author_id: UserId) -> Result<Vec<Comment>, RepoError> {
            panic!("comment store touched")
        }
        async fn insert(&self, _comment: NewComment) -> Result<Comment, RepoError> {
            panic!("comment store touched")
        }
    }

    #[async_trait]
    impl BaseRepository<User, UserId> for Untouchable {
        async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, RepoError> {
            panic!("user store touched")
        }
    }

    #[async_trait]
    impl UserRepository for Untouchable {
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, RepoError> {
            panic!("user store touched")
        }
        async fn insert(&self, _user: NewUser) -> Result<User, RepoError> {
            panic!("user store touched")
        }
        async fn update_password_hash(&self, _id: UserId, _hash: String) -> Result<(), RepoError> {
            panic!("user store touched")
        }
    }

    fn graph() -> ContentGraph {
        ContentGraph::new(
            Arc::new(Untouchable),
            Arc::new(Untouchable),
            Arc::new(Untouchable),
        )
    }

    fn member() -> Principal {
        Principal::from(User {
            id: 2,
            email: "reader@example.com".to_string(),
            name: "Reader".to_string(),
            password_hash: String::new(),
            role: Role::Member,
        })
    }

    fn fields() -> PostFields {
        PostFields {
            title: "Title".to_string(),
            subtitle: "Subtitle".to_string(),
            body: "Body".to_string(),
            img_url: "https://example.com/a.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_privileged_actions_denied_before_store_access() {
        let graph = graph();

        for principal in [Principal::Anonymous, member()] {
            assert!(matches!(
                graph.create_post(&principal, fields()).await,
                Err(DomainError::Forbidden)
            ));
            assert!(matches!(
                graph.edit_post(&principal, 999, fields()).await,
                Err(DomainError::Forbidden)
            ));
            assert!(matches!(
                graph.delete_post(&principal, 999).await,
                Err(DomainError::Forbidden)
            ));
        }
    }

    #[tokio::test]
    async fn test_anonymous_comment_rejected_before_store_access() {
        let result = graph()
            .add_comment(&Principal::Anonymous, 1, "hi".to_string())
            .await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_blank_comment_rejected() {
        let result = graph().add_comment(&member(), 1, "   ".to_string()).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
