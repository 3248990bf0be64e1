//! SQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use blog_core::domain::{
    BlogPost, Comment, FIRST_ACCOUNT_ID, NewComment, NewPost, NewUser, PostChanges, PostId, Role,
    RoleAssignment, User, UserId, mask_email,
};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::sql_base::{SqlRepository, map_db_err};

/// SQL user repository.
pub type SqlUserRepository = SqlRepository<UserEntity>;

/// SQL post repository.
pub type SqlPostRepository = SqlRepository<PostEntity>;

/// SQL comment repository.
pub type SqlCommentRepository = SqlRepository<CommentEntity>;

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        let first_account = new_user.role == RoleAssignment::FirstAccount;
        let initial_role = match new_user.role {
            RoleAssignment::Fixed(role) => role,
            RoleAssignment::FirstAccount => Role::Member,
        };

        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = user::ActiveModel {
            email: Set(new_user.email),
            name: Set(new_user.name),
            password_hash: Set(new_user.password_hash),
            role: Set(initial_role.as_str().to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        // The identifier is only known after the insert; promoting inside
        // the same transaction means no other reader ever sees the account
        // with the wrong role.
        let model = if first_account && model.id == FIRST_ACCOUNT_ID {
            let mut active = model.into_active_model();
            active.role = Set(Role::Admin.as_str().to_string());
            active.update(&txn).await.map_err(map_db_err)?
        } else {
            model
        };

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn update_password_hash(
        &self,
        id: UserId,
        password_hash: String,
    ) -> Result<(), RepoError> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_author(&self, author_id: UserId) -> Result<Vec<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, new_post: NewPost) -> Result<BlogPost, RepoError> {
        let fields = new_post.fields;
        let model = post::ActiveModel {
            author_id: Set(new_post.author_id),
            title: Set(fields.title),
            subtitle: Set(fields.subtitle),
            date: Set(new_post.created_on),
            body: Set(fields.body),
            img_url: Set(fields.img_url),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<BlogPost, RepoError> {
        // Write before reading so SQLite takes the write lock up front.
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let fields = changes.fields;
        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(fields.title))
            .col_expr(post::Column::Subtitle, Expr::value(fields.subtitle))
            .col_expr(post::Column::ImgUrl, Expr::value(fields.img_url))
            .col_expr(post::Column::Body, Expr::value(fields.body))
            .col_expr(post::Column::AuthorId, Expr::value(changes.editor_id))
            .filter(post::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            return Err(RepoError::NotFound);
        }

        let model = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete_cascade(&self, id: PostId) -> Result<u64, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let comments = CommentEntity::delete_many()
            .filter(comment::Column::BlogId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let post = PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if post.rows_affected == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(comments.rows_affected)
    }
}

#[async_trait]
impl CommentRepository for SqlCommentRepository {
    async fn find_by_post(&self, post_id: PostId) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::BlogId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_author(&self, author_id: UserId) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::AuthorId.eq(author_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let post_id = new_comment.post_id;

        // A single statement: the foreign key on `blog_id` rejects a post that
        // is missing or was deleted concurrently.
        let model = comment::ActiveModel {
            blog_id: Set(post_id),
            author_id: Set(new_comment.author_id),
            body: Set(new_comment.body),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match map_db_err(e) {
            RepoError::MissingReference(_) => {
                RepoError::MissingReference(format!("blog post {post_id}"))
            }
            other => other,
        })?;

        Ok(model.into())
    }
}
