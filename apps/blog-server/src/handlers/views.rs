//! Conversions from domain values to API DTOs.

use blog_core::domain::{BlogPost, Comment, PostFields, User};
use blog_core::services::{AuthorSummary, CommentView, PostSummary, PostThread, Session};
use blog_shared::dto::{
    AuthResponse, AuthorResponse, CommentResponse, PostDetailResponse, PostRequest, PostResponse,
    UserResponse,
};

pub fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role.to_string(),
    }
}

pub fn auth_response(session: Session, expires_in: i64, user: &User) -> AuthResponse {
    AuthResponse {
        access_token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: expires_in.max(0) as u64,
        expires_at: session.expires_at.to_rfc3339(),
        user: user_response(user),
    }
}

fn author_response(author: AuthorSummary) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        name: author.name,
    }
}

pub fn post_response(post: BlogPost, author: Option<AuthorSummary>) -> PostResponse {
    PostResponse {
        date: post.display_date(),
        id: post.id,
        title: post.title,
        subtitle: post.subtitle,
        body: post.body,
        img_url: post.img_url,
        author_id: post.author_id,
        author: author.map(author_response),
    }
}

pub fn summary_response(summary: PostSummary) -> PostResponse {
    post_response(summary.post, summary.author)
}

pub fn comment_response(comment: Comment, author: Option<AuthorSummary>) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        body: comment.body,
        author_id: comment.author_id,
        author: author.map(author_response),
    }
}

pub fn thread_response(thread: PostThread) -> PostDetailResponse {
    PostDetailResponse {
        post: post_response(thread.post, thread.author),
        comments: thread
            .comments
            .into_iter()
            .map(|CommentView { comment, author }| comment_response(comment, author))
            .collect(),
    }
}

pub fn post_fields(req: PostRequest) -> PostFields {
    PostFields {
        title: req.title,
        subtitle: req.subtitle,
        body: req.body,
        img_url: req.img_url,
    }
}
