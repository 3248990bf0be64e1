//! User-centric read handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::UserId;
use blog_core::error::DomainError;
use blog_core::services::AuthorSummary;
use blog_shared::ApiResponse;

use super::views::{comment_response, post_response};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/users/{id}/posts
pub async fn user_posts(
    state: web::Data<AppState>,
    path: web::Path<UserId>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let author = state
        .identity
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", user_id))?;

    let summary = AuthorSummary::from(&author);
    let posts: Vec<_> = state
        .content
        .posts_by_author(user_id)
        .await?
        .into_iter()
        .map(|post| post_response(post, Some(summary.clone())))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/users/{id}/comments
pub async fn user_comments(
    state: web::Data<AppState>,
    path: web::Path<UserId>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let author = state
        .identity
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", user_id))?;

    let summary = AuthorSummary::from(&author);
    let comments: Vec<_> = state
        .content
        .comments_by_author(user_id)
        .await?
        .into_iter()
        .map(|comment| comment_response(comment, Some(summary.clone())))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}
