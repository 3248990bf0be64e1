//! Comment handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::PostId;
use blog_core::error::DomainError;
use blog_core::services::AuthorSummary;
use blog_shared::ApiResponse;
use blog_shared::dto::CommentRequest;

use super::views::comment_response;
use crate::middleware::auth::CurrentPrincipal;
use crate::middleware::error::{AppError, AppResult, LOGIN_TO_COMMENT};
use crate::state::AppState;

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    path: web::Path<PostId>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .content
        .add_comment(&principal, path.into_inner(), body.into_inner().body)
        .await
        .map_err(|e| match e {
            DomainError::Unauthenticated => AppError::Unauthorized(LOGIN_TO_COMMENT.to_string()),
            other => other.into(),
        })?;

    let author = principal.user().map(AuthorSummary::from);
    Ok(HttpResponse::Created().json(ApiResponse::ok(comment_response(comment, author))))
}
