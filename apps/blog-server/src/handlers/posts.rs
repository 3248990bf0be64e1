//! Post handlers. Mutations are for the administrator only.

use actix_web::{HttpResponse, web};

use blog_core::domain::PostId;
use blog_core::services::AuthorSummary;
use blog_shared::ApiResponse;
use blog_shared::dto::PostRequest;

use super::views::{post_fields, post_response, summary_response, thread_response};
use crate::middleware::auth::CurrentPrincipal;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.content.list_post_summaries().await?;
    let body: Vec<_> = posts.into_iter().map(summary_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /api/posts/{id} - the post with its comments.
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let thread = state.content.post_thread(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(thread_response(thread))))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .content
        .create_post(&principal, post_fields(body.into_inner()))
        .await?;

    let author = principal.user().map(AuthorSummary::from);
    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post, author))))
}

/// PUT /api/posts/{id} - replaces every field and makes the editor the author.
pub async fn update_post(
    state: web::Data<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    path: web::Path<PostId>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .content
        .edit_post(&principal, path.into_inner(), post_fields(body.into_inner()))
        .await?;

    let author = principal.user().map(AuthorSummary::from);
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post, author))))
}

/// DELETE /api/posts/{id} - removes the post and its comments.
pub async fn delete_post(
    state: web::Data<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    state
        .content
        .delete_post(&principal, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
