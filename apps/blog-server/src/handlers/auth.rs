//! Authentication handlers.

use actix_web::{HttpRequest, HttpResponse, web};

use blog_core::error::DomainError;
use blog_shared::ApiResponse;
use blog_shared::dto::{LoginRequest, RegisterUserRequest};

use super::views::{auth_response, user_response};
use crate::middleware::auth::{CurrentPrincipal, bearer_token};
use crate::middleware::error::{AppError, AppResult, EMAIL_TAKEN};
use crate::state::AppState;

/// POST /api/auth/register - creates the account and logs it in.
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .identity
        .register(&req.email, &req.name, &req.password)
        .await
        .map_err(|e| match e {
            DomainError::Duplicate(_) => AppError::Conflict(EMAIL_TAKEN.to_string()),
            other => other.into(),
        })?;

    let session = state.sessions.login(&user)?;
    let body = auth_response(session, state.sessions.expiration_seconds(), &user);

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        body,
        format!("Welcome, {}!", user.name),
    )))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state.identity.authenticate(&req.email, &req.password).await?;
    let session = state.sessions.login(&user)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(auth_response(
        session,
        state.sessions.expiration_seconds(),
        &user,
    ))))
}

/// POST /api/auth/logout - always succeeds.
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    if let Some(token) = bearer_token(&req) {
        state.sessions.logout(token).await?;
    }
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/auth/me
pub async fn me(CurrentPrincipal(principal): CurrentPrincipal) -> AppResult<HttpResponse> {
    let user = principal.require_user()?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user_response(user))))
}
