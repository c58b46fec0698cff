//! Account handlers: registration, login, current user.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use yatube_core::DomainError;
use yatube_core::domain::User;
use yatube_core::ports::{AuthError, PasswordService, TokenService};
use yatube_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use super::views::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_CHARS: usize = 8;

fn issue_token(
    state: &AppState,
    token_service: &dyn TokenService,
    user: &User,
) -> AppResult<AuthResponse> {
    let token = token_service
        .generate_token(user.id, &user.username, state.roles_for(&user.username))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds(),
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }

    let password_hash = password_service.hash(&req.password)?;

    let user = state.users.register(&req.username, password_hash).await?;

    Ok(HttpResponse::Created().json(issue_token(&state, &***token_service, &user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state.users.get(&req.username).await.map_err(|e| match e {
        DomainError::NotFound { .. } => AppError::from(AuthError::InvalidCredentials),
        other => other.into(),
    })?;

    if !password_service.verify(&req.password, &user.password_hash)? {
        tracing::warn!(username = %req.username, "Login failed: wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(HttpResponse::Ok().json(issue_token(&state, &***token_service, &user)?))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.users.get_by_id(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(user_response(&user)))
}

/// DELETE /api/auth/me - removes the account and every post it authored.
pub async fn delete_me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    state.users.delete(identity.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
