//! Post handlers: index, detail, create and edit.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use yatube_core::domain::PostDraft;
use yatube_shared::dto::{PageQuery, PostDetailResponse, PostRequest};

use super::views::{post_page, post_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn draft(req: PostRequest) -> PostDraft {
    PostDraft {
        text: req.text,
        group_id: req.group_id,
    }
}

/// GET /api/posts?page=N
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.posts.index(query.page.as_deref()).await?;
    Ok(HttpResponse::Ok().json(post_page(page)))
}

/// GET /api/posts/{post_id}
pub async fn detail(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let detail = state.posts.detail(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(detail.post),
        author_posts_count: detail.author_posts_count,
    }))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let card = state
        .posts
        .create(identity.user_id, draft(body.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(post_response(card)))
}

/// PUT /api/posts/{post_id} - author only.
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let card = state
        .posts
        .update(identity.user_id, path.into_inner(), draft(body.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(post_response(card)))
}
