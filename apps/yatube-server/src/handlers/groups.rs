//! Group handlers: listing, group page, and group management.

use actix_web::{HttpResponse, web};

use yatube_core::domain::{GroupChanges, NewGroup};
use yatube_shared::dto::{
    CreateGroupRequest, GroupPostsResponse, GroupResponse, PageQuery, UpdateGroupRequest,
};

use super::views::{group_response, post_page};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/groups
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let groups: Vec<GroupResponse> = state.groups.list().await?.iter().map(group_response).collect();
    Ok(HttpResponse::Ok().json(groups))
}

/// GET /api/groups/{slug}?page=N
pub async fn posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let listing = state
        .posts
        .group_posts(&path.into_inner(), query.page.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(GroupPostsResponse {
        group: group_response(&listing.group),
        posts: post_page(listing.posts),
    }))
}

/// POST /api/groups
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateGroupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let group = state
        .groups
        .create(NewGroup {
            title: req.title,
            slug: req.slug,
            description: req.description,
        })
        .await?;
    tracing::debug!(group_slug = %group.slug(), created_by = %identity.username, "Group created via API");
    Ok(HttpResponse::Created().json(group_response(&group)))
}

/// PATCH /api/groups/{slug} - admin only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdateGroupRequest>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let req = body.into_inner();
    let group = state
        .groups
        .update(
            &path.into_inner(),
            GroupChanges {
                title: req.title,
                description: req.description,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(group_response(&group)))
}

/// DELETE /api/groups/{slug} - admin only. Posts stay, detached from the group.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    state.groups.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
