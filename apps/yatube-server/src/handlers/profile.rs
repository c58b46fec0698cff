//! Author profile handler.

use actix_web::{HttpResponse, web};

use yatube_shared::dto::{PageQuery, ProfileResponse};

use super::views::{author_summary, post_page};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/profile/{username}?page=N
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let profile = state
        .posts
        .profile(&path.into_inner(), query.page.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(ProfileResponse {
        author: author_summary(profile.author),
        posts: post_page(profile.posts),
    }))
}
