//! Conversions from service read models to wire DTOs.

use yatube_core::Page;
use yatube_core::domain::{Group, User};
use yatube_core::services::{AuthorRef, GroupRef, PostCard};
use yatube_shared::dto::{
    AuthorSummary, GroupResponse, GroupSummary, PageResponse, PostResponse, UserResponse,
};

pub fn author_summary(author: AuthorRef) -> AuthorSummary {
    AuthorSummary {
        id: author.id,
        username: author.username,
    }
}

fn group_summary(group: GroupRef) -> GroupSummary {
    GroupSummary {
        id: group.id,
        title: group.title,
        slug: group.slug,
    }
}

pub fn post_response(card: PostCard) -> PostResponse {
    PostResponse {
        id: card.id,
        text: card.text,
        pub_date: card.pub_date,
        author: author_summary(card.author),
        group: card.group.map(group_summary),
    }
}

pub fn group_response(group: &Group) -> GroupResponse {
    GroupResponse {
        id: group.id(),
        title: group.title().to_string(),
        slug: group.slug().to_string(),
        description: group.description().to_string(),
    }
}

pub fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        created_at: user.created_at,
    }
}

pub fn post_page(page: Page<PostCard>) -> PageResponse<PostResponse> {
    let (has_next, has_previous) = (page.has_next(), page.has_previous());
    let page = page.map(post_response);
    PageResponse {
        items: page.items,
        page: page.number,
        num_pages: page.num_pages,
        total: page.total,
        has_next,
        has_previous,
    }
}
