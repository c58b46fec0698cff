//! Blog services exercised end to end over the in-memory store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use yatube_core::DomainError;
use yatube_core::domain::{GroupChanges, NewGroup, Post, PostDraft, User};
use yatube_core::ports::PostRepository;
use yatube_core::services::{GroupService, PostService, UserService};
use yatube_infra::MemoryStore;

struct Blog {
    store: Arc<MemoryStore>,
    users: UserService,
    groups: GroupService,
    posts: PostService,
}

fn blog() -> Blog {
    let store = Arc::new(MemoryStore::new());
    Blog {
        users: UserService::new(store.clone()),
        groups: GroupService::new(store.clone()),
        posts: PostService::new(store.clone(), store.clone(), store.clone()),
        store,
    }
}

fn new_group(slug: &str) -> NewGroup {
    NewGroup {
        title: "Test group title".to_string(),
        slug: slug.to_string(),
        description: "Test group description".to_string(),
    }
}

fn draft(text: &str, group_id: Option<Uuid>) -> PostDraft {
    PostDraft {
        text: text.to_string(),
        group_id,
    }
}

async fn register(blog: &Blog, username: &str) -> User {
    blog.users
        .register(username, "argon2-hash".to_string())
        .await
        .unwrap()
}

/// Insert a post with a fixed age so ordering does not depend on the clock.
async fn seed_post(blog: &Blog, author: &User, minutes_ago: i64, group_id: Option<Uuid>) -> Post {
    let post = Post::restore(
        Uuid::new_v4(),
        format!("post from {minutes_ago} minutes ago"),
        Utc::now() - Duration::minutes(minutes_ago),
        author.id,
        group_id,
    );
    let repo: &dyn PostRepository = blog.store.as_ref();
    repo.insert(post).await.unwrap()
}

#[tokio::test]
async fn test_duplicate_group_slug_is_rejected() {
    let blog = blog();
    blog.groups.create(new_group("test-group-one")).await.unwrap();

    let result = blog.groups.create(new_group("test-group-one")).await;

    assert!(matches!(result, Err(DomainError::Duplicate(_))));
}

#[tokio::test]
async fn test_create_post_without_group() {
    let blog = blog();
    let author = register(&blog, "test_forms0").await;

    let card = blog
        .posts
        .create(author.id, draft("Test form text", None))
        .await
        .unwrap();

    assert_eq!(card.group, None);
    assert_eq!(card.author.username, "test_forms0");
    assert_eq!(blog.posts.index(None).await.unwrap().total, 1);
}

#[tokio::test]
async fn test_create_post_in_group_shows_on_all_listings() {
    let blog = blog();
    let author = register(&blog, "test_post_author").await;
    let group = blog.groups.create(new_group("test_group")).await.unwrap();
    let other = blog.groups.create(new_group("other_group")).await.unwrap();

    let card = blog
        .posts
        .create(author.id, draft("Test post text", Some(group.id())))
        .await
        .unwrap();

    let index = blog.posts.index(None).await.unwrap();
    assert_eq!(index.items[0].id, card.id);
    assert_eq!(index.items[0].group.as_ref().unwrap().title, "Test group title");

    let listing = blog.posts.group_posts("test_group", None).await.unwrap();
    assert_eq!(listing.group.slug(), "test_group");
    assert_eq!(listing.posts.items[0].id, card.id);

    let profile = blog.posts.profile("test_post_author", None).await.unwrap();
    assert_eq!(profile.author.username, "test_post_author");
    assert_eq!(profile.posts.items[0].id, card.id);

    let elsewhere = blog.posts.group_posts(other.slug(), None).await.unwrap();
    assert!(elsewhere.posts.is_empty());
}

#[tokio::test]
async fn test_create_post_for_unknown_author_fails_validation() {
    let blog = blog();

    let result = blog.posts.create(Uuid::new_v4(), draft("orphan", None)).await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_create_post_with_unknown_group_fails_validation() {
    let blog = blog();
    let author = register(&blog, "author").await;

    let result = blog
        .posts
        .create(author.id, draft("text", Some(Uuid::new_v4())))
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(blog.posts.index(None).await.unwrap().total, 0);
}

#[tokio::test]
async fn test_update_with_unknown_group_fails_validation() {
    let blog = blog();
    let author = register(&blog, "author").await;
    let group = blog.groups.create(new_group("test-group")).await.unwrap();
    let created = blog
        .posts
        .create(author.id, draft("Original text", Some(group.id())))
        .await
        .unwrap();

    let result = blog
        .posts
        .update(author.id, created.id, draft("Changed text", Some(Uuid::new_v4())))
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    let stored = blog.posts.detail(created.id).await.unwrap().post;
    assert_eq!(stored.text, "Original text");
    assert_eq!(stored.group.map(|g| g.id), Some(group.id()));
}

#[tokio::test]
async fn test_author_can_edit_text_and_group() {
    let blog = blog();
    let author = register(&blog, "test_forms0").await;
    let first = blog.groups.create(new_group("test-group-one")).await.unwrap();
    let second = blog.groups.create(new_group("test-group-two")).await.unwrap();
    let created = blog
        .posts
        .create(author.id, draft("Test post text", Some(first.id())))
        .await
        .unwrap();

    let edited = blog
        .posts
        .update(author.id, created.id, draft("Changed test form text", Some(second.id())))
        .await
        .unwrap();

    assert_eq!(edited.text, "Changed test form text");
    assert_eq!(edited.group.unwrap().id, second.id());
    assert_eq!(edited.pub_date, created.pub_date);
}

#[tokio::test]
async fn test_non_author_edit_is_forbidden() {
    let blog = blog();
    let author = register(&blog, "author").await;
    let intruder = register(&blog, "intruder").await;
    let created = blog
        .posts
        .create(author.id, draft("Original", None))
        .await
        .unwrap();

    let result = blog
        .posts
        .update(intruder.id, created.id, draft("Vandalised", None))
        .await;

    assert!(matches!(result, Err(DomainError::Forbidden(_))));
    let detail = blog.posts.detail(created.id).await.unwrap();
    assert_eq!(detail.post.text, "Original");
}

#[tokio::test]
async fn test_deleting_group_keeps_posts_without_group() {
    let blog = blog();
    let author = register(&blog, "author").await;
    let group = blog.groups.create(new_group("doomed")).await.unwrap();
    let created = blog
        .posts
        .create(author.id, draft("Survivor", Some(group.id())))
        .await
        .unwrap();

    blog.groups.delete("doomed").await.unwrap();

    let detail = blog.posts.detail(created.id).await.unwrap();
    assert_eq!(detail.post.group, None);
    assert!(matches!(
        blog.posts.group_posts("doomed", None).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_deleting_author_deletes_posts() {
    let blog = blog();
    let author = register(&blog, "author").await;
    let reader = register(&blog, "reader").await;
    let created = blog
        .posts
        .create(author.id, draft("Gone soon", None))
        .await
        .unwrap();
    blog.posts
        .create(reader.id, draft("Stays", None))
        .await
        .unwrap();

    blog.users.delete(author.id).await.unwrap();

    assert!(matches!(
        blog.posts.detail(created.id).await,
        Err(DomainError::NotFound { .. })
    ));
    let index = blog.posts.index(None).await.unwrap();
    assert_eq!(index.total, 1);
    assert_eq!(index.items[0].text, "Stays");
}

#[tokio::test]
async fn test_listings_are_newest_first_and_paginated() {
    let blog = blog();
    let author = register(&blog, "prolific").await;
    for minutes_ago in 1..=23 {
        seed_post(&blog, &author, minutes_ago, None).await;
    }

    let first = blog.posts.index(None).await.unwrap();
    let second = blog.posts.index(Some("2")).await.unwrap();
    let third = blog.posts.index(Some("3")).await.unwrap();
    let beyond = blog.posts.index(Some("4")).await.unwrap();

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 10);
    assert_eq!(third.len(), 3);
    assert_eq!(beyond.number, 3);
    assert_eq!(beyond.len(), 3);

    let all: Vec<_> = [first, second, third]
        .into_iter()
        .flat_map(|page| page.items)
        .collect();
    assert!(all.windows(2).all(|w| w[0].pub_date >= w[1].pub_date));
    assert_eq!(all[0].text, "post from 1 minutes ago");
}

#[tokio::test]
async fn test_custom_page_size() {
    let blog = blog();
    let posts = PostService::new(blog.store.clone(), blog.store.clone(), blog.store.clone())
        .with_page_size(5);
    let author = register(&blog, "author").await;
    for minutes_ago in 1..=7 {
        seed_post(&blog, &author, minutes_ago, None).await;
    }

    let page = posts.profile("author", Some("2")).await.unwrap().posts;

    assert_eq!(page.len(), 2);
    assert_eq!(page.num_pages, 2);
    assert!(page.has_previous());
}

#[tokio::test]
async fn test_detail_counts_author_posts() {
    let blog = blog();
    let author = register(&blog, "author").await;
    let post = seed_post(&blog, &author, 5, None).await;
    seed_post(&blog, &author, 4, None).await;
    seed_post(&blog, &author, 3, None).await;

    let detail = blog.posts.detail(post.id()).await.unwrap();

    assert_eq!(detail.author_posts_count, 3);
    assert_eq!(detail.post.author.username, "author");
}

#[tokio::test]
async fn test_unknown_lookups_are_not_found() {
    let blog = blog();

    assert!(matches!(
        blog.posts.detail(Uuid::new_v4()).await,
        Err(DomainError::NotFound { entity_type: "post", .. })
    ));
    assert!(matches!(
        blog.posts.profile("nobody", None).await,
        Err(DomainError::NotFound { entity_type: "user", .. })
    ));
    assert!(matches!(
        blog.groups.get("missing").await,
        Err(DomainError::NotFound { entity_type: "group", .. })
    ));
}

#[tokio::test]
async fn test_group_edit_changes_title_only() {
    let blog = blog();
    blog.groups.create(new_group("cats")).await.unwrap();

    let updated = blog
        .groups
        .update(
            "cats",
            GroupChanges {
                title: Some("Cats".to_string()),
                description: Some("All about cats".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.slug(), "cats");
    assert_eq!(updated.to_string(), "Cats");
    assert_eq!(blog.groups.get("cats").await.unwrap().description(), "All about cats");
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let blog = blog();
    register(&blog, "taken").await;

    let result = blog.users.register("taken", "hash".to_string()).await;

    assert!(matches!(result, Err(DomainError::Duplicate(_))));
}
