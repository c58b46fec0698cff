//! Schema migrations for the blog tables.
//!
//! Delete rules live in the foreign keys: removing a user removes their posts,
//! removing a group sets `posts.group_id` to null.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_groups;
mod m20240101_000003_create_posts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_groups::Migration),
            Box::new(m20240101_000003_create_posts::Migration),
        ]
    }
}
