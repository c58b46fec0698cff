//! # Yatube Core
//!
//! The domain layer of the Yatube blog.
//! This crate contains the post/group model, pagination and the blog services,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use pagination::{POSTS_PER_PAGE, Page, Paginator};
