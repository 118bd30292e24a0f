//! Core types and logic for the comment statistics block.
//!
//! This crate has no HTTP or database dependencies. It owns
//! subject resolution, aggregation and presentation assembly; comment storage
//! is reached only through the [`repository::CommentRepository`] trait.

pub mod cache;
pub mod comment;
pub mod error;
pub mod links;
pub mod memory;
pub mod preview;
pub mod render;
pub mod repository;
pub mod stats;
pub mod subject;
pub mod text;

pub use error::{Error, Result};
