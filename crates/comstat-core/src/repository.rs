//! The `CommentRepository` trait.
//!
//! The trait is implemented by storage backends (e.g. `comstat-store-sqlite`
//! and [`crate::memory::MemoryRepository`]). Aggregation depends on this
//! abstraction, never on a concrete backend.

use std::future::Future;

use crate::comment::{Comment, UserId};

/// Read-only access to comment records.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CommentRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every comment authored by `owner`, whatever its approval status.
  ///
  /// Returns an empty list when the owner has no comments or is anonymous.
  fn find_comments_by_owner(
    &self,
    owner: UserId,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  /// The `limit` newest approved comments authored by `owner`, ordered by
  /// `created_at` descending then id descending.
  ///
  /// Filtering, ordering and limiting are the backend's job.
  fn find_recent_approved_comments_by_owner(
    &self,
    owner: UserId,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;
}
