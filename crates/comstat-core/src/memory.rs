//! [`MemoryRepository`], an in-process [`CommentRepository`].
//!
//! Mirrors the query semantics of the SQL backend and counts every call, which
//! makes it the natural fake for aggregation tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use thiserror::Error;

use crate::{
  comment::{Comment, UserId},
  repository::CommentRepository,
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("repository unavailable")]
  Unavailable,
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
  comments:       Vec<Comment>,
  owner_queries:  AtomicUsize,
  recent_queries: AtomicUsize,
  unavailable:    AtomicBool,
}

impl MemoryRepository {
  pub fn new(comments: Vec<Comment>) -> Self {
    Self { comments, ..Self::default() }
  }

  /// Make every subsequent query fail with [`MemoryError::Unavailable`].
  pub fn set_unavailable(&self, unavailable: bool) {
    self.unavailable.store(unavailable, Ordering::SeqCst);
  }

  /// Number of `find_comments_by_owner` calls so far.
  pub fn owner_queries(&self) -> usize {
    self.owner_queries.load(Ordering::SeqCst)
  }

  /// Number of `find_recent_approved_comments_by_owner` calls so far.
  pub fn recent_queries(&self) -> usize {
    self.recent_queries.load(Ordering::SeqCst)
  }

  pub fn total_queries(&self) -> usize {
    self.owner_queries() + self.recent_queries()
  }

  fn check_available(&self) -> Result<(), MemoryError> {
    if self.unavailable.load(Ordering::SeqCst) {
      Err(MemoryError::Unavailable)
    } else {
      Ok(())
    }
  }

  fn owned_by(&self, owner: UserId) -> impl Iterator<Item = &Comment> {
    self
      .comments
      .iter()
      .filter(move |c| !owner.is_anonymous() && c.owner_id == owner)
  }
}

impl CommentRepository for MemoryRepository {
  type Error = MemoryError;

  async fn find_comments_by_owner(
    &self,
    owner: UserId,
  ) -> Result<Vec<Comment>, MemoryError> {
    self.owner_queries.fetch_add(1, Ordering::SeqCst);
    self.check_available()?;
    Ok(self.owned_by(owner).cloned().collect())
  }

  async fn find_recent_approved_comments_by_owner(
    &self,
    owner: UserId,
    limit: usize,
  ) -> Result<Vec<Comment>, MemoryError> {
    self.recent_queries.fetch_add(1, Ordering::SeqCst);
    self.check_available()?;
    let mut approved: Vec<Comment> =
      self.owned_by(owner).filter(|c| c.approved).cloned().collect();
    approved.sort_by(Comment::recency_cmp);
    approved.truncate(limit);
    Ok(approved)
  }
}
