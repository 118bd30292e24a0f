//! Comment statistics aggregation.
//!
//! For a concrete subject the repository is queried exactly twice: once for
//! the full comment set (feeding every count) and once for the recent approved
//! comments, which the backend filters, orders and limits itself. Anonymous
//! subjects never reach the repository.

use serde::{Deserialize, Serialize};

use crate::{
  comment::{Comment, UserId},
  repository::CommentRepository,
  subject::Subject,
  text::body_word_count,
};

/// How many recent approved comments are previewed.
pub const RECENT_LIMIT: usize = 5;

/// Fully computed statistics for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentStatistics {
  pub subject:          Subject,
  /// Comments of any approval status.
  pub total_count:      usize,
  /// Words across all comment bodies, markup stripped.
  pub total_word_count: usize,
  pub approved_count:   usize,
  pub pending_count:    usize,
  /// Newest first, at most [`RECENT_LIMIT`] entries.
  pub recent_approved:  Vec<Comment>,
}

impl CommentStatistics {
  /// Statistics for a subject known to have nothing to show.
  pub fn empty(subject: Subject) -> Self {
    Self {
      subject,
      total_count: 0,
      total_word_count: 0,
      approved_count: 0,
      pending_count: 0,
      recent_approved: Vec::new(),
    }
  }

  /// Derive the counts from a subject's full comment set.
  pub fn from_comments(
    subject: Subject,
    all: &[Comment],
    recent_approved: Vec<Comment>,
  ) -> Self {
    let approved_count = all.iter().filter(|c| c.approved).count();
    Self {
      subject,
      total_count: all.len(),
      total_word_count: all.iter().map(|c| body_word_count(&c.body)).sum(),
      approved_count,
      pending_count: all.len() - approved_count,
      recent_approved,
    }
  }

  pub fn has_comments(&self) -> bool { self.total_count > 0 }
}

/// Compute statistics for `subject`.
///
/// Repository errors are returned unchanged.
pub async fn aggregate<R>(
  repo: &R,
  subject: Subject,
) -> Result<CommentStatistics, R::Error>
where
  R: CommentRepository,
{
  let owner: UserId = match subject {
    Subject::Anonymous => return Ok(CommentStatistics::empty(subject)),
    Subject::User(id) => id,
  };

  let all = repo.find_comments_by_owner(owner).await?;
  let recent = repo
    .find_recent_approved_comments_by_owner(owner, RECENT_LIMIT)
    .await?;

  Ok(CommentStatistics::from_comments(subject, &all, recent))
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::{
    comment::{CommentId, ContentId},
    memory::{MemoryError, MemoryRepository},
  };

  fn comment(id: u64, owner: u64, approved: bool, created: i64, body: &str) -> Comment {
    Comment {
      id:                     CommentId(id),
      owner_id:               UserId(owner),
      body:                   body.into(),
      approved,
      created_at:             Utc.timestamp_opt(created, 0).unwrap(),
      commented_entity_id:    ContentId(100 + id),
      commented_entity_title: format!("Article {id}"),
    }
  }

  #[tokio::test]
  async fn anonymous_subject_is_empty_without_queries() {
    let repo = MemoryRepository::new(vec![comment(1, 0, true, 1, "anon words")]);
    let stats = aggregate(&repo, Subject::Anonymous).await.unwrap();

    assert_eq!(stats, CommentStatistics::empty(Subject::Anonymous));
    assert!(!stats.has_comments());
    assert_eq!(repo.total_queries(), 0);
  }

  #[tokio::test]
  async fn anonymous_subject_skips_even_a_failing_repository() {
    let repo = MemoryRepository::default();
    repo.set_unavailable(true);
    assert!(aggregate(&repo, Subject::Anonymous).await.is_ok());
  }

  #[tokio::test]
  async fn mixed_status_scenario() {
    let repo = MemoryRepository::new(vec![
      comment(1, 42, true, 100, "hello world"),
      comment(2, 42, false, 200, "foo"),
      comment(3, 7, true, 300, "someone else entirely"),
    ]);
    let stats = aggregate(&repo, Subject::User(UserId(42))).await.unwrap();

    assert_eq!(stats.total_count, 2);
    assert_eq!(stats.total_word_count, 3);
    assert_eq!(stats.approved_count, 1);
    assert_eq!(stats.pending_count, 1);
    let ids: Vec<_> = stats.recent_approved.iter().map(|c| c.id).collect();
    assert_eq!(ids, [CommentId(1)]);
    assert!(stats.has_comments());
  }

  #[tokio::test]
  async fn full_set_is_fetched_once() {
    let repo = MemoryRepository::new(vec![comment(1, 42, true, 1, "x")]);
    aggregate(&repo, Subject::User(UserId(42))).await.unwrap();

    assert_eq!(repo.owner_queries(), 1);
    assert_eq!(repo.recent_queries(), 1);
  }

  #[tokio::test]
  async fn subject_without_comments() {
    let repo = MemoryRepository::new(vec![comment(1, 7, true, 1, "not mine")]);
    let stats = aggregate(&repo, Subject::User(UserId(42))).await.unwrap();

    assert_eq!(stats.total_count, 0);
    assert_eq!(stats.total_word_count, 0);
    assert!(stats.recent_approved.is_empty());
    assert!(!stats.has_comments());
  }

  #[tokio::test]
  async fn word_count_sums_stripped_bodies() {
    let bodies = ["<p>one two</p>", "three", "<em>four</em> five six", ""];
    let repo = MemoryRepository::new(
      bodies
        .iter()
        .enumerate()
        .map(|(i, b)| comment(i as u64 + 1, 42, i % 2 == 0, i as i64, b))
        .collect(),
    );
    let stats = aggregate(&repo, Subject::User(UserId(42))).await.unwrap();

    let expected: usize = bodies.iter().map(|b| body_word_count(b)).sum();
    assert_eq!(expected, 6);
    assert_eq!(stats.total_word_count, expected);
  }

  #[tokio::test]
  async fn recent_is_limited_and_ordered() {
    let mut comments = Vec::new();
    // Eight approved comments, two sharing a timestamp, plus pending noise.
    for id in 1..=8 {
      let created = if id == 8 { 7 } else { id as i64 };
      comments.push(comment(id, 42, true, created, "body"));
    }
    comments.push(comment(20, 42, false, 1_000, "pending and newest"));
    let repo = MemoryRepository::new(comments);

    let stats = aggregate(&repo, Subject::User(UserId(42))).await.unwrap();
    let ids: Vec<u64> = stats.recent_approved.iter().map(|c| c.id.0).collect();

    assert_eq!(ids.len(), RECENT_LIMIT);
    assert_eq!(ids, [8, 7, 6, 5, 4]);
    assert_eq!(stats.total_count, 9);
  }

  #[tokio::test]
  async fn fewer_approved_than_limit() {
    let repo = MemoryRepository::new(vec![
      comment(1, 42, true, 1, "a"),
      comment(2, 42, false, 2, "b"),
      comment(3, 42, true, 3, "c"),
    ]);
    let stats = aggregate(&repo, Subject::User(UserId(42))).await.unwrap();
    let ids: Vec<u64> = stats.recent_approved.iter().map(|c| c.id.0).collect();
    assert_eq!(ids, [3, 1]);
  }

  #[tokio::test]
  async fn repository_errors_propagate() {
    let repo = MemoryRepository::new(vec![comment(1, 42, true, 1, "a")]);
    repo.set_unavailable(true);
    let result = aggregate(&repo, Subject::User(UserId(42))).await;
    assert!(matches!(result, Err(MemoryError::Unavailable)));
  }
}
