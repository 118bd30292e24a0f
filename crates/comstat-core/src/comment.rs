//! Comment records and the identifiers that reference them.
//!
//! Comments are owned and persisted by an external repository; this crate only
//! ever reads them.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// A user account identifier. `0` denotes anonymous authorship.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
  Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
  pub const ANONYMOUS: UserId = UserId(0);

  pub fn is_anonymous(self) -> bool { self == Self::ANONYMOUS }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl FromStr for UserId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.parse()
      .map(UserId)
      .map_err(|_| Error::InvalidUserId(s.to_owned()))
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// Identifier of the content item a comment is attached to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct ContentId(pub u64);

impl fmt::Display for ContentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl FromStr for ContentId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.parse()
      .map(ContentId)
      .map_err(|_| Error::InvalidContentId(s.to_owned()))
  }
}

// ─── Comment ─────────────────────────────────────────────────────────────────

/// A single comment as exposed by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub id:                     CommentId,
  pub owner_id:               UserId,
  /// Raw body; may contain markup.
  pub body:                   String,
  pub approved:               bool,
  pub created_at:             DateTime<Utc>,
  pub commented_entity_id:    ContentId,
  pub commented_entity_title: String,
}

impl Comment {
  /// Recency order: newest first, ties broken by the higher id.
  pub fn recency_cmp(&self, other: &Self) -> Ordering {
    other
      .created_at
      .cmp(&self.created_at)
      .then_with(|| other.id.cmp(&self.id))
  }
}
