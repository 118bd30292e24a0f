//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Identifiers are stored as `INTEGER`. Timestamps are stored as integer
//! microseconds since the Unix epoch so `ORDER BY created_at` is exact.

use chrono::{DateTime, Utc};
use comstat_core::comment::{Comment, CommentId, ContentId, UserId};

use crate::{Error, Result};

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// SQLite integers are signed; ids above `i64::MAX` cannot be stored.
pub fn encode_id(id: u64) -> Result<i64> {
  i64::try_from(id).map_err(|_| Error::IdTooLarge(id))
}

pub fn decode_id(raw: i64) -> Result<u64> {
  u64::try_from(raw).map_err(|_| Error::IdOutOfRange(raw))
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> i64 { dt.timestamp_micros() }

pub fn decode_dt(micros: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_micros(micros)
    .ok_or_else(|| Error::DateParse(format!("timestamp out of range: {micros}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column order shared by every comment query.
pub const COMMENT_COLUMNS: &str = "
  c.comment_id, c.owner_id, c.body, c.approved, c.created_at,
  c.content_id, n.title";

/// Raw values read from a `comments` row joined with `content`.
pub struct RawComment {
  pub comment_id: i64,
  pub owner_id:   i64,
  pub body:       String,
  pub approved:   bool,
  pub created_at: i64,
  pub content_id: i64,
  pub title:      String,
}

impl RawComment {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      comment_id: row.get(0)?,
      owner_id:   row.get(1)?,
      body:       row.get(2)?,
      approved:   row.get(3)?,
      created_at: row.get(4)?,
      content_id: row.get(5)?,
      title:      row.get(6)?,
    })
  }

  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      id:                     CommentId(decode_id(self.comment_id)?),
      owner_id:               UserId(decode_id(self.owner_id)?),
      body:                   self.body,
      approved:               self.approved,
      created_at:             decode_dt(self.created_at)?,
      commented_entity_id:    ContentId(decode_id(self.content_id)?),
      commented_entity_title: self.title,
    })
  }
}
