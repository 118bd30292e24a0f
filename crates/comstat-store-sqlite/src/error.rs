//! Error type for `comstat-store-sqlite`.

use comstat_core::comment::ContentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time decode error: {0}")]
  DateParse(String),

  #[error("content not found: {0}")]
  ContentNotFound(ContentId),

  #[error("content already exists: {0}")]
  ContentExists(ContentId),

  #[error("stored id out of range: {0}")]
  IdOutOfRange(i64),

  #[error("id too large to store: {0}")]
  IdTooLarge(u64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
