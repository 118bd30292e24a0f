//! Error types for `comstat-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid user id: {0:?}")]
  InvalidUserId(String),

  #[error("invalid content id: {0:?}")]
  InvalidContentId(String),

  #[error("invalid cache policy: {0:?}")]
  InvalidCachePolicy(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
