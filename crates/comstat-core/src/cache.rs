//! Cache lifetime for the rendered block.
//!
//! The block always varies by route and by visitor. How long a rendered copy
//! may live is an operator decision; nothing here assumes one.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// One year, the conventional stand-in for "forever" in `Cache-Control`.
const PERMANENT_MAX_AGE: u32 = 31_536_000;

/// How long a rendered block may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPolicy", into = "RawPolicy")]
pub enum CachePolicy {
  /// Reusable until invalidated.
  Permanent,
  /// Rebuilt on every request.
  #[default]
  Uncacheable,
  /// Reusable for the given number of seconds.
  MaxAge(u32),
}

impl CachePolicy {
  /// The `Cache-Control` header value for this policy.
  pub fn cache_control(self) -> String {
    match self {
      Self::Permanent => format!("private, max-age={PERMANENT_MAX_AGE}"),
      Self::Uncacheable => "no-store".to_string(),
      Self::MaxAge(secs) => format!("private, max-age={secs}"),
    }
  }

  fn from_seconds(secs: u32) -> Self {
    if secs == 0 { Self::Uncacheable } else { Self::MaxAge(secs) }
  }
}

impl FromStr for CachePolicy {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "permanent" => Ok(Self::Permanent),
      "none" | "uncacheable" => Ok(Self::Uncacheable),
      other => other
        .parse::<u32>()
        .map(Self::from_seconds)
        .map_err(|_| Error::InvalidCachePolicy(s.to_owned())),
    }
  }
}

impl fmt::Display for CachePolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Permanent => f.write_str("permanent"),
      Self::Uncacheable => f.write_str("none"),
      Self::MaxAge(secs) => write!(f, "{secs}"),
    }
  }
}

/// Accepts either a keyword or a bare number of seconds.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawPolicy {
  Seconds(u32),
  Name(String),
}

impl TryFrom<RawPolicy> for CachePolicy {
  type Error = Error;

  fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
    match raw {
      RawPolicy::Seconds(secs) => Ok(Self::from_seconds(secs)),
      RawPolicy::Name(name) => name.parse(),
    }
  }
}

impl From<CachePolicy> for RawPolicy {
  fn from(policy: CachePolicy) -> Self {
    match policy {
      CachePolicy::MaxAge(secs) => RawPolicy::Seconds(secs),
      other => RawPolicy::Name(other.to_string()),
    }
  }
}

/// Caching facts attached to rendered block data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMetadata {
  /// Request facts the output depends on.
  pub contexts: Vec<String>,
  pub policy:   CachePolicy,
}

impl CacheMetadata {
  pub fn new(policy: CachePolicy) -> Self {
    Self {
      contexts: vec!["route".to_string(), "user".to_string()],
      policy,
    }
  }

  pub fn cache_control(&self) -> String { self.policy.cache_control() }
}
