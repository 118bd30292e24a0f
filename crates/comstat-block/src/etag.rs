//! ETag computation for rendered block responses.
//!
//! ETags are SHA-256 hashes over the representation name, the serialised
//! render data and the presentation config (labels and links). The HTML and
//! JSON forms of the same data never collide, and editing the labels or link
//! templates invalidates copies clients already hold.

use axum::http::{HeaderMap, header};
use comstat_core::{links::PathLinks, render::{BlockData, Labels}};
use sha2::{Digest, Sha256};

use crate::error::Error;

/// Compute a strong, quoted ETag for `data` in the given representation.
pub fn compute_etag(
  representation: &str,
  data: &BlockData,
  labels: &Labels,
  links: &PathLinks,
) -> Result<String, Error> {
  let json = serde_json::to_vec(&(data, labels, links))
    .map_err(|e| Error::Render(e.to_string()))?;

  let mut hasher = Sha256::new();
  hasher.update(representation.as_bytes());
  hasher.update([0u8]);
  hasher.update(&json);
  let hash = hasher.finalize();
  Ok(format!("\"{}\"", hex::encode(hash)))
}

/// Whether an `If-None-Match` header matches `etag`.
///
/// Accepts lists, `*`, weak validators and bare (unquoted) tags.
pub fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
  let Some(value) = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
  else {
    return false;
  };

  value.split(',').map(str::trim).any(|candidate| {
    candidate == "*"
      || strip_etag(candidate) == strip_etag(etag)
  })
}

/// Strip a weak prefix and surrounding double-quotes from an ETag value.
fn strip_etag(s: &str) -> &str {
  s.trim_start_matches("W/").trim_matches('"')
}
