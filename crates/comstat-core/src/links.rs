//! Canonical URLs for the pages the block links to.

use serde::{Deserialize, Serialize};

use crate::comment::ContentId;

/// Builds canonical URLs for site resources.
pub trait SiteLinks {
  fn content_url(&self, id: ContentId) -> String;
  fn login_url(&self) -> String;
}

/// Path templates joined onto a base URL. `{id}` is replaced by the
/// identifier. An empty `base_url` yields site-relative URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathLinks {
  pub base_url:     String,
  pub content_path: String,
  pub login_path:   String,
}

impl Default for PathLinks {
  fn default() -> Self {
    Self {
      base_url:     String::new(),
      content_path: "/node/{id}".to_string(),
      login_path:   "/user/login".to_string(),
    }
  }
}

impl PathLinks {
  pub fn with_base_url(base_url: impl Into<String>) -> Self {
    Self { base_url: base_url.into(), ..Self::default() }
  }

  fn join(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }
}

impl SiteLinks for PathLinks {
  fn content_url(&self, id: ContentId) -> String {
    self.join(&self.content_path.replace("{id}", &id.to_string()))
  }

  fn login_url(&self) -> String { self.join(&self.login_path) }
}
