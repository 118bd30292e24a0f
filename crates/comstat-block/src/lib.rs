//! HTTP surface for the comment statistics block.
//!
//! Exposes an axum [`Router`] backed by any [`CommentRepository`]: pages that
//! host the block, the block markup alone for embedding, and the raw render
//! data as JSON.

pub mod auth;
pub mod error;
pub mod etag;
pub mod handlers;
pub mod html;
pub mod import;
pub mod route;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use comstat_core::{
  cache::CachePolicy,
  links::PathLinks,
  render::Labels,
  repository::CommentRepository,
  subject::SubjectResolver,
};
use serde::Deserialize;

use auth::{Account, AuthConfig};
use handlers::{api, fragment, page};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub store_path:    PathBuf,
  /// URL templates for content, profile and login links.
  #[serde(default)]
  pub links:         PathLinks,
  /// `"permanent"`, `"none"`, or a number of seconds.
  #[serde(default)]
  pub cache_max_age: CachePolicy,
  #[serde(default)]
  pub accounts:      Vec<Account>,
  #[serde(default)]
  pub labels:        Labels,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<R: CommentRepository> {
  pub store:    Arc<R>,
  pub config:   Arc<ServerConfig>,
  pub auth:     Arc<AuthConfig>,
  pub resolver: Arc<SubjectResolver>,
}

impl<R: CommentRepository> AppState<R> {
  pub fn new(store: R, config: ServerConfig) -> Self {
    Self {
      store:    Arc::new(store),
      auth:     Arc::new(AuthConfig { accounts: config.accounts.clone() }),
      resolver: Arc::new(SubjectResolver::default()),
      config:   Arc::new(config),
    }
  }
}

// Manual impl: the repository itself need not be `Clone`.
impl<R: CommentRepository> Clone for AppState<R> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      config:   Arc::clone(&self.config),
      auth:     Arc::clone(&self.auth),
      resolver: Arc::clone(&self.resolver),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] serving the block.
pub fn router<R>(state: AppState<R>) -> Router
where
  R: CommentRepository + 'static,
{
  Router::new()
    .route("/api/comment-statistics",   get(api::handler::<R>))
    .route("/block/comment-statistics", get(fragment::handler::<R>))
    .route("/",                         get(page::handler::<R>))
    .route("/{*path}",                  get(page::handler::<R>))
    .with_state(state)
}

#[cfg(test)]
pub(crate) fn test_config() -> ServerConfig {
  ServerConfig {
    host:          "127.0.0.1".to_string(),
    port:          8080,
    store_path:    PathBuf::from(":memory:"),
    links:         PathLinks::default(),
    cache_max_age: CachePolicy::Uncacheable,
    accounts:      Vec::new(),
    labels:        Labels::default(),
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
