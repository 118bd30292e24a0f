//! Visitor identification from HTTP Basic credentials.
//!
//! No `Authorization` header means an anonymous visitor. Credentials that are
//! present but wrong are rejected rather than downgraded to anonymous.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use comstat_core::{comment::UserId, repository::CommentRepository};
use serde::Deserialize;

use crate::{AppState, error::Error};

/// A site account allowed to sign in.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
  pub user_id:       UserId,
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Accounts accepted by this server instance.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
  pub accounts: Vec<Account>,
}

/// The current visitor; [`UserId::ANONYMOUS`] when not signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visitor(pub UserId);

/// Identify the visitor directly from headers.
pub fn identify_visitor(headers: &HeaderMap, config: &AuthConfig) -> Result<UserId, Error> {
  let Some(header_val) = headers.get(axum::http::header::AUTHORIZATION) else {
    return Ok(UserId::ANONYMOUS);
  };
  let header_val = header_val.to_str().map_err(|_| Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  let account = config
    .accounts
    .iter()
    .find(|a| a.username == username)
    .ok_or(Error::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&account.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(account.user_id)
}

impl<R> FromRequestParts<AppState<R>> for Visitor
where
  R: CommentRepository + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<R>,
  ) -> Result<Self, Self::Rejection> {
    let visitor = identify_visitor(&parts.headers, &state.auth)?;
    Ok(Visitor(visitor))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  use argon2::{PasswordHasher, password_hash::SaltString};
  use axum::http::{Request, header};
  use comstat_core::memory::MemoryRepository;
  use rand_core::OsRng;

  use crate::test_config;

  fn hash(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string()
  }

  fn make_state(password: &str) -> AppState<MemoryRepository> {
    let mut config = test_config();
    config.accounts = vec![Account {
      user_id:       UserId(7),
      username:      "user".to_string(),
      password_hash: hash(password),
    }];
    AppState::new(MemoryRepository::default(), config)
  }

  async fn extract(
    req: Request<axum::body::Body>,
    state: &AppState<MemoryRepository>,
  ) -> Result<Visitor, Error> {
    let (mut parts, _) = req.into_parts();
    Visitor::from_request_parts(&mut parts, state).await
  }

  fn basic(user: &str, pass: &str) -> String {
    let encoded = B64.encode(format!("{user}:{pass}"));
    format!("Basic {encoded}")
  }

  #[tokio::test]
  async fn correct_credentials_identify_account() {
    let state = make_state("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("user", "secret"))
      .body(axum::body::Body::empty()).unwrap();
    assert_eq!(extract(req, &state).await.unwrap(), Visitor(UserId(7)));
  }

  #[tokio::test]
  async fn missing_header_is_anonymous() {
    let state = make_state("secret");
    let req = Request::builder().body(axum::body::Body::empty()).unwrap();
    assert_eq!(extract(req, &state).await.unwrap(), Visitor(UserId::ANONYMOUS));
  }

  #[tokio::test]
  async fn wrong_password() {
    let state = make_state("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("user", "wrong"))
      .body(axum::body::Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(Error::Unauthorized)));
  }

  #[tokio::test]
  async fn unknown_user() {
    let state = make_state("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("nobody", "secret"))
      .body(axum::body::Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(Error::Unauthorized)));
  }

  #[tokio::test]
  async fn invalid_base64() {
    let state = make_state("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, "Basic !!!not-base64!!!")
      .body(axum::body::Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(Error::Unauthorized)));
  }

  #[tokio::test]
  async fn non_basic_scheme() {
    let state = make_state("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, "Bearer abc")
      .body(axum::body::Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(Error::Unauthorized)));
  }

  #[test]
  fn state_shares_auth_config() {
    let state = make_state("secret");
    let clone = state.clone();
    assert!(Arc::ptr_eq(&state.auth, &clone.auth));
  }
}
