//! Subject resolution: whose statistics a page shows.
//!
//! On a user-profile page the subject is the profile's owner, whoever is
//! looking. Everywhere else the subject is the visitor, who may be anonymous.
//! The routing facts are always passed in by the caller.

use serde::{Deserialize, Serialize};

use crate::comment::UserId;

/// Route name the CMS uses for canonical user-profile pages.
pub const DEFAULT_PROFILE_ROUTE: &str = "entity.user.canonical";

/// The user whose statistics are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Subject {
  Anonymous,
  User(UserId),
}

impl Subject {
  /// Map a raw user id to a subject; `0` is anonymous.
  pub fn from_user_id(id: UserId) -> Self {
    if id.is_anonymous() { Self::Anonymous } else { Self::User(id) }
  }

  pub fn user_id(self) -> Option<UserId> {
    match self {
      Self::Anonymous => None,
      Self::User(id) => Some(id),
    }
  }

  pub fn is_anonymous(self) -> bool { matches!(self, Self::Anonymous) }
}

/// Routing facts about the page being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteContext {
  pub route_name:    String,
  /// The `{user}` route parameter, present on profile pages.
  pub route_user_id: Option<UserId>,
}

impl RouteContext {
  pub fn new(route_name: impl Into<String>) -> Self {
    Self { route_name: route_name.into(), route_user_id: None }
  }

  pub fn with_user(mut self, id: UserId) -> Self {
    self.route_user_id = Some(id);
    self
  }
}

/// Resolves the [`Subject`] for a page.
#[derive(Debug, Clone)]
pub struct SubjectResolver {
  profile_route: String,
}

impl Default for SubjectResolver {
  fn default() -> Self { Self::new(DEFAULT_PROFILE_ROUTE) }
}

impl SubjectResolver {
  pub fn new(profile_route: impl Into<String>) -> Self {
    Self { profile_route: profile_route.into() }
  }

  /// Resolve the subject for `route`, given the current `visitor`.
  ///
  /// A profile route that carries no user parameter falls back to the
  /// visitor.
  pub fn resolve(&self, route: &RouteContext, visitor: UserId) -> Subject {
    match route.route_user_id {
      Some(owner) if route.route_name == self.profile_route => {
        Subject::from_user_id(owner)
      }
      _ => Subject::from_user_id(visitor),
    }
  }
}
