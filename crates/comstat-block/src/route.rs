//! Maps request paths to the routing facts subject resolution needs.
//!
//! | Path | Route name | User parameter |
//! |------|------------|----------------|
//! | `/user/{id}` | `entity.user.canonical` | `id` |
//! | `/node/{id}` | `entity.node.canonical` | none |
//! | `/` | `<front>` | none |
//! | anything else | `page` | none |

use comstat_core::{
  comment::{ContentId, UserId},
  subject::{DEFAULT_PROFILE_ROUTE, RouteContext},
};

pub const CONTENT_ROUTE: &str = "entity.node.canonical";
pub const FRONT_ROUTE: &str = "<front>";
pub const GENERIC_ROUTE: &str = "page";

/// Resolve `path` (query string excluded) to a [`RouteContext`].
///
/// A `/user/...` or `/node/...` path whose id does not parse is treated as a
/// generic page, never as a profile.
pub fn match_path(path: &str) -> RouteContext {
  let trimmed = path.trim_matches('/');
  if trimmed.is_empty() {
    return RouteContext::new(FRONT_ROUTE);
  }

  let segments: Vec<&str> = trimmed.split('/').collect();
  match segments.as_slice() {
    ["user", id] => match id.parse::<UserId>() {
      Ok(uid) => RouteContext::new(DEFAULT_PROFILE_ROUTE).with_user(uid),
      Err(_) => RouteContext::new(GENERIC_ROUTE),
    },
    ["node", id] if id.parse::<ContentId>().is_ok() => {
      RouteContext::new(CONTENT_ROUTE)
    }
    _ => RouteContext::new(GENERIC_ROUTE),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn profile_path_carries_user() {
    let route = match_path("/user/42");
    assert_eq!(route.route_name, DEFAULT_PROFILE_ROUTE);
    assert_eq!(route.route_user_id, Some(UserId(42)));
  }

  #[test]
  fn trailing_slash_is_ignored() {
    assert_eq!(match_path("/user/42/"), match_path("/user/42"));
  }

  #[test]
  fn non_numeric_user_is_generic() {
    assert_eq!(match_path("/user/login"), RouteContext::new(GENERIC_ROUTE));
  }

  #[test]
  fn node_front_and_other_pages() {
    assert_eq!(match_path("/node/5"), RouteContext::new(CONTENT_ROUTE));
    assert_eq!(match_path("/"), RouteContext::new(FRONT_ROUTE));
    assert_eq!(match_path(""), RouteContext::new(FRONT_ROUTE));
    assert_eq!(match_path("/about/team"), RouteContext::new(GENERIC_ROUTE));
    assert_eq!(match_path("/user/42/edit"), RouteContext::new(GENERIC_ROUTE));
  }
}
