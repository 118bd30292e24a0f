//! One-line previews of recent comments.

use serde::{Deserialize, Serialize};

use crate::{
  comment::{Comment, CommentId},
  links::SiteLinks,
};

/// Maximum preview length in characters (not bytes).
pub const PREVIEW_LENGTH: usize = 100;

/// Appended to a preview that was cut short.
pub const ELLIPSIS: &str = "...";

/// A hyperlink target and its label. Both are escaped at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
  pub url:   String,
  pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
  pub comment_id: CommentId,
  pub text:       String,
  /// Points at the commented content item.
  pub link:       Link,
}

/// Cut `body` to [`PREVIEW_LENGTH`] characters, appending [`ELLIPSIS`] only if
/// something was cut.
pub fn truncate_preview(body: &str) -> String {
  match body.char_indices().nth(PREVIEW_LENGTH) {
    Some((cut, _)) => format!("{}{ELLIPSIS}", &body[..cut]),
    None => body.to_owned(),
  }
}

pub fn format_preview(comment: &Comment, links: &impl SiteLinks) -> Preview {
  Preview {
    comment_id: comment.id,
    text:       truncate_preview(&comment.body),
    link:       Link {
      url:   links.content_url(comment.commented_entity_id),
      label: comment.commented_entity_title.clone(),
    },
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::{
    comment::{ContentId, UserId},
    links::PathLinks,
  };

  #[test]
  fn exactly_limit_is_untouched() {
    let body = "a".repeat(PREVIEW_LENGTH);
    assert_eq!(truncate_preview(&body), body);
  }

  #[test]
  fn one_over_limit_is_cut_with_ellipsis() {
    let body = "a".repeat(PREVIEW_LENGTH + 1);
    let preview = truncate_preview(&body);
    assert_eq!(preview, format!("{}{ELLIPSIS}", "a".repeat(PREVIEW_LENGTH)));
  }

  #[test]
  fn counts_characters_not_bytes() {
    // Each 'é' is two bytes in UTF-8.
    let body = "é".repeat(PREVIEW_LENGTH);
    assert_eq!(truncate_preview(&body), body);

    let long = "é".repeat(PREVIEW_LENGTH + 5);
    let preview = truncate_preview(&long);
    assert_eq!(preview.chars().count(), PREVIEW_LENGTH + ELLIPSIS.len());
    assert!(preview.starts_with(&"é".repeat(PREVIEW_LENGTH)));
  }

  #[test]
  fn empty_body() {
    assert_eq!(truncate_preview(""), "");
  }

  #[test]
  fn preview_links_to_commented_content() {
    let comment = Comment {
      id:                     CommentId(9),
      owner_id:               UserId(42),
      body:                   "Nice article".into(),
      approved:               true,
      created_at:             Utc::now(),
      commented_entity_id:    ContentId(17),
      commented_entity_title: "Release notes".into(),
    };
    let preview = format_preview(&comment, &PathLinks::default());
    assert_eq!(preview.comment_id, CommentId(9));
    assert_eq!(preview.text, "Nice article");
    assert_eq!(preview.link, Link {
      url:   "/node/17".into(),
      label: "Release notes".into(),
    });
  }
}
