//! Render data and display-line assembly.
//!
//! [`BlockData`] is what the presentation layer receives; [`assemble`] turns
//! it into the ordered lines the block shows. Escaping is left to whichever
//! writer emits the final markup.

use serde::{Deserialize, Serialize};

use crate::{
  cache::{CacheMetadata, CachePolicy},
  comment::UserId,
  links::SiteLinks,
  preview::{Link, Preview, format_preview},
  stats::CommentStatistics,
};

// ─── Render data ─────────────────────────────────────────────────────────────

/// Everything needed to display the block for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockData {
  /// `None` when the subject is anonymous.
  pub subject:          Option<UserId>,
  pub total_count:      usize,
  pub total_word_count: usize,
  pub approved_count:   usize,
  pub pending_count:    usize,
  pub recent_approved:  Vec<Preview>,
  pub has_comments:     bool,
  pub cache:            CacheMetadata,
}

impl BlockData {
  pub fn from_statistics(
    stats: &CommentStatistics,
    links: &impl SiteLinks,
    policy: CachePolicy,
  ) -> Self {
    Self {
      subject:          stats.subject.user_id(),
      total_count:      stats.total_count,
      total_word_count: stats.total_word_count,
      approved_count:   stats.approved_count,
      pending_count:    stats.pending_count,
      recent_approved:  stats
        .recent_approved
        .iter()
        .map(|c| format_preview(c, links))
        .collect(),
      has_comments:     stats.has_comments(),
      cache:            CacheMetadata::new(policy),
    }
  }
}

// ─── Labels ──────────────────────────────────────────────────────────────────

/// Static label templates. `@name` placeholders are substituted at assembly
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
  pub title:        String,
  /// Must contain `@login` where the login link goes.
  pub login_prompt: String,
  pub login_link:   String,
  pub no_comments:  String,
  /// `@uid`
  pub subject:      String,
  /// `@count`
  pub total:        String,
  /// `@count`
  pub words:        String,
  pub recent:       String,
}

impl Default for Labels {
  fn default() -> Self {
    Self {
      title:        "Comment statistics".to_string(),
      login_prompt: "Please @login to see your comment statistics.".to_string(),
      login_link:   "log in".to_string(),
      no_comments:  "No comments yet.".to_string(),
      subject:      "User ID: @uid".to_string(),
      total:        "Total comments: @count".to_string(),
      words:        "Total words: @count".to_string(),
      recent:       "Recent comments:".to_string(),
    }
  }
}

/// Replace each `(placeholder, value)` pair in `template`.
pub fn format_label(template: &str, args: &[(&str, &str)]) -> String {
  args
    .iter()
    .fold(template.to_owned(), |acc, (key, value)| acc.replace(key, value))
}

// ─── Display lines ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayLine {
  /// `before` + link + `after`.
  LoginPrompt { before: String, link: Link, after: String },
  NoComments { text: String },
  Subject { text: String },
  TotalCount { text: String },
  WordCount { text: String },
  RecentHeader { text: String },
  Preview { preview: Preview },
}

/// Build the display lines for `data`.
///
/// - anonymous subject: a single login prompt;
/// - subject without comments: a single "no comments" line;
/// - otherwise: subject, total, words, recent header, then one line per
///   preview.
pub fn assemble(
  data: &BlockData,
  labels: &Labels,
  links: &impl SiteLinks,
) -> Vec<DisplayLine> {
  let Some(uid) = data.subject else {
    return vec![login_prompt(labels, links)];
  };

  if !data.has_comments {
    return vec![DisplayLine::NoComments { text: labels.no_comments.clone() }];
  }

  let uid = uid.to_string();
  let total = data.total_count.to_string();
  let words = data.total_word_count.to_string();

  let mut lines = vec![
    DisplayLine::Subject {
      text: format_label(&labels.subject, &[("@uid", uid.as_str())]),
    },
    DisplayLine::TotalCount {
      text: format_label(&labels.total, &[("@count", total.as_str())]),
    },
    DisplayLine::WordCount {
      text: format_label(&labels.words, &[("@count", words.as_str())]),
    },
    DisplayLine::RecentHeader { text: labels.recent.clone() },
  ];
  lines.extend(
    data
      .recent_approved
      .iter()
      .cloned()
      .map(|preview| DisplayLine::Preview { preview }),
  );
  lines
}

fn login_prompt(labels: &Labels, links: &impl SiteLinks) -> DisplayLine {
  let link = Link { url: links.login_url(), label: labels.login_link.clone() };
  let (before, after) = match labels.login_prompt.split_once("@login") {
    Some((before, after)) => (before.to_owned(), after.to_owned()),
    None => (format!("{} ", labels.login_prompt), String::new()),
  };
  DisplayLine::LoginPrompt { before, link, after }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::{
    comment::{Comment, CommentId, ContentId},
    links::PathLinks,
    subject::Subject,
  };

  fn comment(id: u64, approved: bool, body: &str) -> Comment {
    Comment {
      id:                     CommentId(id),
      owner_id:               UserId(42),
      body:                   body.into(),
      approved,
      created_at:             Utc.timestamp_opt(id as i64, 0).unwrap(),
      commented_entity_id:    ContentId(id * 10),
      commented_entity_title: format!("Node {id}"),
    }
  }

  fn data(stats: &CommentStatistics) -> BlockData {
    BlockData::from_statistics(stats, &PathLinks::default(), CachePolicy::Uncacheable)
  }

  #[test]
  fn anonymous_gets_login_prompt_only() {
    let stats = CommentStatistics::empty(Subject::Anonymous);
    let lines = assemble(&data(&stats), &Labels::default(), &PathLinks::default());

    assert_eq!(lines, vec![DisplayLine::LoginPrompt {
      before: "Please ".into(),
      link:   Link { url: "/user/login".into(), label: "log in".into() },
      after:  " to see your comment statistics.".into(),
    }]);
  }

  #[test]
  fn login_prompt_without_placeholder_appends_link() {
    let labels = Labels { login_prompt: "Sign in first.".into(), ..Labels::default() };
    let stats = CommentStatistics::empty(Subject::Anonymous);
    let lines = assemble(&data(&stats), &labels, &PathLinks::default());
    assert!(matches!(
      &lines[..],
      [DisplayLine::LoginPrompt { before, after, .. }]
        if before == "Sign in first. " && after.is_empty()
    ));
  }

  #[test]
  fn subject_without_comments_gets_no_comments_line() {
    let stats = CommentStatistics::empty(Subject::User(UserId(42)));
    let lines = assemble(&data(&stats), &Labels::default(), &PathLinks::default());
    assert_eq!(lines, vec![DisplayLine::NoComments { text: "No comments yet.".into() }]);
  }

  #[test]
  fn subject_with_comments_gets_full_listing() {
    let all = vec![comment(1, true, "hello world"), comment(2, false, "foo")];
    let stats = CommentStatistics::from_comments(
      Subject::User(UserId(42)),
      &all,
      vec![all[0].clone()],
    );
    let block = data(&stats);
    let lines = assemble(&block, &Labels::default(), &PathLinks::default());

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], DisplayLine::Subject { text: "User ID: 42".into() });
    assert_eq!(lines[1], DisplayLine::TotalCount { text: "Total comments: 2".into() });
    assert_eq!(lines[2], DisplayLine::WordCount { text: "Total words: 3".into() });
    assert_eq!(lines[3], DisplayLine::RecentHeader { text: "Recent comments:".into() });
    match &lines[4] {
      DisplayLine::Preview { preview } => {
        assert_eq!(preview.text, "hello world");
        assert_eq!(preview.link.url, "/node/10");
        assert_eq!(preview.link.label, "Node 1");
      }
      other => panic!("expected preview, got {other:?}"),
    }
  }

  #[test]
  fn only_pending_comments_still_lists_counts_without_previews() {
    let all = vec![comment(1, false, "waiting")];
    let stats = CommentStatistics::from_comments(Subject::User(UserId(42)), &all, vec![]);
    let lines = assemble(&data(&stats), &Labels::default(), &PathLinks::default());
    assert_eq!(lines.len(), 4);
    assert!(matches!(lines[3], DisplayLine::RecentHeader { .. }));
  }

  #[test]
  fn block_data_carries_counts_and_cache_metadata() {
    let all = vec![comment(1, true, "a b"), comment(2, false, "c")];
    let stats = CommentStatistics::from_comments(
      Subject::User(UserId(42)),
      &all,
      vec![all[0].clone()],
    );
    let block =
      BlockData::from_statistics(&stats, &PathLinks::default(), CachePolicy::MaxAge(60));

    assert_eq!(block.subject, Some(UserId(42)));
    assert_eq!((block.approved_count, block.pending_count), (1, 1));
    assert!(block.has_comments);
    assert_eq!(block.cache.cache_control(), "private, max-age=60");
    assert_eq!(block.recent_approved.len(), 1);
  }

  #[test]
  fn format_label_substitutes_placeholders() {
    assert_eq!(format_label("@a and @b", &[("@a", "1"), ("@b", "2")]), "1 and 2");
  }
}
