//! Seeding a store from a JSON fixture.
//!
//! ```json
//! {
//!   "content":  [{ "id": 1, "title": "Welcome" }],
//!   "comments": [{ "owner_id": 42, "content_id": 1, "body": "Hi", "approved": true }]
//! }
//! ```

use chrono::{DateTime, Utc};
use comstat_core::comment::{ContentId, UserId};
use comstat_store_sqlite::{NewComment, SqliteStore};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct Fixture {
  #[serde(default)]
  pub content:  Vec<FixtureContent>,
  #[serde(default)]
  pub comments: Vec<FixtureComment>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureContent {
  pub id:    ContentId,
  pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct FixtureComment {
  pub owner_id:   UserId,
  pub content_id: ContentId,
  pub body:       String,
  #[serde(default = "approved_by_default")]
  pub approved:   bool,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

fn approved_by_default() -> bool { true }

impl Fixture {
  pub fn from_json(json: &str) -> serde_json::Result<Self> {
    serde_json::from_str(json)
  }
}

/// Counts of records written by [`import`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
  pub content:  usize,
  pub comments: usize,
}

/// Write every content item, then every comment, stopping at the first error.
pub async fn import(
  store: &SqliteStore,
  fixture: Fixture,
) -> comstat_store_sqlite::Result<ImportSummary> {
  for item in &fixture.content {
    store.add_content_with_id(item.id, item.title.clone()).await?;
  }

  for c in fixture.comments.iter() {
    store
      .add_comment(NewComment {
        owner_id:   c.owner_id,
        content_id: c.content_id,
        body:       c.body.clone(),
        approved:   c.approved,
        created_at: c.created_at,
      })
      .await?;
  }

  let summary = ImportSummary {
    content:  fixture.content.len(),
    comments: fixture.comments.len(),
  };
  info!(content = summary.content, comments = summary.comments, "imported fixture");
  Ok(summary)
}
