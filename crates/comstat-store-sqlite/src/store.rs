//! [`SqliteStore`], the SQLite implementation of [`CommentRepository`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use tracing::debug;

use comstat_core::{
  comment::{Comment, CommentId, ContentId, UserId},
  repository::CommentRepository,
};

use crate::{
  Error, Result,
  encode::{COMMENT_COLUMNS, RawComment, decode_dt, decode_id, encode_dt, encode_id},
  schema::SCHEMA,
};

/// Input for [`SqliteStore::add_comment`].
#[derive(Debug, Clone)]
pub struct NewComment {
  pub owner_id:   UserId,
  pub content_id: ContentId,
  pub body:       String,
  pub approved:   bool,
  /// Defaults to the time of insertion.
  pub created_at: Option<DateTime<Utc>>,
}

impl NewComment {
  pub fn new(owner_id: UserId, content_id: ContentId, body: impl Into<String>) -> Self {
    Self {
      owner_id,
      content_id,
      body: body.into(),
      approved: true,
      created_at: None,
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A comment store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Create a content item and return its new id.
  pub async fn add_content(&self, title: impl Into<String>) -> Result<ContentId> {
    let title = title.into();
    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO content (title) VALUES (?1)",
          rusqlite::params![title],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(ContentId(decode_id(id)?))
  }

  /// Create a content item with a caller-supplied id.
  ///
  /// Used when importing fixtures whose comments reference known ids.
  pub async fn add_content_with_id(
    &self,
    id: ContentId,
    title: impl Into<String>,
  ) -> Result<ContentId> {
    let raw_id = encode_id(id.0)?;
    if self.content_title(id).await?.is_some() {
      return Err(Error::ContentExists(id));
    }

    let title = title.into();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO content (content_id, title) VALUES (?1, ?2)",
          rusqlite::params![raw_id, title],
        )?;
        Ok(())
      })
      .await?;
    Ok(id)
  }

  /// Record a comment and return it as the repository would.
  pub async fn add_comment(&self, input: NewComment) -> Result<Comment> {
    let title = self
      .content_title(input.content_id)
      .await?
      .ok_or(Error::ContentNotFound(input.content_id))?;

    // Stored at microsecond precision; hand back what a read would return.
    let at         = encode_dt(input.created_at.unwrap_or_else(Utc::now));
    let created_at = decode_dt(at)?;
    let owner      = encode_id(input.owner_id.0)?;
    let content    = encode_id(input.content_id.0)?;
    let body       = input.body.clone();
    let approved   = input.approved;

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (owner_id, content_id, body, approved, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![owner, content, body, approved, at],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Comment {
      id: CommentId(decode_id(id)?),
      owner_id: input.owner_id,
      body: input.body,
      approved,
      created_at,
      commented_entity_id: input.content_id,
      commented_entity_title: title,
    })
  }

  async fn content_title(&self, id: ContentId) -> Result<Option<String>> {
    let raw_id = encode_id(id.0)?;
    let title: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT title FROM content WHERE content_id = ?1",
              rusqlite::params![raw_id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(title)
  }

  /// Run a comment query and decode every row.
  async fn query_comments(
    &self,
    sql: String,
    owner: i64,
    limit: Option<i64>,
  ) -> Result<Vec<Comment>> {
    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match limit {
          Some(limit) => stmt
            .query_map(rusqlite::params![owner, limit], RawComment::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map(rusqlite::params![owner], RawComment::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_comment).collect()
  }
}

// ─── CommentRepository impl ──────────────────────────────────────────────────

impl CommentRepository for SqliteStore {
  type Error = Error;

  async fn find_comments_by_owner(&self, owner: UserId) -> Result<Vec<Comment>> {
    if owner.is_anonymous() {
      return Ok(Vec::new());
    }
    // Ids that cannot be stored own nothing.
    let Ok(raw_owner) = encode_id(owner.0) else {
      return Ok(Vec::new());
    };

    let sql = format!(
      "SELECT {COMMENT_COLUMNS}
       FROM comments c
       JOIN content n ON n.content_id = c.content_id
       WHERE c.owner_id = ?1
       ORDER BY c.comment_id"
    );
    let comments = self.query_comments(sql, raw_owner, None).await?;
    debug!(%owner, count = comments.len(), "loaded comments by owner");
    Ok(comments)
  }

  async fn find_recent_approved_comments_by_owner(
    &self,
    owner: UserId,
    limit: usize,
  ) -> Result<Vec<Comment>> {
    if owner.is_anonymous() || limit == 0 {
      return Ok(Vec::new());
    }
    let Ok(raw_owner) = encode_id(owner.0) else {
      return Ok(Vec::new());
    };

    let sql = format!(
      "SELECT {COMMENT_COLUMNS}
       FROM comments c
       JOIN content n ON n.content_id = c.content_id
       WHERE c.owner_id = ?1 AND c.approved = 1
       ORDER BY c.created_at DESC, c.comment_id DESC
       LIMIT ?2"
    );
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let comments = self
      .query_comments(sql, raw_owner, Some(limit))
      .await?;
    debug!(%owner, limit, count = comments.len(), "loaded recent approved comments");
    Ok(comments)
  }
}
