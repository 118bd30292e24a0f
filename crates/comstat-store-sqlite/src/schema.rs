//! SQL schema for the comment statistics SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Content items that can be commented on.
CREATE TABLE IF NOT EXISTS content (
    content_id  INTEGER PRIMARY KEY,
    title       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    comment_id  INTEGER PRIMARY KEY,
    owner_id    INTEGER NOT NULL,     -- 0 = anonymous author
    content_id  INTEGER NOT NULL REFERENCES content(content_id),
    body        TEXT NOT NULL,
    approved    INTEGER NOT NULL,     -- 0 | 1
    created_at  INTEGER NOT NULL      -- microseconds since the Unix epoch, UTC
);

-- Serves both the per-owner scan and the recent-approved query.
CREATE INDEX IF NOT EXISTS comments_owner_recent_idx
    ON comments(owner_id, approved, created_at, comment_id);

PRAGMA user_version = 1;
";
