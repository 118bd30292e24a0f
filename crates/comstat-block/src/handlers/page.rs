//! Standalone pages hosting the block, one per site path.

use axum::{
  extract::State,
  http::{HeaderMap, Uri},
  response::Response,
};
use comstat_core::{render::assemble, repository::CommentRepository};

use crate::{
  AppState,
  auth::Visitor,
  error::Error,
  handlers::{block_data, cached_response},
  html::{CONTENT_TYPE_HTML, render_page},
};

/// `GET /` and `GET /{*path}`
pub async fn handler<R>(
  State(state): State<AppState<R>>,
  Visitor(visitor): Visitor,
  headers: HeaderMap,
  uri: Uri,
) -> Result<Response, Error>
where
  R: CommentRepository + 'static,
{
  let data = block_data(&state, uri.path(), visitor).await?;

  cached_response(&headers, &state.config, &data, "page", CONTENT_TYPE_HTML, || {
    let lines = assemble(&data, &state.config.labels, &state.config.links);
    render_page(&state.config.labels.title, &lines)
  })
}
