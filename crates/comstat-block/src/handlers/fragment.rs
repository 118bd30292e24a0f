//! The block markup on its own, for embedding into pages rendered elsewhere.

use axum::{
  extract::{Query, State},
  http::HeaderMap,
  response::Response,
};
use comstat_core::{render::assemble, repository::CommentRepository};

use crate::{
  AppState,
  auth::Visitor,
  error::Error,
  handlers::{BlockParams, block_data, cached_response},
  html::{CONTENT_TYPE_HTML, render_block},
};

/// `GET /block/comment-statistics[?path=<page path>]`
pub async fn handler<R>(
  State(state): State<AppState<R>>,
  Visitor(visitor): Visitor,
  headers: HeaderMap,
  Query(params): Query<BlockParams>,
) -> Result<Response, Error>
where
  R: CommentRepository + 'static,
{
  let data = block_data(&state, params.page_path(), visitor).await?;

  cached_response(&headers, &state.config, &data, "fragment", CONTENT_TYPE_HTML, || {
    let lines = assemble(&data, &state.config.labels, &state.config.links);
    render_block(&state.config.labels.title, &lines)
  })
}
