//! JSON render data for external presentation layers.

use axum::{
  extract::{Query, State},
  http::HeaderMap,
  response::Response,
};
use comstat_core::repository::CommentRepository;

use crate::{
  AppState,
  auth::Visitor,
  error::Error,
  handlers::{BlockParams, block_data, cached_response},
};

const CONTENT_TYPE_JSON: &str = "application/json";

/// `GET /api/comment-statistics[?path=<page path>]`
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

  cached_response(&headers, &state.config, &data, "json", CONTENT_TYPE_JSON, || {
    serde_json::to_string(&data).map_err(|e| Error::Render(e.to_string()))
  })
}
