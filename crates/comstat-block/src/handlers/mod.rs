pub mod api;
pub mod fragment;
pub mod page;

use axum::{
  body::Body,
  http::{HeaderMap, HeaderValue, StatusCode, header},
  response::Response,
};
use comstat_core::{
  comment::UserId,
  render::BlockData,
  repository::CommentRepository,
  stats::aggregate,
};
use serde::Deserialize;
use tracing::debug;

use crate::{
  AppState, ServerConfig,
  error::Error,
  etag::{compute_etag, if_none_match},
  route::match_path,
};

/// Query parameters for endpoints that render the block for another page.
#[derive(Debug, Deserialize)]
pub struct BlockParams {
  /// Path of the page hosting the block; defaults to the front page.
  pub path: Option<String>,
}

impl BlockParams {
  pub fn page_path(&self) -> &str { self.path.as_deref().unwrap_or("/") }
}

/// Resolve the subject for `path` and compute its render data.
pub(crate) async fn block_data<R>(
  state: &AppState<R>,
  path: &str,
  visitor: UserId,
) -> Result<BlockData, Error>
where
  R: CommentRepository,
{
  let route   = match_path(path);
  let subject = state.resolver.resolve(&route, visitor);

  let stats = aggregate(state.store.as_ref(), subject)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  debug!(
    path,
    route = %route.route_name,
    ?subject,
    total = stats.total_count,
    "computed comment statistics"
  );

  Ok(BlockData::from_statistics(
    &stats,
    &state.config.links,
    state.config.cache_max_age,
  ))
}

/// Build a response carrying cache headers, answering `304` when the client
/// already holds the current representation. `render` runs only on a miss.
pub(crate) fn cached_response(
  headers: &HeaderMap,
  config: &ServerConfig,
  data: &BlockData,
  representation: &str,
  content_type: &'static str,
  render: impl FnOnce() -> Result<String, Error>,
) -> Result<Response, Error> {
  let etag = compute_etag(representation, data, &config.labels, &config.links)?;

  let builder = Response::builder()
    .header(header::ETAG, &etag)
    .header(header::CACHE_CONTROL, data.cache.cache_control())
    .header(header::VARY, HeaderValue::from_static("Authorization"));

  let response = if if_none_match(headers, &etag) {
    builder.status(StatusCode::NOT_MODIFIED).body(Body::empty())
  } else {
    builder
      .status(StatusCode::OK)
      .header(header::CONTENT_TYPE, content_type)
      .body(Body::from(render()?))
  };

  response.map_err(|e| Error::Render(e.to_string()))
}
