//! Refresh handler: re-mirror the upstream collections.
//!
//! ```text
//! POST /api/v1/refresh
//! ```

use actix_web::{post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::RefreshSummary;
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::state::HttpState;

/// Counts returned after a successful refresh.
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    /// Users fetched upstream.
    pub users: usize,
    /// Posts fetched upstream.
    pub posts: usize,
    /// Comments fetched upstream.
    pub comments: usize,
    /// Aggregated documents now stored.
    pub documents: usize,
}

impl From<RefreshSummary> for RefreshResponse {
    fn from(value: RefreshSummary) -> Self {
        Self {
            users: value.users,
            posts: value.posts,
            comments: value.comments,
            documents: value.documents,
        }
    }
}

/// Fetch the upstream collections, aggregate them, and replace the store.
///
/// The previous collection is discarded wholesale; on upstream failure the
/// store is left untouched.
#[utoipa::path(
    post,
    path = "/api/v1/refresh",
    responses(
        (status = 200, description = "Mirror refreshed", body = RefreshResponse),
        (status = 502, description = "Upstream API unavailable", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["refresh"],
    operation_id = "refreshMirror"
)]
#[post("/refresh")]
pub async fn run_refresh(state: web::Data<HttpState>) -> ApiResult<web::Json<RefreshResponse>> {
    let summary = state.refresh.refresh().await.map_err(ApiError::from_domain)?;
    Ok(web::Json(summary.into()))
}
