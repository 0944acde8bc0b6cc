//! Refresh flow: concurrent upstream fetch, aggregation, replace-all persist.
//!
//! The three fetches run concurrently and join before the pure aggregation
//! step; nothing is persisted unless all three succeed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::aggregate::aggregate;
use super::error::DomainError;
use super::ports::{
    DocumentRepositoryError, PlaceholderSource, PlaceholderSourceError, UserDocumentRepository,
};

/// Counts reported after a successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Users fetched from the upstream API.
    pub users: usize,
    /// Posts fetched from the upstream API.
    pub posts: usize,
    /// Comments fetched from the upstream API.
    pub comments: usize,
    /// Aggregated documents stored after the swap.
    pub documents: usize,
}

/// Use-case port for triggering a refresh of the mirrored collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshService: Send + Sync {
    /// Fetch the upstream collections, aggregate, and replace the store.
    async fn refresh(&self) -> Result<RefreshSummary, DomainError>;
}

/// Production refresh service wiring the source and repository ports.
pub struct PlaceholderRefreshService {
    source: Arc<dyn PlaceholderSource>,
    repository: Arc<dyn UserDocumentRepository>,
}

impl PlaceholderRefreshService {
    /// Create a refresh service over the given ports.
    pub fn new(
        source: Arc<dyn PlaceholderSource>,
        repository: Arc<dyn UserDocumentRepository>,
    ) -> Self {
        Self { source, repository }
    }
}

fn map_source_error(error: PlaceholderSourceError) -> DomainError {
    error!(%error, "upstream fetch failed");
    DomainError::upstream_unavailable(error.to_string())
}

fn map_repository_error(error: DocumentRepositoryError) -> DomainError {
    error!(%error, "document store rejected refreshed collection");
    DomainError::internal("failed to store refreshed documents")
}

#[async_trait]
impl RefreshService for PlaceholderRefreshService {
    async fn refresh(&self) -> Result<RefreshSummary, DomainError> {
        let (users, posts, comments) = tokio::try_join!(
            self.source.fetch_users(),
            self.source.fetch_posts(),
            self.source.fetch_comments(),
        )
        .map_err(map_source_error)?;

        let summary_inputs = (users.len(), posts.len(), comments.len());
        let documents = aggregate(users, posts, comments);
        let stored = self
            .repository
            .replace_all(documents)
            .await
            .map_err(map_repository_error)?;

        let summary = RefreshSummary {
            users: summary_inputs.0,
            posts: summary_inputs.1,
            comments: summary_inputs.2,
            documents: stored,
        };
        info!(
            users = summary.users,
            posts = summary.posts,
            comments = summary.comments,
            documents = summary.documents,
            "refreshed mirrored collection"
        );
        Ok(summary)
    }
}
