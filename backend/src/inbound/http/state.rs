//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserDocumentRepository;
use crate::domain::RefreshService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Document store port backing the CRUD endpoints.
    pub documents: Arc<dyn UserDocumentRepository>,
    /// Refresh use-case port backing the refresh endpoint.
    pub refresh: Arc<dyn RefreshService>,
}

impl HttpState {
    /// Bundle the port implementations handlers depend on.
    pub fn new(
        documents: Arc<dyn UserDocumentRepository>,
        refresh: Arc<dyn RefreshService>,
    ) -> Self {
        Self { documents, refresh }
    }
}
