//! Driven port for aggregated document persistence.
//!
//! The store holds one document per user, keyed by the user's natural id.
//! A refresh swaps the entire collection; the CRUD operations act on single
//! documents.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::document::UserDocument;

/// Errors raised by document repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentRepositoryError {
    /// Repository connection could not be established.
    #[error("document repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied description of the failure.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("document repository query failed: {message}")]
    Query {
        /// Adapter-supplied description of the failure.
        message: String,
    },
    /// A uniqueness constraint (natural id or email) was violated.
    #[error("document already exists: {message}")]
    Duplicate {
        /// Adapter-supplied description of the conflict.
        message: String,
    },
    /// A stored document could not be encoded or decoded.
    #[error("document serialisation failed: {message}")]
    Serialization {
        /// Adapter-supplied description of the failure.
        message: String,
    },
}

impl DocumentRepositoryError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate error.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }

    /// Create a serialisation error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Port for storing and retrieving aggregated user documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDocumentRepository: Send + Sync {
    /// Discard the stored collection and insert the given documents in order.
    ///
    /// Returns the number of documents stored. The swap is atomic where the
    /// backing store supports transactions.
    async fn replace_all(
        &self,
        documents: Vec<UserDocument>,
    ) -> Result<usize, DocumentRepositoryError>;

    /// List every stored document.
    async fn list(&self) -> Result<Vec<UserDocument>, DocumentRepositoryError>;

    /// Fetch one document by the user's natural id.
    async fn find_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<UserDocument>, DocumentRepositoryError>;

    /// Insert a single document, rejecting duplicates by natural id or email.
    async fn insert(&self, document: UserDocument) -> Result<(), DocumentRepositoryError>;

    /// Delete one document by the user's natural id. Returns whether a
    /// document was removed.
    async fn delete_by_user_id(&self, user_id: i64) -> Result<bool, DocumentRepositoryError>;

    /// Delete every stored document, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, DocumentRepositoryError>;
}

/// In-memory repository for tests and handler wiring without a database.
///
/// Preserves insertion order, which stands in for the natural-key ordering
/// the database adapter provides.
#[derive(Debug, Default)]
pub struct InMemoryUserDocumentRepository {
    documents: Mutex<Vec<UserDocument>>,
}

impl InMemoryUserDocumentRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<UserDocument>> {
        // A poisoned lock only occurs after a panic in another test thread;
        // recovering the data keeps the remaining assertions meaningful.
        self.documents
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl UserDocumentRepository for InMemoryUserDocumentRepository {
    async fn replace_all(
        &self,
        documents: Vec<UserDocument>,
    ) -> Result<usize, DocumentRepositoryError> {
        let mut store = self.lock();
        let stored = documents.len();
        *store = documents;
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<UserDocument>, DocumentRepositoryError> {
        Ok(self.lock().clone())
    }

    async fn find_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<UserDocument>, DocumentRepositoryError> {
        Ok(self.lock().iter().find(|d| d.user_id() == user_id).cloned())
    }

    async fn insert(&self, document: UserDocument) -> Result<(), DocumentRepositoryError> {
        let mut store = self.lock();
        if store
            .iter()
            .any(|d| d.user_id() == document.user_id() || d.user.email == document.user.email)
        {
            return Err(DocumentRepositoryError::duplicate(format!(
                "user {} already stored",
                document.user_id()
            )));
        }
        store.push(document);
        Ok(())
    }

    async fn delete_by_user_id(&self, user_id: i64) -> Result<bool, DocumentRepositoryError> {
        let mut store = self.lock();
        let before = store.len();
        store.retain(|d| d.user_id() != user_id);
        Ok(store.len() < before)
    }

    async fn delete_all(&self) -> Result<u64, DocumentRepositoryError> {
        let mut store = self.lock();
        let removed = store.len() as u64;
        store.clear();
        Ok(removed)
    }
}
