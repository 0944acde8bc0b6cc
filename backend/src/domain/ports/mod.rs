//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the upstream test API and the document store). Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants, and ships a fixture implementation for tests that do not
//! exercise the adapter.

mod document_repository;
mod placeholder_source;

pub use document_repository::{
    DocumentRepositoryError, InMemoryUserDocumentRepository, UserDocumentRepository,
};
pub use placeholder_source::{FixturePlaceholderSource, PlaceholderSource, PlaceholderSourceError};

#[cfg(test)]
pub use document_repository::MockUserDocumentRepository;
#[cfg(test)]
pub use placeholder_source::MockPlaceholderSource;
