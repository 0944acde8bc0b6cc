//! Driven port for fetching the three flat collections from the upstream
//! test API.
//!
//! The domain owns the record shapes so the refresh flow stays
//! adapter-agnostic; the HTTP adapter maps transport failures into the
//! variants below.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::post::{Comment, Post};
use crate::domain::user::User;

/// Errors surfaced while calling the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderSourceError {
    /// Network transport failed before receiving a response.
    #[error("upstream transport failed: {message}")]
    Transport {
        /// Adapter-supplied description of the failure.
        message: String,
    },
    /// The upstream call exceeded its timeout.
    #[error("upstream timeout: {message}")]
    Timeout {
        /// Adapter-supplied description of the failure.
        message: String,
    },
    /// The upstream answered with a non-success status.
    #[error("upstream returned status {status}: {message}")]
    Status {
        /// HTTP status code received.
        status: u16,
        /// Body preview or reason phrase.
        message: String,
    },
    /// The upstream response could not be decoded into domain records.
    #[error("upstream response decode failed: {message}")]
    Decode {
        /// Adapter-supplied description of the failure.
        message: String,
    },
}

impl PlaceholderSourceError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for fetching the upstream collections.
///
/// The three fetches are independent; callers may issue them concurrently
/// and join on completion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceholderSource: Send + Sync {
    /// Fetch the user collection.
    async fn fetch_users(&self) -> Result<Vec<User>, PlaceholderSourceError>;

    /// Fetch the post collection.
    async fn fetch_posts(&self) -> Result<Vec<Post>, PlaceholderSourceError>;

    /// Fetch the comment collection.
    async fn fetch_comments(&self) -> Result<Vec<Comment>, PlaceholderSourceError>;
}

/// Fixture source returning canned collections, for tests without a network.
#[derive(Debug, Default, Clone)]
pub struct FixturePlaceholderSource {
    /// Users to return from [`PlaceholderSource::fetch_users`].
    pub users: Vec<User>,
    /// Posts to return from [`PlaceholderSource::fetch_posts`].
    pub posts: Vec<Post>,
    /// Comments to return from [`PlaceholderSource::fetch_comments`].
    pub comments: Vec<Comment>,
}

#[async_trait]
impl PlaceholderSource for FixturePlaceholderSource {
    async fn fetch_users(&self) -> Result<Vec<User>, PlaceholderSourceError> {
        Ok(self.users.clone())
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, PlaceholderSourceError> {
        Ok(self.posts.clone())
    }

    async fn fetch_comments(&self) -> Result<Vec<Comment>, PlaceholderSourceError> {
        Ok(self.comments.clone())
    }
}
