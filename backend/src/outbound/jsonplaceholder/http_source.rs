//! Reqwest-backed upstream source adapter.
//!
//! Owns transport details only: request construction, timeout and HTTP
//! error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::dto::{CommentDto, PostDto, UserDto};
use crate::domain::ports::{PlaceholderSource, PlaceholderSourceError};
use crate::domain::{Comment, Post, User};

/// Users requested per refresh when no limit is configured, matching the
/// `?_limit=10` query the mirrored system always sent.
pub const DEFAULT_USER_LIMIT: u32 = 10;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upstream source adapter performing GET requests against one base URL.
pub struct JsonPlaceholderHttpSource {
    client: Client,
    base_url: Url,
    user_limit: u32,
}

impl JsonPlaceholderHttpSource {
    /// Build an adapter with the default request timeout and user limit.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_options(base_url, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_LIMIT)
    }

    /// Build an adapter with an explicit request timeout and user limit.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_options(
        base_url: Url,
        timeout: Duration,
        user_limit: u32,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            user_limit: user_limit.max(1),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, PlaceholderSourceError> {
        self.base_url.join(path).map_err(|error| {
            PlaceholderSourceError::transport(format!("invalid endpoint {path}: {error}"))
        })
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, PlaceholderSourceError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|error| {
            PlaceholderSourceError::decode(format!("invalid JSON payload for {path}: {error}"))
        })
    }
}

#[async_trait]
impl PlaceholderSource for JsonPlaceholderHttpSource {
    async fn fetch_users(&self) -> Result<Vec<User>, PlaceholderSourceError> {
        let query = [("_limit", self.user_limit.to_string())];
        let dtos: Vec<UserDto> = self.get_collection("users", &query).await?;
        dtos.into_iter()
            .map(|dto| dto.into_domain().map_err(PlaceholderSourceError::decode))
            .collect()
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, PlaceholderSourceError> {
        let dtos: Vec<PostDto> = self.get_collection("posts", &[]).await?;
        Ok(dtos.into_iter().map(Post::from).collect())
    }

    async fn fetch_comments(&self) -> Result<Vec<Comment>, PlaceholderSourceError> {
        let dtos: Vec<CommentDto> = self.get_collection("comments", &[]).await?;
        Ok(dtos.into_iter().map(Comment::from).collect())
    }
}

fn map_transport_error(error: reqwest::Error) -> PlaceholderSourceError {
    if error.is_timeout() {
        PlaceholderSourceError::timeout(error.to_string())
    } else {
        PlaceholderSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PlaceholderSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        preview
    };
    PlaceholderSourceError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, 500)]
    #[case(StatusCode::TOO_MANY_REQUESTS, 429)]
    #[case(StatusCode::NOT_FOUND, 404)]
    fn non_success_statuses_map_to_status_errors(
        #[case] status: StatusCode,
        #[case] expected: u16,
    ) {
        let error = map_status_error(status, b"{\"detail\":\"nope\"}");
        assert!(matches!(
            error,
            PlaceholderSourceError::Status { status, .. } if status == expected
        ));
    }

    #[test]
    fn empty_bodies_fall_back_to_the_reason_phrase() {
        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE, b"");
        assert!(error.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn long_bodies_are_truncated_in_the_preview() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 163);
    }

    #[test]
    fn body_preview_collapses_whitespace() {
        assert_eq!(body_preview(b"a \n  b\t c"), "a b c");
    }

    #[test]
    fn endpoint_joins_against_the_base_url() {
        let source = JsonPlaceholderHttpSource::new(
            Url::parse("https://jsonplaceholder.typicode.com").expect("base url"),
        )
        .expect("client builds");
        let url = source.endpoint("posts").expect("join path");
        assert_eq!(url.as_str(), "https://jsonplaceholder.typicode.com/posts");
    }

    #[test]
    fn user_limit_is_clamped_to_at_least_one() {
        let source = JsonPlaceholderHttpSource::with_options(
            Url::parse("https://jsonplaceholder.typicode.com").expect("base url"),
            Duration::from_secs(5),
            0,
        )
        .expect("client builds");
        assert_eq!(source.user_limit, 1);
    }
}
