//! Reqwest-backed adapter for the upstream test API.

mod dto;
mod http_source;

pub use http_source::{JsonPlaceholderHttpSource, DEFAULT_USER_LIMIT};
