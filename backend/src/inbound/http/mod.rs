//! HTTP adapter: handlers, shared state, and the wire error envelope.

pub mod error;
pub mod health;
pub mod refresh;
pub mod state;
pub mod users;

pub use error::{ApiError, ApiResult};
pub use state::HttpState;
