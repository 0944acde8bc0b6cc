//! Domain entities, the aggregation core, and ports.
//!
//! Purpose: define the strongly typed records mirrored from the upstream
//! test API, the pure join that nests them into per-user documents, and the
//! ports adapters implement. Transport and persistence concerns live in the
//! inbound and outbound layers.

pub mod aggregate;
pub mod document;
pub mod error;
pub mod ports;
pub mod post;
pub mod refresh;
pub mod user;

pub use self::aggregate::aggregate;
pub use self::document::{PostDocument, UserDocument};
pub use self::error::{DomainError, ErrorCode};
pub use self::post::{Comment, Post};
pub use self::refresh::{PlaceholderRefreshService, RefreshService, RefreshSummary};
pub use self::user::{Address, Company, Geo, User, UserValidationError};
