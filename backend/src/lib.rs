//! Backend library: mirrors a JSONPlaceholder-shaped API into PostgreSQL as
//! denormalized per-user documents and serves CRUD endpoints over them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped tracing middleware.
pub use middleware::trace::Trace;
