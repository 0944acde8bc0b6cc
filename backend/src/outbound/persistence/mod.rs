//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Thin adapters only: repository implementations translate between Diesel
//! rows and domain documents, with all database errors mapped to the
//! repository port's typed variants. Row structs and the `diesel::table!`
//! schema are internal and never cross into the domain.

mod diesel_user_document_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_document_repository::DieselUserDocumentRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
