//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::user_documents;

/// Row struct for reading from the user_documents table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserDocumentRow {
    pub user_id: i64,
    #[expect(dead_code, reason = "uniqueness column read back for completeness")]
    pub email: String,
    pub document: serde_json::Value,
    #[expect(dead_code, reason = "audit column not surfaced through the port")]
    pub refreshed_at: DateTime<Utc>,
}

/// Insertable struct for writing user documents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_documents)]
pub(crate) struct NewUserDocumentRow {
    pub user_id: i64,
    pub email: String,
    pub document: serde_json::Value,
}
