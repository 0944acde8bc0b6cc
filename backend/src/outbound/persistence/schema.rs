//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match the migrations exactly; regenerate with `diesel print-schema`
//! when they change.

diesel::table! {
    /// Aggregated per-user documents, one row per mirrored user.
    user_documents (user_id) {
        /// Natural key: the upstream-assigned user id.
        user_id -> Int8,
        /// User email, unique across the store.
        email -> Varchar,
        /// The full nested document as JSONB.
        document -> Jsonb,
        /// When this row was last written.
        refreshed_at -> Timestamptz,
    }
}
