//! PostgreSQL-backed `UserDocumentRepository` implementation using Diesel.
//!
//! Documents are stored wholesale in a JSONB column keyed by the user's
//! natural id, with the email mirrored into its own unique column so
//! duplicate detection happens in the database rather than in application
//! code. The replace-all swap runs in a single transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{DocumentRepositoryError, UserDocumentRepository};
use crate::domain::UserDocument;

use super::models::{NewUserDocumentRow, UserDocumentRow};
use super::pool::{DbPool, PoolError};
use super::schema::user_documents;

/// Diesel-backed implementation of the `UserDocumentRepository` port.
#[derive(Clone)]
pub struct DieselUserDocumentRepository {
    pool: DbPool,
}

impl DieselUserDocumentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DocumentRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            DocumentRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> DocumentRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DocumentRepositoryError::duplicate(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DocumentRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => DocumentRepositoryError::query("record not found"),
        _ => DocumentRepositoryError::query("database error"),
    }
}

fn row_to_document(row: UserDocumentRow) -> Result<UserDocument, DocumentRepositoryError> {
    serde_json::from_value(row.document).map_err(|error| {
        DocumentRepositoryError::serialization(format!(
            "stored document {} is not decodable: {error}",
            row.user_id
        ))
    })
}

fn document_to_row(document: &UserDocument) -> Result<NewUserDocumentRow, DocumentRepositoryError> {
    let value = serde_json::to_value(document).map_err(|error| {
        DocumentRepositoryError::serialization(format!(
            "document {} is not encodable: {error}",
            document.user_id()
        ))
    })?;
    Ok(NewUserDocumentRow {
        user_id: document.user_id(),
        email: document.user.email.clone(),
        document: value,
    })
}

#[async_trait]
impl UserDocumentRepository for DieselUserDocumentRepository {
    async fn replace_all(
        &self,
        documents: Vec<UserDocument>,
    ) -> Result<usize, DocumentRepositoryError> {
        let rows = documents
            .iter()
            .map(document_to_row)
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored = conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::delete(user_documents::table).execute(conn).await?;
                    if rows.is_empty() {
                        return Ok(0);
                    }
                    diesel::insert_into(user_documents::table)
                        .values(&rows)
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<UserDocument>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserDocumentRow> = user_documents::table
            .order(user_documents::user_id.asc())
            .select(UserDocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_document).collect()
    }

    async fn find_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<UserDocument>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserDocumentRow> = user_documents::table
            .filter(user_documents::user_id.eq(user_id))
            .select(UserDocumentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_document).transpose()
    }

    async fn insert(&self, document: UserDocument) -> Result<(), DocumentRepositoryError> {
        let row = document_to_row(&document)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(user_documents::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_by_user_id(&self, user_id: i64) -> Result<bool, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted =
            diesel::delete(user_documents::table.filter(user_documents::user_id.eq(user_id)))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn delete_all(&self) -> Result<u64, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(user_documents::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted as u64)
    }
}
