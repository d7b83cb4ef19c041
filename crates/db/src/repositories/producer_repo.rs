//! Repository for the `producers` table.

use agro_core::types::DbId;
use sqlx::PgPool;

use crate::models::producer::{CreateProducer, Producer, UpdateProducer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, document, name, created_at, updated_at";

/// Provides CRUD operations for producers.
pub struct ProducerRepo;

impl ProducerRepo {
    /// Insert a new producer, returning the created row.
    ///
    /// Fails with a unique violation on `uq_producers_document` if the
    /// document is already registered.
    pub async fn create(pool: &PgPool, input: &CreateProducer) -> Result<Producer, sqlx::Error> {
        let query = format!(
            "INSERT INTO producers (document, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Producer>(&query)
            .bind(&input.document)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a producer by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Producer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM producers WHERE id = $1");
        sqlx::query_as::<_, Producer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a producer by normalized document.
    pub async fn find_by_document(
        pool: &PgPool,
        document: &str,
    ) -> Result<Option<Producer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM producers WHERE document = $1");
        sqlx::query_as::<_, Producer>(&query)
            .bind(document)
            .fetch_optional(pool)
            .await
    }

    /// List all producers ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Producer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM producers ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Producer>(&query).fetch_all(pool).await
    }

    /// Update a producer. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProducer,
    ) -> Result<Option<Producer>, sqlx::Error> {
        let query = format!(
            "UPDATE producers SET
                document = COALESCE($2, document),
                name = COALESCE($3, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Producer>(&query)
            .bind(id)
            .bind(&input.document)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a producer and, by cascade, its farms. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM producers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
