//! Repository for the `crops` table.

use agro_core::types::DbId;
use sqlx::PgPool;

use crate::models::crop::{CreateCrop, Crop, UpdateCrop};

const COLUMNS: &str = "id, harvest_id, name, created_at, updated_at";

/// Provides CRUD operations for crops.
pub struct CropRepo;

impl CropRepo {
    /// Insert a new crop, returning the created row.
    ///
    /// Fails with a unique violation on `uq_crops_harvest_id_name` if the
    /// harvest already has a crop with this name.
    pub async fn create(pool: &PgPool, input: &CreateCrop) -> Result<Crop, sqlx::Error> {
        let query = format!(
            "INSERT INTO crops (harvest_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Crop>(&query)
            .bind(input.harvest_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Crop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM crops WHERE id = $1");
        sqlx::query_as::<_, Crop>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Crop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM crops ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Crop>(&query).fetch_all(pool).await
    }

    /// List the crops planted in a harvest, alphabetically.
    pub async fn list_by_harvest(
        pool: &PgPool,
        harvest_id: DbId,
    ) -> Result<Vec<Crop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM crops WHERE harvest_id = $1 ORDER BY name");
        sqlx::query_as::<_, Crop>(&query)
            .bind(harvest_id)
            .fetch_all(pool)
            .await
    }

    /// Update a crop. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCrop,
    ) -> Result<Option<Crop>, sqlx::Error> {
        let query = format!(
            "UPDATE crops SET
                harvest_id = COALESCE($2, harvest_id),
                name = COALESCE($3, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Crop>(&query)
            .bind(id)
            .bind(input.harvest_id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a crop. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM crops WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
