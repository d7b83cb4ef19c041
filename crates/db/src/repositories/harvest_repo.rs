//! Repository for the `harvests` table.

use agro_core::types::DbId;
use sqlx::PgPool;

use crate::models::harvest::{CreateHarvest, Harvest, UpdateHarvest};

const COLUMNS: &str = "id, farm_id, year, created_at, updated_at";

/// Provides CRUD operations for harvests.
pub struct HarvestRepo;

impl HarvestRepo {
    /// Insert a new harvest, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateHarvest) -> Result<Harvest, sqlx::Error> {
        let query = format!(
            "INSERT INTO harvests (farm_id, year)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Harvest>(&query)
            .bind(input.farm_id)
            .bind(input.year)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Harvest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM harvests WHERE id = $1");
        sqlx::query_as::<_, Harvest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all harvests, newest year first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Harvest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM harvests ORDER BY year DESC, id DESC");
        sqlx::query_as::<_, Harvest>(&query).fetch_all(pool).await
    }

    /// List the harvests recorded for a farm, newest year first.
    pub async fn list_by_farm(pool: &PgPool, farm_id: DbId) -> Result<Vec<Harvest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM harvests WHERE farm_id = $1 ORDER BY year DESC, id DESC"
        );
        sqlx::query_as::<_, Harvest>(&query)
            .bind(farm_id)
            .fetch_all(pool)
            .await
    }

    /// Update a harvest. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHarvest,
    ) -> Result<Option<Harvest>, sqlx::Error> {
        let query = format!(
            "UPDATE harvests SET
                farm_id = COALESCE($2, farm_id),
                year = COALESCE($3, year)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Harvest>(&query)
            .bind(id)
            .bind(input.farm_id)
            .bind(input.year)
            .fetch_optional(pool)
            .await
    }

    /// Delete a harvest and, by cascade, its crops. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM harvests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
