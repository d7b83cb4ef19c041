//! Repository for the `farms` table.

use agro_core::types::DbId;
use sqlx::PgPool;

use crate::models::farm::{CreateFarm, Farm, UpdateFarm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, producer_id, name, city, state, total_area, arable_area, \
                       vegetation_area, created_at, updated_at";

/// Provides CRUD operations for farms.
pub struct FarmRepo;

impl FarmRepo {
    /// Insert a new farm, returning the created row.
    ///
    /// `input.state` is stored as given; callers pass the canonical code.
    pub async fn create(pool: &PgPool, input: &CreateFarm) -> Result<Farm, sqlx::Error> {
        let query = format!(
            "INSERT INTO farms (producer_id, name, city, state, total_area, arable_area, vegetation_area)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Farm>(&query)
            .bind(input.producer_id)
            .bind(&input.name)
            .bind(&input.city)
            .bind(&input.state)
            .bind(input.total_area)
            .bind(input.arable_area)
            .bind(input.vegetation_area)
            .fetch_one(pool)
            .await
    }

    /// Find a farm by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Farm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM farms WHERE id = $1");
        sqlx::query_as::<_, Farm>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all farms ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Farm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM farms ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Farm>(&query).fetch_all(pool).await
    }

    /// List the farms owned by a producer.
    pub async fn list_by_producer(
        pool: &PgPool,
        producer_id: DbId,
    ) -> Result<Vec<Farm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM farms WHERE producer_id = $1 ORDER BY name");
        sqlx::query_as::<_, Farm>(&query)
            .bind(producer_id)
            .fetch_all(pool)
            .await
    }

    /// Update a farm. Only non-`None` fields in `input` are applied.
    ///
    /// The merged row is still subject to `ck_farms_area_sum`, so a patch that
    /// makes the stored areas inconsistent fails with a check violation.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFarm,
    ) -> Result<Option<Farm>, sqlx::Error> {
        let query = format!(
            "UPDATE farms SET
                producer_id = COALESCE($2, producer_id),
                name = COALESCE($3, name),
                city = COALESCE($4, city),
                state = COALESCE($5, state),
                total_area = COALESCE($6, total_area),
                arable_area = COALESCE($7, arable_area),
                vegetation_area = COALESCE($8, vegetation_area)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Farm>(&query)
            .bind(id)
            .bind(input.producer_id)
            .bind(&input.name)
            .bind(&input.city)
            .bind(&input.state)
            .bind(input.total_area)
            .bind(input.arable_area)
            .bind(input.vegetation_area)
            .fetch_optional(pool)
            .await
    }

    /// Delete a farm and, by cascade, its harvests. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM farms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
