//! Repository for the `panoramas` table.

use archmap_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::panorama::{CreatePanorama, Panorama};

/// Column list for `panoramas` queries.
const COLUMNS: &str = "\
    id, name, initial_panorama, location_id, scenes, created_at, updated_at";

/// Same columns qualified with the `p` alias, for joins.
pub(crate) const PANORAMA_QUALIFIED_COLUMNS: &str = "\
    p.id, p.name, p.initial_panorama, p.location_id, p.scenes, p.created_at, p.updated_at";

/// Provides read and seed-time write operations for panorama tours.
pub struct PanoramaRepo;

impl PanoramaRepo {
    /// Insert a new tour, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePanorama) -> Result<Panorama, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let panorama = Self::insert_inner(&mut tx, input).await?;
        tx.commit().await?;
        Ok(panorama)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Panorama>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM panoramas WHERE id = $1");
        sqlx::query_as::<_, Panorama>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Link a tour back to its location. Returns `false` if the tour is missing.
    pub async fn set_location(
        pool: &PgPool,
        id: DbId,
        location_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let updated = Self::set_location_inner(&mut tx, id, location_id).await?;
        tx.commit().await?;
        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    pub(crate) async fn insert_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreatePanorama,
    ) -> Result<Panorama, sqlx::Error> {
        let query = format!(
            "INSERT INTO panoramas (name, initial_panorama, scenes) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Panorama>(&query)
            .bind(&input.name)
            .bind(&input.initial_panorama)
            .bind(Json(&input.scenes))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_location_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        location_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE panoramas SET location_id = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(location_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub(crate) async fn delete_all_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM panoramas")
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
