//! Repository for the `locations` table.
//!
//! List and detail queries join the taxonomy tables so callers receive era
//! and category names directly. Era/category filters are given by name and
//! resolved to lookup ids first; a name that resolves to nothing does not
//! constrain the query.

use archmap_core::types::DbId;
use sqlx::PgPool;

use crate::models::location::{CreateLocation, Location, LocationDetail, LocationFilter};
use crate::models::panorama::Panorama;
use crate::repositories::panorama_repo::PANORAMA_QUALIFIED_COLUMNS;
use crate::repositories::{CategoryRepo, EraRepo};

/// Column list for plain `locations` queries.
const COLUMNS: &str = "\
    id, name, address, description, historical_context, latitude, longitude, \
    icon, image, era_id, category_id, panorama_id, created_at, updated_at";

/// Joined column list for [`LocationDetail`] queries.
const DETAIL_SELECT: &str = "\
    SELECT l.id, l.name, l.address, l.description, l.historical_context, \
           l.latitude, l.longitude, l.icon, l.image, \
           e.name AS era_name, c.name AS category_name, l.panorama_id \
    FROM locations l \
    JOIN eras e ON e.id = l.era_id \
    JOIN categories c ON c.id = l.category_id";

/// Provides query and seed-time insert operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// List locations matching the optional era/category names.
    pub async fn list(
        pool: &PgPool,
        filter: &LocationFilter,
    ) -> Result<Vec<LocationDetail>, sqlx::Error> {
        let era_id = match filter.era_name() {
            Some(name) => EraRepo::find_by_name(pool, name).await?.map(|e| e.id),
            None => None,
        };
        let category_id = match filter.category_name() {
            Some(name) => CategoryRepo::find_by_name(pool, name)
                .await?
                .map(|c| c.id),
            None => None,
        };

        if era_id.is_none() && filter.era_name().is_some() {
            tracing::debug!(era = ?filter.era, "Unknown era name, ignoring filter");
        }
        if category_id.is_none() && filter.category_name().is_some() {
            tracing::debug!(category = ?filter.category, "Unknown category name, ignoring filter");
        }

        Self::list_by_ids(pool, era_id, category_id).await
    }

    /// List locations constrained by resolved taxonomy ids (`None` = any).
    pub async fn list_by_ids(
        pool: &PgPool,
        era_id: Option<DbId>,
        category_id: Option<DbId>,
    ) -> Result<Vec<LocationDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT} \
             WHERE ($1::BIGINT IS NULL OR l.era_id = $1) \
               AND ($2::BIGINT IS NULL OR l.category_id = $2) \
             ORDER BY l.id"
        );
        sqlx::query_as::<_, LocationDetail>(&query)
            .bind(era_id)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Find a location with its taxonomy names.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LocationDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE l.id = $1");
        sqlx::query_as::<_, LocationDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the panorama tour attached to a location.
    ///
    /// Returns `None` both when the location does not exist and when it has
    /// no tour.
    pub async fn find_panorama(
        pool: &PgPool,
        location_id: DbId,
    ) -> Result<Option<Panorama>, sqlx::Error> {
        let query = format!(
            "SELECT {PANORAMA_QUALIFIED_COLUMNS} FROM locations l \
             JOIN panoramas p ON p.id = l.panorama_id \
             WHERE l.id = $1"
        );
        sqlx::query_as::<_, Panorama>(&query)
            .bind(location_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new location, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let location = Self::insert_inner(&mut tx, input).await?;
        tx.commit().await?;
        Ok(location)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert within an existing transaction (shared with the seed import).
    pub(crate) async fn insert_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateLocation,
    ) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations \
                (name, address, description, historical_context, latitude, longitude, \
                 icon, image, era_id, category_id, panorama_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.description)
            .bind(&input.historical_context)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.icon)
            .bind(&input.image)
            .bind(input.era_id)
            .bind(input.category_id)
            .bind(input.panorama_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Remove every location (seed import starts from an empty table).
    pub(crate) async fn delete_all_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations")
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
