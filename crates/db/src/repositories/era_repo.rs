//! Repository for the `eras` lookup table.

use sqlx::PgPool;

use crate::models::taxonomy::Taxon;

/// Column list for `eras` queries.
const COLUMNS: &str = "id, name, created_at";

/// Read access to the fixed era taxonomy.
pub struct EraRepo;

impl EraRepo {
    /// List all eras in insertion (chronological) order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Taxon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM eras ORDER BY id");
        sqlx::query_as::<_, Taxon>(&query).fetch_all(pool).await
    }

    /// Exact-match lookup by name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Taxon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM eras WHERE name = $1");
        sqlx::query_as::<_, Taxon>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
