//! Repository for the `categories` lookup table.

use sqlx::PgPool;

use crate::models::taxonomy::Taxon;

/// Column list for `categories` queries.
const COLUMNS: &str = "id, name, created_at";

/// Read access to the fixed category taxonomy.
pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Taxon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY id");
        sqlx::query_as::<_, Taxon>(&query).fetch_all(pool).await
    }

    /// Exact-match lookup by name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Taxon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE name = $1");
        sqlx::query_as::<_, Taxon>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
