//! Era and category lookup rows.

use archmap_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `eras` or `categories` lookup table. Both share a shape.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Taxon {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}
