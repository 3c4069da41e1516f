//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (seed path only; the API is
//!   read-only)

pub mod location;
pub mod panorama;
pub mod taxonomy;
