//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod era_repo;
pub mod location_repo;
pub mod panorama_repo;

pub use category_repo::CategoryRepo;
pub use era_repo::EraRepo;
pub use location_repo::LocationRepo;
pub use panorama_repo::PanoramaRepo;
