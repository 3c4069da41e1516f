//! Domain types shared by the archaeological map server and client.
//!
//! Nothing in this crate performs I/O. The repository, HTTP and client
//! layers all build on the types and pure functions defined here.

pub mod enrichment;
pub mod error;
pub mod geo;
pub mod search;
pub mod taxonomy;
pub mod tour;
pub mod types;
