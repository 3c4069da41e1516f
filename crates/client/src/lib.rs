//! Client-side controllers for the archaeological map.
//!
//! Everything here is UI-toolkit agnostic: controllers own plain state,
//! mutate it through `&mut self`, and talk to the server through the
//! [`api::LocationsApi`] seam so a front-end (or a test) can drive them.

pub mod api;
pub mod coords;
pub mod error;
pub mod map_state;
pub mod map_view;
pub mod site;
pub mod tour;
