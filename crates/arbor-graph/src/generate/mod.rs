//! Graph generation.
//!
//! - [`ForestFire`] - grows a stored graph by attaching new vertices
//!   through a spreading burn from a random ambassador

mod forest_fire;

pub use forest_fire::{ForestFire, ForestFireConfig, ForestFireResult};
