//! Density derivation from boundary geometry.
//!
//! Joins an aggregated census table with geographic units and adds a
//! `<col>_density` column next to each eligible value column.

pub mod geometry;
pub mod joiner;

pub use geometry::{load_geojson, parse_feature_collection, planar_area, GeoUnit, GeometryTable};
pub use joiner::{join_densities, DensitySelection, GeoFrame};
