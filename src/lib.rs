//!
//! Coordinate transformation library
//!
//! Based on the Proj4/Proj architecture, re-shaped around an explicit
//! [`Definition`](crate::definition::Definition) stage: a CRS definition is
//! first parsed from its source syntax (PROJ string, WKT1/WKT2, PROJJSON,
//! or an EPSG code) into that common representation, then derived into the
//! [`Proj`] object that actually performs transformations.
//!
//! References:
//! * <http://docs.opengeospatial.org/as/18-005r5/18-005r5.html>
//! * <https://proj.org/development/reference/cpp/cpp_general.html>
//!
//! The goal here is not to replace PROJ, but to provide a dependency-light,
//! pure-Rust implementation of CRS parsing and point transformation
//! suitable for embedding (including in WASM) without shelling out to, or
//! linking against, the C library.
//!

mod datum;
mod datums;
mod ellipsoids;
mod ellps;
mod geocent;
mod log;
mod math;
mod parameters;
mod parse;
mod primemeridians;
mod projjson;
mod projstring;
mod units;
mod wkt;

pub mod adaptors;
pub mod definition;
pub mod epsg;
pub mod errors;
pub mod nadgrids;
pub mod proj;
pub mod projections;
pub mod registry;
pub mod serialize;
pub mod transform;

// Reexport
pub use proj::Proj;

#[cfg(test)]
mod tests;
