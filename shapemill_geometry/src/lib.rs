//! Geometry model and the ingest-and-simplify pipeline.
//!
//! The pipeline has three stages: [`shapefile`] stream-decodes polygon
//! records from an ESRI shapefile main file, [`dbase`] joins fixed-width
//! dBASE attributes onto the parsed features by record index, and
//! [`simplify`] reduces each ring to an approximate target fraction of its
//! points. The [`geojson`] module serializes the resulting collection.

mod geo;
pub mod dbase;
pub mod geojson;
pub mod math;
pub mod shapefile;
pub mod simplify;

pub use geo::*;
