//! Library surface of the shapemill toolbox: the compact binary region
//! format and the US state FIPS lookup. The command-line interface lives in
//! the binary target.

pub mod fips;
pub mod regions;
