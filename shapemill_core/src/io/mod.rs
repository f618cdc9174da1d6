//! Binary stream I/O.
//!
//! Shapefiles interleave big-endian and little-endian fields within one
//! stream, so the reader exposes explicit-endian methods instead of being
//! parameterized over a single byte order. Both reader and writer track
//! their byte position so parse errors can name the failing offset.

mod value_reader;
mod value_writer;

pub use value_reader::ValueReader;
pub use value_writer::ValueWriter;
