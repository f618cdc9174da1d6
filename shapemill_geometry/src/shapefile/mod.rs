//! Streaming reader for the ESRI shapefile main file (`.shp`).
//!
//! The format mixes byte orders: the file header starts with big-endian
//! words, switches to little-endian at byte 28, and every record pairs a
//! big-endian record header with a little-endian body. Only polygon records
//! (shape type 5) are parsed; records of any other shape type are skipped
//! without error. A stream that ends at a record-header boundary is a clean
//! end of file, a stream that ends anywhere else is a fatal parse error.

use crate::{Coordinates, GeoCollection, GeoFeature, Polygon, dbase, simplify::RingSimplifier};
use anyhow::{Context, Result};
use shapemill_core::{GeoBBox, io::ValueReader};
use std::io::Read;

/// Shape type codes of the ESRI specification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeType {
	Null = 0,
	Point = 1,
	Polyline = 3,
	Polygon = 5,
	MultiPoint = 8,
	PointZ = 11,
	PolylineZ = 13,
	PolygonZ = 15,
	MultiPointZ = 18,
	PointM = 21,
	PolylineM = 23,
	PolygonM = 25,
	MultiPointM = 28,
	MultiPatch = 31,
}

impl ShapeType {
	pub fn from_u32(value: u32) -> Option<ShapeType> {
		use ShapeType::*;
		Some(match value {
			0 => Null,
			1 => Point,
			3 => Polyline,
			5 => Polygon,
			8 => MultiPoint,
			11 => PointZ,
			13 => PolylineZ,
			15 => PolygonZ,
			18 => MultiPointZ,
			21 => PointM,
			23 => PolylineM,
			25 => PolygonM,
			28 => MultiPointM,
			31 => MultiPatch,
			_ => return None,
		})
	}
}

/// A min/max pair, used for the Z and M extents of the file header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
	pub min: f64,
	pub max: f64,
}

/// The fixed 100-byte file header.
///
/// The file code is stored but not validated; callers that care must check
/// it against `FILE_CODE` themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct FileHeader {
	pub file_code: u32,
	/// Total file length in 16-bit words, including this header.
	pub file_length: u32,
	pub version: u32,
	pub shape_type: u32,
	pub bbox: GeoBBox,
	pub z_range: ValueRange,
	pub m_range: ValueRange,
}

/// The magic number of a shapefile main file.
pub const FILE_CODE: u32 = 0x0000_270A;

impl FileHeader {
	fn read<R: Read>(reader: &mut ValueReader<R>) -> Result<FileHeader> {
		let file_code = reader.read_u32_be()?;
		for _ in 0..5 {
			reader.read_u32_be()?;
		}
		let file_length = reader.read_u32_be()?;

		// The header switches to little-endian here.
		let version = reader.read_u32_le()?;
		let shape_type = reader.read_u32_le()?;
		let bbox = read_bbox(reader)?;
		let z_range = ValueRange {
			min: reader.read_f64_le()?,
			max: reader.read_f64_le()?,
		};
		let m_range = ValueRange {
			min: reader.read_f64_le()?,
			max: reader.read_f64_le()?,
		};

		Ok(FileHeader {
			file_code,
			file_length,
			version,
			shape_type,
			bbox,
			z_range,
			m_range,
		})
	}
}

fn read_bbox<R: Read>(reader: &mut ValueReader<R>) -> Result<GeoBBox> {
	Ok(GeoBBox::new(
		reader.read_f64_le()?,
		reader.read_f64_le()?,
		reader.read_f64_le()?,
		reader.read_f64_le()?,
	))
}

fn read_polygon<R: Read>(reader: &mut ValueReader<R>) -> Result<Polygon> {
	let bbox = read_bbox(reader)?;
	let part_count = reader.read_u32_le()? as usize;
	let point_count = reader.read_u32_le()? as usize;

	let mut parts = Vec::with_capacity(part_count);
	for _ in 0..part_count {
		parts.push(reader.read_u32_le()?);
	}

	let mut points = Vec::with_capacity(point_count);
	for _ in 0..point_count {
		let x = reader.read_f64_le()?;
		let y = reader.read_f64_le()?;
		points.push(Coordinates::new(x, y));
	}

	Ok(Polygon::new(bbox, parts, points))
}

/// A parsed shapefile: the file header plus one feature per polygon record,
/// in record order. Features start with empty attribute maps; use
/// [`Shapefile::load_attributes`] to join a dBASE sidecar onto them.
#[derive(Debug)]
pub struct Shapefile {
	pub header: FileHeader,
	pub features: Vec<GeoFeature>,
}

impl Shapefile {
	/// Stream-decodes a shapefile main file. The stream is read strictly
	/// sequentially; no seeking is required.
	pub fn read<R: Read>(reader: R) -> Result<Shapefile> {
		let mut reader = ValueReader::new(reader);

		let header = FileHeader::read(&mut reader).context("failed to parse shapefile header")?;
		let mut features = Vec::new();

		while !reader.at_eof()? {
			let record_number = reader.read_u32_be()?;
			let content_length = reader.read_u32_be()?;
			let shape_type = reader.read_u32_le()?;

			if ShapeType::from_u32(shape_type) == Some(ShapeType::Polygon) {
				let polygon = read_polygon(&mut reader)
					.with_context(|| format!("failed to parse polygon record {record_number}"))?;
				features.push(GeoFeature::new(polygon));
			} else {
				// Content length is in 16-bit words and includes the shape
				// type word we already consumed.
				log::debug!("skipping record {record_number} with shape type {shape_type}");
				reader.skip((content_length as u64 * 2).saturating_sub(4))?;
			}
		}

		Ok(Shapefile { header, features })
	}

	/// Joins a dBASE attribute table onto the features by record index.
	pub fn load_attributes<R: Read>(&mut self, reader: R) -> Result<()> {
		dbase::load_attributes(&mut self.features, reader)
	}

	/// Simplifies every polygon in place.
	pub fn simplify(&mut self, simplifier: &dyn RingSimplifier, percentage: f64) -> Result<()> {
		for feature in &mut self.features {
			feature.polygon.simplify(simplifier, percentage)?;
		}
		Ok(())
	}

	pub fn into_collection(self) -> GeoCollection {
		GeoCollection::from(self.features)
	}
}
