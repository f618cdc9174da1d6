//! The compact binary region format (`.smr`).
//!
//! A length-prefixed little-endian encoding, one record per feature:
//!
//! ```text
//! file   := "SMRG" version:u8 count:u32 record*
//! record := str(id) str(name) str(state)
//!           interior_x:f32 interior_y:f32
//!           ring_count:u32 ring*
//! ring   := point_count:u32 (x:f32 y:f32)*
//! str    := len:u16 utf8-bytes
//! ```
//!
//! `id` is the feature's `GEOID` attribute, `name` is `NAMELSAD` (falling
//! back to `NAME`), and `state` is the FIPS expansion of `STATEFP`; each is
//! empty when the source attribute is absent. The interior point is the
//! centroid of the first ring. Coordinates are narrowed to f32, which is
//! plenty for display purposes.

use crate::fips;
use anyhow::{Result, ensure};
use shapemill_core::io::{ValueReader, ValueWriter};
use shapemill_geometry::{GeoCollection, GeoFeature, math};
use std::io::{Read, Write};

pub const MAGIC: &[u8; 4] = b"SMRG";
pub const VERSION: u8 = 1;

/// One decoded record of a region file.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
	pub id: String,
	pub name: String,
	pub state: String,
	pub interior: (f32, f32),
	pub rings: Vec<Vec<(f32, f32)>>,
}

/// Encodes the collection into a region file.
pub fn write_regions<W: Write>(writer: W, collection: &GeoCollection) -> Result<()> {
	let mut writer = ValueWriter::new(writer);
	writer.write_slice(MAGIC)?;
	writer.write_u8(VERSION)?;
	writer.write_u32_le(collection.len() as u32)?;
	for feature in collection.iter() {
		write_feature(&mut writer, feature)?;
	}
	writer.flush()
}

fn write_feature<W: Write>(writer: &mut ValueWriter<W>, feature: &GeoFeature) -> Result<()> {
	let properties = &feature.properties;
	let id = properties.get("GEOID").unwrap_or_default();
	let name = properties
		.get("NAMELSAD")
		.or_else(|| properties.get("NAME"))
		.unwrap_or_default();
	let state = properties
		.get("STATEFP")
		.and_then(fips::state_name)
		.unwrap_or_default();

	writer.write_string_u16(id)?;
	writer.write_string_u16(name)?;
	writer.write_string_u16(state)?;

	let interior = feature
		.polygon
		.rings()
		.next()
		.map(math::ring_centroid)
		.unwrap_or_else(|| shapemill_geometry::Coordinates::new(0.0, 0.0));
	writer.write_f32_le(interior.x() as f32)?;
	writer.write_f32_le(interior.y() as f32)?;

	writer.write_u32_le(feature.polygon.ring_count() as u32)?;
	for ring in feature.polygon.rings() {
		writer.write_u32_le(ring.len() as u32)?;
		for point in ring {
			writer.write_f32_le(point.x() as f32)?;
			writer.write_f32_le(point.y() as f32)?;
		}
	}
	Ok(())
}

/// Decodes a region file.
pub fn read_regions<R: Read>(reader: R) -> Result<Vec<Region>> {
	let mut reader = ValueReader::new(reader);

	let magic = reader.read_bytes(4)?;
	ensure!(magic == MAGIC, "not a region file: bad magic number");
	let version = reader.read_u8()?;
	ensure!(version == VERSION, "unsupported region file version {version}");

	let count = reader.read_u32_le()? as usize;
	let mut regions = Vec::with_capacity(count);
	for _ in 0..count {
		let id = read_string(&mut reader)?;
		let name = read_string(&mut reader)?;
		let state = read_string(&mut reader)?;
		let interior = (reader.read_f32_le()?, reader.read_f32_le()?);

		let ring_count = reader.read_u32_le()? as usize;
		let mut rings = Vec::with_capacity(ring_count);
		for _ in 0..ring_count {
			let point_count = reader.read_u32_le()? as usize;
			let mut ring = Vec::with_capacity(point_count);
			for _ in 0..point_count {
				ring.push((reader.read_f32_le()?, reader.read_f32_le()?));
			}
			rings.push(ring);
		}

		regions.push(Region {
			id,
			name,
			state,
			interior,
			rings,
		});
	}
	Ok(regions)
}

fn read_string<R: Read>(reader: &mut ValueReader<R>) -> Result<String> {
	let length = reader.read_u16_le()? as usize;
	reader.read_string(length)
}

#[cfg(test)]
mod tests {
	use super::*;
	use shapemill_geometry::{Coordinates, Polygon};

	fn county_feature() -> GeoFeature {
		let mut feature = GeoFeature::new(Polygon::from_ring(vec![
			Coordinates::new(0.0, 0.0),
			Coordinates::new(4.0, 0.0),
			Coordinates::new(4.0, 4.0),
			Coordinates::new(0.0, 4.0),
			Coordinates::new(0.0, 0.0),
		]));
		feature.set_property("GEOID".to_string(), "29001".to_string());
		feature.set_property("NAMELSAD".to_string(), "Adair County".to_string());
		feature.set_property("STATEFP".to_string(), "29".to_string());
		feature
	}

	#[test]
	fn round_trip() -> Result<()> {
		let collection = GeoCollection::from(vec![county_feature()]);
		let mut buffer = Vec::new();
		write_regions(&mut buffer, &collection)?;

		let regions = read_regions(buffer.as_slice())?;
		assert_eq!(regions.len(), 1);
		let region = &regions[0];
		assert_eq!(region.id, "29001");
		assert_eq!(region.name, "Adair County");
		assert_eq!(region.state, "MO, MISSOURI");
		assert_eq!(region.interior, (2.0, 2.0));
		assert_eq!(region.rings.len(), 1);
		assert_eq!(region.rings[0].len(), 5);
		assert_eq!(region.rings[0][1], (4.0, 0.0));
		Ok(())
	}

	#[test]
	fn missing_attributes_encode_as_empty_strings() -> Result<()> {
		let feature = GeoFeature::new(county_feature().polygon);
		let collection = GeoCollection::from(vec![feature]);
		let mut buffer = Vec::new();
		write_regions(&mut buffer, &collection)?;

		let regions = read_regions(buffer.as_slice())?;
		assert_eq!(regions[0].id, "");
		assert_eq!(regions[0].name, "");
		assert_eq!(regions[0].state, "");
		Ok(())
	}

	#[test]
	fn name_falls_back_to_the_name_attribute() -> Result<()> {
		let mut feature = GeoFeature::new(county_feature().polygon);
		feature.set_property("NAME".to_string(), "Adair".to_string());
		let mut buffer = Vec::new();
		write_regions(&mut buffer, &GeoCollection::from(vec![feature]))?;
		assert_eq!(read_regions(buffer.as_slice())?[0].name, "Adair");
		Ok(())
	}

	#[test]
	fn bad_magic_is_rejected() {
		assert!(read_regions(b"NOPE\x01\x00\x00\x00\x00".as_slice()).is_err());
	}

	#[test]
	fn unsupported_version_is_rejected() {
		assert!(read_regions(b"SMRG\x02\x00\x00\x00\x00".as_slice()).is_err());
	}
}
