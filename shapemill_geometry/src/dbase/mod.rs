//! Reader for the dBASE III/IV attribute table (`.dbf`) that accompanies a
//! shapefile, and the positional join onto parsed features.
//!
//! Only the layout needed for attribute joining is implemented: the 32-byte
//! table header, the field descriptor array and fixed-width records. Every
//! field value is surfaced as trimmed text; numeric fields keep their raw
//! digits. A missing header terminator byte is tolerated with a warning,
//! a short read inside a record is fatal.

use crate::GeoFeature;
use anyhow::{Context, Result, ensure};
use shapemill_core::io::ValueReader;
use std::io::Read;

/// The 32-byte table header. Reserved fields are consumed but not kept.
#[derive(Clone, Debug, PartialEq)]
pub struct DbfHeader {
	pub version: u8,
	/// Date of last update as (YY, MM, DD).
	pub last_update: (u8, u8, u8),
	pub record_count: u32,
	pub header_length: u16,
	pub record_length: u16,
}

impl DbfHeader {
	fn read<R: Read>(reader: &mut ValueReader<R>) -> Result<DbfHeader> {
		let version = reader.read_u8()?;
		let last_update = (reader.read_u8()?, reader.read_u8()?, reader.read_u8()?);
		let record_count = reader.read_u32_le()?;
		let header_length = reader.read_u16_le()?;
		let record_length = reader.read_u16_le()?;
		reader.skip(20)?;

		Ok(DbfHeader {
			version,
			last_update,
			record_count,
			header_length,
			record_length,
		})
	}

	/// Number of 32-byte field descriptors between header and terminator.
	fn field_count(&self) -> Result<usize> {
		ensure!(
			self.header_length >= 33,
			"dbase header length {} is impossible",
			self.header_length
		);
		Ok((self.header_length as usize - 32 - 1) / 32)
	}
}

/// One 32-byte field descriptor: an 11-byte null-padded name, a type tag
/// and the fixed width of the field's values.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
	pub name: String,
	pub field_type: u8,
	pub length: u8,
	pub decimal_count: u8,
}

impl FieldDescriptor {
	fn read<R: Read>(reader: &mut ValueReader<R>) -> Result<FieldDescriptor> {
		let raw_name = reader.read_bytes(11)?;
		let name = String::from_utf8_lossy(&raw_name)
			.trim_end_matches('\0')
			.trim()
			.to_string();
		let field_type = reader.read_u8()?;
		reader.skip(4)?;
		let length = reader.read_u8()?;
		let decimal_count = reader.read_u8()?;
		reader.skip(14)?;

		Ok(FieldDescriptor {
			name,
			field_type,
			length,
			decimal_count,
		})
	}

	/// Consumes one fixed-width value and trims trailing whitespace.
	fn read_value<R: Read>(&self, reader: &mut ValueReader<R>) -> Result<String> {
		let text = reader.read_string(self.length as usize)?;
		Ok(text.trim_end().to_string())
	}
}

/// A parsed table schema, positioned at the start of the record data.
#[derive(Debug)]
pub struct Dbase {
	pub header: DbfHeader,
	pub fields: Vec<FieldDescriptor>,
}

impl Dbase {
	pub fn read<R: Read>(reader: &mut ValueReader<R>) -> Result<Dbase> {
		let header = DbfHeader::read(reader).context("failed to parse dbase header")?;

		let count = header.field_count()?;
		let mut fields = Vec::with_capacity(count);
		for _ in 0..count {
			fields.push(FieldDescriptor::read(reader).context("failed to parse dbase field descriptor")?);
		}

		if reader.at_eof()? {
			log::warn!("dbase header terminator byte is missing");
		} else {
			reader.read_u8()?;
		}

		Ok(Dbase { header, fields })
	}
}

/// Joins the attribute table onto `features` by record index: the i-th
/// record's values are bound under their field names on the i-th feature.
/// Extra records are ignored; if the table has fewer records than there are
/// features, the remaining features keep empty attribute maps.
pub fn load_attributes<R: Read>(features: &mut [GeoFeature], reader: R) -> Result<()> {
	let mut reader = ValueReader::new(reader);
	let table = Dbase::read(&mut reader)?;

	for index in 0..table.header.record_count as usize {
		if index >= features.len() {
			break;
		}

		// Deletion flag; the value is ignored.
		reader
			.read_u8()
			.with_context(|| format!("failed to read dbase record {index}"))?;

		for field in &table.fields {
			let value = field
				.read_value(&mut reader)
				.with_context(|| format!("failed to read field {:?} of dbase record {index}", field.name))?;
			features[index].set_property(field.name.clone(), value);
		}
	}

	Ok(())
}
