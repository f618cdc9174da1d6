//! GeoJSON serialization of a feature collection.

use crate::GeoCollection;
use anyhow::Result;
use std::io::Write;

/// Writes the collection as a GeoJSON `FeatureCollection`, followed by a
/// trailing newline.
pub fn write_geojson<W: Write>(mut writer: W, collection: &GeoCollection) -> Result<()> {
	serde_json::to_writer(&mut writer, &collection.to_json())?;
	writer.write_all(b"\n")?;
	Ok(())
}

/// Returns the collection as a GeoJSON string.
pub fn stringify(collection: &GeoCollection) -> String {
	collection.to_json().to_string()
}
