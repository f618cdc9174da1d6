use super::{GeoProperties, Polygon};
use serde_json::{Value as JsonValue, json};
use std::fmt::Debug;

/// A single feature: one polygon plus its joined attributes.
///
/// Features are created by the shapefile reader with empty properties; the
/// dBASE joiner fills the properties in by record index.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
	pub polygon: Polygon,
	pub properties: GeoProperties,
}

impl GeoFeature {
	/// Creates a new `GeoFeature` with the given polygon and empty properties.
	pub fn new(polygon: Polygon) -> GeoFeature {
		GeoFeature {
			polygon,
			properties: GeoProperties::new(),
		}
	}

	pub fn set_property(&mut self, key: String, value: String) {
		self.properties.insert(key, value);
	}

	/// Serializes the feature into a GeoJSON `Feature` object.
	pub fn to_json(&self) -> JsonValue {
		json!({
			"type": "Feature",
			"properties": self.properties.to_json(),
			"geometry": self.polygon.to_json(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Coordinates;

	fn triangle() -> Polygon {
		Polygon::from_ring(vec![
			Coordinates::new(0.0, 0.0),
			Coordinates::new(4.0, 0.0),
			Coordinates::new(2.0, 3.0),
			Coordinates::new(0.0, 0.0),
		])
	}

	#[test]
	fn new_sets_empty_properties() {
		let feature = GeoFeature::new(triangle());
		assert!(feature.properties.is_empty());
		assert_eq!(feature.polygon.ring_count(), 1);
	}

	#[test]
	fn set_property_inserts() {
		let mut feature = GeoFeature::new(triangle());
		feature.set_property("NAME".to_string(), "Bollinger".to_string());
		assert_eq!(feature.properties.get("NAME"), Some("Bollinger"));
	}

	#[test]
	fn to_json_contains_type_properties_and_geometry() {
		let mut feature = GeoFeature::new(triangle());
		feature.set_property("NAME".to_string(), "Bollinger".to_string());
		assert_eq!(
			feature.to_json().to_string(),
			concat!(
				r#"{"geometry":{"coordinates":[[[0.0,0.0],[4.0,0.0],[2.0,3.0],[0.0,0.0]]],"type":"Polygon"},"#,
				r#""properties":{"NAME":"Bollinger"},"type":"Feature"}"#
			)
		);
	}
}
