use super::GeoFeature;
use crate::simplify::RingSimplifier;
use anyhow::{Context, Result};
use serde_json::{Value as JsonValue, json};

/// An ordered sequence of features.
///
/// Feature order matches shapefile record order and is significant: the
/// attribute join and every downstream consumer address features by
/// positional index.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoCollection {
	pub features: Vec<GeoFeature>,
}

impl GeoCollection {
	pub fn from(features: Vec<GeoFeature>) -> GeoCollection {
		GeoCollection { features }
	}

	pub fn len(&self) -> usize {
		self.features.len()
	}

	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, GeoFeature> {
		self.features.iter()
	}

	/// Simplifies every feature's polygon in place. Fails on the first
	/// feature whose geometry cannot be replaced; features before it keep
	/// their simplified geometry, the failing one keeps its original.
	pub fn simplify(&mut self, simplifier: &dyn RingSimplifier, percentage: f64) -> Result<()> {
		for (index, feature) in self.features.iter_mut().enumerate() {
			feature
				.polygon
				.simplify(simplifier, percentage)
				.with_context(|| format!("failed to simplify feature {index}"))?;
		}
		Ok(())
	}

	/// Serializes the collection into a GeoJSON `FeatureCollection` object.
	pub fn to_json(&self) -> JsonValue {
		json!({
			"type": "FeatureCollection",
			"features": self.features.iter().map(GeoFeature::to_json).collect::<Vec<_>>(),
		})
	}
}
