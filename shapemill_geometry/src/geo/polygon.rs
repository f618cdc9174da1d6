use super::Coordinates;
use crate::simplify::RingSimplifier;
use anyhow::Result;
use serde_json::{Value as JsonValue, json};
use shapemill_core::GeoBBox;
use std::fmt::Debug;

/// A polygon: a minimum bounding rectangle plus one or more rings.
///
/// Rings are stored as a flat `points` buffer with a `parts` side-array of
/// start indices, which is both the cache-friendly layout and the shapefile
/// on-disk layout. The i-th ring spans `points[parts[i]..parts[i+1])`, with
/// the final ring extending to the end of `points`. The first ring is
/// conventionally the outer boundary, but the distinction is not enforced
/// and input order is preserved.
#[derive(Clone, PartialEq)]
pub struct Polygon {
	pub bbox: GeoBBox,
	pub parts: Vec<u32>,
	pub points: Vec<Coordinates>,
}

impl Polygon {
	pub fn new(bbox: GeoBBox, parts: Vec<u32>, points: Vec<Coordinates>) -> Polygon {
		Polygon { bbox, parts, points }
	}

	/// Builds a single-ring polygon, deriving the bounding box from the
	/// points.
	pub fn from_ring(points: Vec<Coordinates>) -> Polygon {
		let mut bbox = GeoBBox::new_empty();
		for point in &points {
			bbox.include_point(point.x(), point.y());
		}
		Polygon {
			bbox,
			parts: vec![0],
			points,
		}
	}

	pub fn point_count(&self) -> usize {
		self.points.len()
	}

	pub fn ring_count(&self) -> usize {
		self.ring_ranges().len()
	}

	/// Iterates the rings in input order as slices of the flat point buffer.
	pub fn rings(&self) -> impl Iterator<Item = &[Coordinates]> {
		self
			.ring_ranges()
			.into_iter()
			.map(move |(start, end)| &self.points[start..end])
	}

	/// Resolves `parts` into `(start, end)` index ranges. A start index that
	/// is out of bounds or not strictly increasing truncates the ring list:
	/// rings before it stay valid, it and everything after are dropped.
	fn ring_ranges(&self) -> Vec<(usize, usize)> {
		let total = self.points.len();
		let mut starts: Vec<usize> = Vec::with_capacity(self.parts.len());
		for &part in &self.parts {
			let start = part as usize;
			if start >= total {
				log::warn!("part start {start} is outside the point buffer (length {total}), dropping remaining parts");
				break;
			}
			if starts.last().is_some_and(|&last| start <= last) {
				log::warn!("part start {start} is not increasing, dropping remaining parts");
				break;
			}
			starts.push(start);
		}
		let count = starts.len();
		starts
			.iter()
			.enumerate()
			.map(|(i, &start)| (start, if i + 1 < count { starts[i + 1] } else { total }))
			.collect()
	}

	/// Replaces every ring with its simplified version, rebuilding `parts`
	/// from the cumulative output lengths. The ring partition is preserved:
	/// k rings in, k rings out. If any ring fails, the polygon is left
	/// untouched.
	pub fn simplify(&mut self, simplifier: &dyn RingSimplifier, percentage: f64) -> Result<()> {
		let ranges = self.ring_ranges();
		let mut points = Vec::with_capacity(self.points.len());
		let mut parts = Vec::with_capacity(ranges.len());
		for (start, end) in ranges {
			let simplified = simplifier.simplify_ring(&self.points[start..end], percentage)?;
			parts.push(points.len() as u32);
			points.extend(simplified);
		}
		self.points = points;
		self.parts = parts;
		Ok(())
	}

	/// Serializes to a GeoJSON geometry object with `"type": "Polygon"`.
	pub fn to_json(&self) -> JsonValue {
		let coordinates: Vec<JsonValue> = self
			.rings()
			.map(|ring| JsonValue::Array(ring.iter().map(Coordinates::to_json).collect()))
			.collect();
		json!({
			"type": "Polygon",
			"coordinates": coordinates,
		})
	}
}

impl Debug for Polygon {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.rings()).finish()
	}
}
