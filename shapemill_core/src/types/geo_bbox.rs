use std::fmt::Debug;

/// A planar bounding box, represented by four `f64` values:
/// `[min_x, min_y, max_x, max_y]`.
///
/// Coordinate semantics (lon/lat vs projected) are up to the caller; no
/// range checks are applied.
#[derive(Clone, Copy, PartialEq)]
pub struct GeoBBox(pub f64, pub f64, pub f64, pub f64);

impl GeoBBox {
	/// Creates a new `GeoBBox` from `[min_x, min_y, max_x, max_y]`.
	pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> GeoBBox {
		GeoBBox(min_x, min_y, max_x, max_y)
	}

	/// An inverted box that any point or box will extend, for folding over
	/// geometry.
	pub fn new_empty() -> GeoBBox {
		GeoBBox(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY)
	}

	/// Returns the bounding box as a `[f64; 4]` in the form:
	/// `[min_x, min_y, max_x, max_y]`.
	pub fn as_array(&self) -> [f64; 4] {
		[self.0, self.1, self.2, self.3]
	}

	/// Expands the current bounding box (in place) so that it includes the
	/// area covered by `other`.
	pub fn extend(&mut self, other: &GeoBBox) {
		self.0 = self.0.min(other.0);
		self.1 = self.1.min(other.1);
		self.2 = self.2.max(other.2);
		self.3 = self.3.max(other.3);
	}

	/// Expands the current bounding box (in place) so that it contains the
	/// point `(x, y)`.
	pub fn include_point(&mut self, x: f64, y: f64) {
		self.0 = self.0.min(x);
		self.1 = self.1.min(y);
		self.2 = self.2.max(x);
		self.3 = self.3.max(y);
	}
}

impl Debug for GeoBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{}, {}, {}, {}]", self.0, self.1, self.2, self.3)
	}
}
