use serde_json::{Value as JsonValue, json};
use std::fmt::Debug;

/// A simple 2D coordinate pair `(x, y)`.
///
/// The pipeline treats coordinates as planar; whether they are lon/lat or
/// projected is up to the caller. Equality is bit-exact, which is what ring
/// closure detection relies on.
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates([f64; 2]);

impl Coordinates {
	/// Constructs a new `Coordinates` instance with the given `x` and `y` values.
	pub fn new(x: f64, y: f64) -> Self {
		Self([x, y])
	}

	/// Returns the `x` component of the coordinate.
	pub fn x(&self) -> f64 {
		self.0[0]
	}

	/// Returns the `y` component of the coordinate.
	pub fn y(&self) -> f64 {
		self.0[1]
	}

	/// Returns the coordinates as a JSON array `[x, y]`.
	pub fn to_json(&self) -> JsonValue {
		json!([self.0[0], self.0[1]])
	}
}

impl From<[f64; 2]> for Coordinates {
	fn from(value: [f64; 2]) -> Self {
		Coordinates(value)
	}
}

impl From<(f64, f64)> for Coordinates {
	fn from(value: (f64, f64)) -> Self {
		Coordinates([value.0, value.1])
	}
}

impl From<Coordinates> for [f64; 2] {
	fn from(value: Coordinates) -> Self {
		value.0
	}
}

/// The coordinates are printed in the format `[x, y]`.
impl Debug for Coordinates {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_and_accessors() {
		let c = Coordinates::new(-90.19, 38.62);
		assert_eq!(c.x(), -90.19);
		assert_eq!(c.y(), 38.62);
	}

	#[test]
	fn debug_formats_like_array() {
		let c = Coordinates::new(1.0, 2.0);
		assert_eq!(format!("{c:?}"), "[1.0, 2.0]");
	}

	#[test]
	fn from_array_and_tuple() {
		assert_eq!(Coordinates::from([7.0, 8.0]), Coordinates::new(7.0, 8.0));
		assert_eq!(Coordinates::from((3.0, 4.0)), Coordinates::new(3.0, 4.0));
	}

	#[test]
	fn into_array() {
		let arr: [f64; 2] = Coordinates::new(10.25, -20.5).into();
		assert_eq!(arr, [10.25, -20.5]);
	}

	#[test]
	fn equality_is_bit_exact() {
		assert_eq!(Coordinates::new(0.1 + 0.2, 0.0), Coordinates::new(0.1 + 0.2, 0.0));
		assert_ne!(Coordinates::new(0.3, 0.0), Coordinates::new(0.1 + 0.2, 0.0));
	}

	#[test]
	fn to_json() {
		let c = Coordinates::new(1.5, -2.5);
		assert_eq!(c.to_json().to_string(), "[1.5,-2.5]");
	}
}
