//! Planar geometry helpers shared by the encoders.

mod albers;

pub use albers::AlbersProjection;

use crate::Coordinates;

/// Signed area of a ring via the shoelace formula. Positive for clockwise
/// rings in a y-up coordinate system.
pub fn ring_area(ring: &[Coordinates]) -> f64 {
	let Some(mut previous) = ring.last() else {
		return 0.0;
	};
	let mut sum = 0f64;
	for point in ring {
		sum += (previous.x() - point.x()) * (point.y() + previous.y());
		previous = point;
	}
	sum / 2.0
}

/// Area-weighted centroid of a ring. Degenerate rings (zero area) fall
/// back to the arithmetic mean of the points; an empty ring yields the
/// origin.
pub fn ring_centroid(ring: &[Coordinates]) -> Coordinates {
	if ring.is_empty() {
		return Coordinates::new(0.0, 0.0);
	}

	let mut area = 0f64;
	let mut cx = 0f64;
	let mut cy = 0f64;
	let mut previous = ring[ring.len() - 1];
	for &point in ring {
		let cross = previous.x() * point.y() - point.x() * previous.y();
		area += cross;
		cx += (previous.x() + point.x()) * cross;
		cy += (previous.y() + point.y()) * cross;
		previous = point;
	}

	if area == 0.0 {
		let count = ring.len() as f64;
		let x = ring.iter().map(Coordinates::x).sum::<f64>() / count;
		let y = ring.iter().map(Coordinates::y).sum::<f64>() / count;
		return Coordinates::new(x, y);
	}

	Coordinates::new(cx / (3.0 * area), cy / (3.0 * area))
}
