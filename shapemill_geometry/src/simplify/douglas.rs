use super::{
	MIN_POINTS, RingSimplifier, check_min_points, ring_from_flat, ring_from_pairs, ring_to_flat, ring_to_pairs,
	target_len,
};
use crate::Coordinates;
use anyhow::Result;

/// Rank-based Douglas-Peucker.
///
/// Instead of running the classical algorithm at a fixed epsilon, one
/// recursive descent assigns every point a threshold rank: the smallest
/// epsilon that would still include it. Selecting by percentage is then a
/// cutoff in the sorted rank order, and every simplification level is
/// available from the same traversal.
///
/// Two constraints keep the ranks usable as a slider:
/// - a child segment's rank is capped at its parent's, so points disappear
///   hierarchically as the cutoff rises;
/// - on a closed ring the top-level split point keeps the larger child
///   rank, so a nearly-degenerate ring cannot collapse through a single
///   early-selected point.
pub struct DouglasPeucker {
	/// Floor for the output length. Rings at or below this length are
	/// returned unchanged.
	pub min_points: usize,
}

impl Default for DouglasPeucker {
	fn default() -> Self {
		DouglasPeucker { min_points: MIN_POINTS }
	}
}

impl DouglasPeucker {
	pub fn new() -> DouglasPeucker {
		DouglasPeucker::default()
	}

	/// Simplifies a flat `[x0, y0, x1, y1, ...]` coordinate slice.
	pub fn simplify_flat(&self, coordinates: &[f64], percentage: f64) -> Result<Vec<f64>> {
		let ring = ring_from_flat(coordinates)?;
		Ok(ring_to_flat(&self.simplify_ring(&ring, percentage)?))
	}

	/// Simplifies a slice of `[x, y]` pairs.
	pub fn simplify_points(&self, points: &[[f64; 2]], percentage: f64) -> Result<Vec<[f64; 2]>> {
		let ring = ring_from_pairs(points);
		Ok(ring_to_pairs(self.simplify_ring(&ring, percentage)?))
	}

	/// Computes the threshold rank of every point. Endpoints are pinned to
	/// infinity so they survive any cutoff.
	fn thresholds(ring: &[Coordinates]) -> Vec<f64> {
		let count = ring.len();
		let mut thresholds = vec![0.0; count];
		thresholds[0] = f64::INFINITY;
		thresholds[count - 1] = f64::INFINITY;
		if count > 2 {
			process_segment(ring, &mut thresholds, 0, count - 1, 1, f64::INFINITY);
		}
		thresholds
	}
}

impl RingSimplifier for DouglasPeucker {
	fn simplify_ring(&self, ring: &[Coordinates], percentage: f64) -> Result<Vec<Coordinates>> {
		check_min_points(self.min_points)?;

		let count = ring.len();
		let target = target_len(count, percentage, self.min_points);
		if count <= self.min_points || target >= count {
			return Ok(ring.to_vec());
		}

		let thresholds = DouglasPeucker::thresholds(ring);

		// The target-th largest rank is the cutoff; every point ranked at or
		// above it is kept, in input order.
		let mut sorted = thresholds.clone();
		sorted.sort_unstable_by(|a, b| b.total_cmp(a));
		let cutoff = sorted[target - 1];

		Ok(
			ring
				.iter()
				.zip(&thresholds)
				.filter(|&(_, &threshold)| threshold >= cutoff)
				.map(|(&point, _)| point)
				.collect(),
		)
	}
}

/// Recursively finds the most distant point of `(start, end)`, records its
/// rank and descends into both halves. Returns the capped maximum squared
/// distance of the segment.
fn process_segment(
	ring: &[Coordinates],
	thresholds: &mut [f64],
	start: usize,
	end: usize,
	depth: usize,
	parent_max_sq: f64,
) -> f64 {
	let a = ring[start];
	let c = ring[end];

	let mut max_sq = 0.0;
	let mut max_idx = start;
	for i in start + 1..end {
		let dist_sq = sq_seg_dist(ring[i], a, c);
		if dist_sq >= max_sq {
			max_sq = dist_sq;
			max_idx = i;
		}
	}

	// Parent-threshold cap: a child's rank never exceeds its parent's.
	if parent_max_sq < max_sq {
		max_sq = parent_max_sq;
	}

	let mut left = 0.0;
	let mut right = 0.0;
	if max_idx - start > 1 {
		left = process_segment(ring, thresholds, start, max_idx, depth + 1, max_sq);
	}
	if end - max_idx > 1 {
		right = process_segment(ring, thresholds, max_idx, end, depth + 1, max_sq);
	}

	// Ring-closure guard: a closed ring splits against a zero-length chord,
	// so the split point inherits the larger child rank instead.
	if depth == 1 && a == c {
		max_sq = left.max(right);
	}

	thresholds[max_idx] = max_sq.sqrt();
	max_sq
}

/// Squared distance from `p` to the closed segment `(a, b)`: the projection
/// is clamped to the segment, and a zero-length segment degenerates to
/// point-to-point distance.
fn sq_seg_dist(p: Coordinates, a: Coordinates, b: Coordinates) -> f64 {
	let mut dx = a.x() - b.x();
	let mut dy = a.y() - b.y();

	if dx != 0.0 || dy != 0.0 {
		let t = ((p.x() - a.x()) * -dx + (p.y() - a.y()) * -dy) / (dx * dx + dy * dy);
		if t > 1.0 {
			dx = p.x() - b.x();
			dy = p.y() - b.y();
		} else if t > 0.0 {
			dx = p.x() - (a.x() - dx * t);
			dy = p.y() - (a.y() - dy * t);
		} else {
			dx = p.x() - a.x();
			dy = p.y() - a.y();
		}
	} else {
		dx = p.x() - a.x();
		dy = p.y() - a.y();
	}

	dx * dx + dy * dy
}
