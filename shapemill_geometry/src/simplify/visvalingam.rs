use super::{
	DEFAULT_WEIGHTING, MIN_POINTS, RingSimplifier, check_min_points, ring_from_flat, ring_from_pairs, ring_to_flat,
	ring_to_pairs, target_len,
};
use crate::Coordinates;
use anyhow::Result;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Weighted Visvalingam-Whyatt.
///
/// Repeatedly removes the interior vertex forming the triangle of smallest
/// effective area with its immediate neighbors until the target length is
/// reached. Vertices live in a doubly-linked array indexed by original
/// position, so removal is a splice with no reindexing; removal order comes
/// from a min-heap with lazy deletion. When a neighbor's area is recomputed
/// a fresh entry is pushed and the superseded one is recognized as stale
/// when popped, because its stored area no longer matches the node's.
pub struct Visvalingam {
	/// Floor for the output length. Rings at or below this length are
	/// returned unchanged.
	pub min_points: usize,
	/// Sharpness coefficient `k` for the effective-area metric. Zero means
	/// plain triangle area; a vertex whose neighbor rays fold back on each
	/// other (a needle) has its area damped towards `(1 - k) · area` and is
	/// removed earlier, while a nearly-straight vertex is boosted towards
	/// `(1 + k) · area`.
	pub weighting: f64,
}

impl Default for Visvalingam {
	fn default() -> Self {
		Visvalingam {
			min_points: MIN_POINTS,
			weighting: 0.0,
		}
	}
}

/// One vertex of the linked array.
#[derive(Clone)]
struct Node {
	prev: usize,
	next: usize,
	area: f64,
	removed: bool,
}

/// A heap entry is a snapshot of a node's area at push time; it goes stale
/// when the node is recomputed.
struct HeapEntry {
	area: f64,
	index: usize,
}

impl PartialEq for HeapEntry {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Reversed so `BinaryHeap` pops the smallest area first; equal areas pop
/// in index order.
impl Ord for HeapEntry {
	fn cmp(&self, other: &Self) -> Ordering {
		other
			.area
			.total_cmp(&self.area)
			.then_with(|| other.index.cmp(&self.index))
	}
}

impl Visvalingam {
	pub fn new() -> Visvalingam {
		Visvalingam::default()
	}

	/// A simplifier using the default sharpness coefficient.
	pub fn new_weighted() -> Visvalingam {
		Visvalingam {
			min_points: MIN_POINTS,
			weighting: DEFAULT_WEIGHTING,
		}
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

	/// Effective area of the triangle `(a, b, c)`, optionally modulated by
	/// the sharpness of the angle at `b`.
	fn metric(&self, a: Coordinates, b: Coordinates, c: Coordinates) -> f64 {
		let area = 0.5 * (a.x() * (b.y() - c.y()) + b.x() * (c.y() - a.y()) + c.x() * (a.y() - b.y())).abs();
		if self.weighting == 0.0 {
			return area;
		}
		(-cosine(a, b, c) * self.weighting + 1.0) * area
	}
}

/// Cosine of the angle at `b` between the rays to `a` and `c`; zero if
/// either ray has zero length.
fn cosine(a: Coordinates, b: Coordinates, c: Coordinates) -> f64 {
	let bax = a.x() - b.x();
	let bay = a.y() - b.y();
	let bcx = c.x() - b.x();
	let bcy = c.y() - b.y();

	let num = bax * bcx + bay * bcy;
	let den = (bax * bax + bay * bay).sqrt() * (bcx * bcx + bcy * bcy).sqrt();
	if den == 0.0 {
		return 0.0;
	}
	num / den
}

impl RingSimplifier for Visvalingam {
	fn simplify_ring(&self, ring: &[Coordinates], percentage: f64) -> Result<Vec<Coordinates>> {
		check_min_points(self.min_points)?;

		let count = ring.len();
		let target = target_len(count, percentage, self.min_points);
		if count <= self.min_points || target >= count {
			return Ok(ring.to_vec());
		}

		// Endpoints link to themselves and carry infinite area, so they are
		// never candidates for removal.
		let mut nodes: Vec<Node> = (0..count)
			.map(|i| Node {
				prev: i.saturating_sub(1),
				next: (i + 1).min(count - 1),
				area: if i == 0 || i == count - 1 {
					f64::INFINITY
				} else {
					self.metric(ring[i - 1], ring[i], ring[i + 1])
				},
				removed: false,
			})
			.collect();

		let mut heap = BinaryHeap::with_capacity(count);
		for (index, node) in nodes.iter().enumerate().take(count - 1).skip(1) {
			heap.push(HeapEntry { area: node.area, index });
		}

		let mut current = count;
		while current > target {
			let Some(entry) = heap.pop() else {
				break;
			};
			if nodes[entry.index].removed {
				continue;
			}
			// Stale entry: the node's area was recomputed after this
			// snapshot was pushed.
			if entry.area != nodes[entry.index].area {
				continue;
			}

			nodes[entry.index].removed = true;
			current -= 1;

			let prev = nodes[entry.index].prev;
			let next = nodes[entry.index].next;
			nodes[prev].next = next;
			nodes[next].prev = prev;

			// Recompute the surviving neighbors and push fresh entries; the
			// superseded entries stay in the heap and fail the stale check.
			if prev > 0 {
				let area = self.metric(ring[nodes[prev].prev], ring[prev], ring[nodes[prev].next]);
				nodes[prev].area = area;
				heap.push(HeapEntry { area, index: prev });
			}
			if next < count - 1 {
				let area = self.metric(ring[nodes[next].prev], ring[next], ring[nodes[next].next]);
				nodes[next].area = area;
				heap.push(HeapEntry { area, index: next });
			}
		}

		// Walk the surviving chain from the first endpoint to the last.
		let mut result = Vec::with_capacity(current);
		let mut index = 0;
		loop {
			result.push(ring[index]);
			if index == count - 1 {
				break;
			}
			index = nodes[index].next;
		}
		Ok(result)
	}
}
