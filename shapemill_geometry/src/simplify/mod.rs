//! Percentage-driven polygon simplification.
//!
//! Two algorithms share one contract: given a ring of `n` points and a
//! target fraction `p` in `[0, 1]`, reduce the ring to approximately
//! `max(min_points, ⌊n·p⌋)` points without reordering them. Rings at or
//! below the minimum are returned unchanged, as is any ring whose target is
//! not smaller than its length. Out-of-range percentages are clamped.
//!
//! Both simplifiers are pure: they never mutate their input and produce
//! bit-identical output for identical input, so distinct rings can be
//! simplified concurrently without coordination.

mod douglas;
mod visvalingam;

pub use douglas::DouglasPeucker;
pub use visvalingam::Visvalingam;

use crate::Coordinates;
use anyhow::{Result, ensure};

/// Default floor below which simplification is a no-op. Values below 4
/// produce degenerate rings.
pub const MIN_POINTS: usize = 4;

/// Default sharpness coefficient for weighted Visvalingam.
pub const DEFAULT_WEIGHTING: f64 = 0.7;

/// Simplifies one ring at a time; implemented by both algorithms.
///
/// `Polygon::simplify` drives this per ring and reassembles the `parts`
/// array from the cumulative output lengths.
pub trait RingSimplifier {
	fn simplify_ring(&self, ring: &[Coordinates], percentage: f64) -> Result<Vec<Coordinates>>;
}

/// Selects which simplification algorithm to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Algorithm {
	/// Rank-based Douglas-Peucker
	#[cfg_attr(feature = "cli", value(name = "doug"))]
	DouglasPeucker,
	/// Weighted Visvalingam-Whyatt
	#[cfg_attr(feature = "cli", value(name = "vis"))]
	Visvalingam,
}

impl Algorithm {
	/// Builds the corresponding simplifier. `weighting` only affects
	/// Visvalingam.
	pub fn simplifier(&self, min_points: usize, weighting: f64) -> Box<dyn RingSimplifier> {
		match self {
			Algorithm::DouglasPeucker => Box::new(DouglasPeucker { min_points }),
			Algorithm::Visvalingam => Box::new(Visvalingam { min_points, weighting }),
		}
	}
}

fn check_min_points(min_points: usize) -> Result<()> {
	ensure!(min_points >= 1, "minimum point count must be at least 1");
	Ok(())
}

/// Target output length: `max(min_points, ⌊point_count · percentage⌋)`.
fn target_len(point_count: usize, percentage: f64, min_points: usize) -> usize {
	let percentage = percentage.clamp(0.0, 1.0);
	min_points.max((point_count as f64 * percentage) as usize)
}

fn ring_from_flat(coordinates: &[f64]) -> Result<Vec<Coordinates>> {
	ensure!(
		coordinates.len() % 2 == 0,
		"coordinates must be divisible by 2, got {} values",
		coordinates.len()
	);
	Ok(
		coordinates
			.chunks_exact(2)
			.map(|pair| Coordinates::new(pair[0], pair[1]))
			.collect(),
	)
}

fn ring_to_flat(ring: &[Coordinates]) -> Vec<f64> {
	ring.iter().flat_map(|point| [point.x(), point.y()]).collect()
}

fn ring_from_pairs(points: &[[f64; 2]]) -> Vec<Coordinates> {
	points.iter().map(|&pair| Coordinates::from(pair)).collect()
}

fn ring_to_pairs(ring: Vec<Coordinates>) -> Vec<[f64; 2]> {
	ring.into_iter().map(<[f64; 2]>::from).collect()
}
