use crate::Coordinates;

/// An Albers equal-area conic projection on a sphere of radius 6378 km.
///
/// `new` precomputes the projection constants from the two standard
/// parallels and the reference point, all in degrees; `project` then maps
/// (latitude, longitude) pairs to planar kilometers. The ingest pipeline
/// itself never reprojects; this is for callers that want projected output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlbersProjection {
	n: f64,
	c: f64,
	rho0: f64,
	lam0: f64,
	radius: f64,
}

impl AlbersProjection {
	/// `phi1` and `phi2` are the standard parallels, `phi0`/`lam0` the
	/// latitude and longitude of the projection origin, all in degrees.
	pub fn new(phi1: f64, phi2: f64, phi0: f64, lam0: f64) -> AlbersProjection {
		let phi1r = phi1.to_radians();
		let phi2r = phi2.to_radians();
		let phi0r = phi0.to_radians();
		let lam0r = lam0.to_radians();

		let n = 0.5 * (phi1r.sin() + phi2r.sin());
		let c = phi1r.cos().powi(2) + 2.0 * n * phi1r.sin();
		let radius = 6378.0 / n;
		let rho0 = radius * (c - 2.0 * n * phi0r.sin()).sqrt();

		AlbersProjection {
			n,
			c,
			rho0,
			lam0: lam0r,
			radius,
		}
	}

	/// The standard parallels used for the conterminous United States.
	pub fn conus() -> AlbersProjection {
		AlbersProjection::new(29.5, 45.5, 37.5, -96.0)
	}

	/// Projects a (latitude, longitude) pair in degrees to planar (x, y).
	pub fn project(&self, lat: f64, lon: f64) -> Coordinates {
		let phir = lat.to_radians();
		let lamr = lon.to_radians();

		let rho = self.radius * (self.c - 2.0 * self.n * phir.sin()).sqrt();
		let theta = self.n * (lamr - self.lam0);
		Coordinates::new(rho * theta.sin(), self.rho0 - rho * theta.cos())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn origin_projects_to_zero() {
		let projection = AlbersProjection::conus();
		let origin = projection.project(37.5, -96.0);
		assert!(origin.x().abs() < 1e-9);
		assert!(origin.y().abs() < 1e-9);
	}

	#[test]
	fn east_is_positive_x_north_is_positive_y() {
		let projection = AlbersProjection::conus();
		let east = projection.project(37.5, -90.0);
		let north = projection.project(42.0, -96.0);
		assert!(east.x() > 0.0);
		assert!(north.y() > 0.0);
	}

	#[test]
	fn projection_is_deterministic() {
		let projection = AlbersProjection::conus();
		assert_eq!(projection.project(38.6, -90.2), projection.project(38.6, -90.2));
	}
}
