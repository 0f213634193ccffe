use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean radius of the default planet, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// Two coordinates closer than this on both axes are the same place.
pub const COORD_TOLERANCE_DEG: f64 = 0.0001;

/// A longitude/latitude pair in degrees.
///
/// Coordinates come out of floating point generation and get compared after
/// being copied around, so there is deliberately no `PartialEq`: use
/// [`Coordinate::approx_eq`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        debug_assert!(longitude.is_finite() && latitude.is_finite());
        Self {
            longitude,
            latitude,
        }
    }

    pub fn approx_eq(&self, other: &Coordinate) -> bool {
        (self.longitude - other.longitude).abs() <= COORD_TOLERANCE_DEG
            && (self.latitude - other.latitude).abs() <= COORD_TOLERANCE_DEG
    }

    /// Great-circle (haversine) distance, in the unit of `radius`.
    pub fn distance_to(&self, other: &Coordinate, radius: f64) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let d_phi = phi2 - phi1;
        let d_lambda = (other.longitude - self.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        // Near-antipodal points can round a hair above 1.
        let a = a.min(1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        radius * c
    }

    /// Flat projection used for drawing the map: `(x, z)` where z points north.
    pub fn to_cartesian(&self, radius: f64) -> (f64, f64) {
        let lat = self.latitude.to_radians();
        let lon = self.longitude.to_radians();
        let x = radius * lat.cos() * lon.cos();
        let z = radius * lat.sin();
        (x, z)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.longitude, self.latitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Maps a coordinate onto a canvas whose centre is `(center_x, center_y)`.
///
/// Each axis is scaled from the origin so the planet radius spans half the
/// canvas, then translated because screen space starts at the top-left corner.
pub fn project_to_screen(
    coord: &Coordinate,
    radius: f64,
    center_x: f64,
    center_y: f64,
) -> ScreenPoint {
    let (x, z) = coord.to_cartesian(radius);
    ScreenPoint {
        x: x * (center_x / radius) + center_x,
        y: z * (center_y / radius) + center_y,
    }
}
