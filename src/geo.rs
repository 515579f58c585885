//! Spherical-earth geodesy helpers.
//!
//! Distances use the haversine formula on a sphere whose radius is the
//! WGS-84 semi-major axis (6 378 137 m), not the mean earth radius.
//! Alert radii and persisted targets were calibrated against this
//! constant, so it must not be swapped for 6 371 km.

use serde::{Deserialize, Serialize};

/// Sphere radius used for every distance computation (metres).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between `a` and `b` in metres.
///
/// Returns `0.0` for identical points and at most `π · EARTH_RADIUS_M`
/// for antipodal ones.
pub fn great_circle_distance(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}
