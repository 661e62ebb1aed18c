//! Great-circle distance and derived travel time.
//!
//! Straight-line haversine distance stands in for road distance; the
//! assumed average speed models dense urban traffic.

use serde::{Deserialize, Serialize};

/// Average speed assumption for travel time estimation, in km/h.
const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Travel-time estimation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl GeoConfig {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Estimated travel time between two points, rounded to the nearest
    /// minute.
    pub fn travel_time_minutes(&self, from: (f64, f64), to: (f64, f64)) -> i64 {
        let hours = distance_km(from, to) / self.speed_kmh;
        (hours * 60.0).round() as i64
    }
}

/// Haversine great-circle distance between two (lat, lng) points in
/// kilometers. Pure and symmetric; callers are responsible for passing
/// coordinates within valid ranges.
pub fn distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}
