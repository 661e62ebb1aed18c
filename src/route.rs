//! Route assembly for a confirmed assignment.

use chrono::{DateTime, Utc};

use crate::geo::{self, GeoConfig};
use crate::model::{DispatchRequest, Resource, RouteSegment};
use crate::traits::{LandmarkProvider, TrafficProvider};

/// Maximum descriptive landmarks carried per segment.
const MAX_LANDMARKS: usize = 2;

/// Build the route for an assignment: one primary leg from the resource
/// to the requester.
///
/// Always returns at least one segment. The traffic label comes from the
/// injected provider (which folds failures into its default) and the
/// landmark list is truncated to two entries.
pub fn build_route<T, L>(
    resource: &Resource,
    request: &DispatchRequest,
    at: DateTime<Utc>,
    traffic: &T,
    landmarks: &L,
    geo: &GeoConfig,
) -> Vec<RouteSegment>
where
    T: TrafficProvider,
    L: LandmarkProvider,
{
    let from = resource.location;
    let to = request.location;

    let mut marks = landmarks.landmarks_between(from, to);
    marks.truncate(MAX_LANDMARKS);

    vec![RouteSegment {
        from,
        to,
        distance_km: geo::distance_km(from, to),
        travel_time_minutes: geo.travel_time_minutes(from, to),
        traffic: traffic.condition(from, to, at),
        landmarks: marks,
    }]
}

/// Landmark provider backed by a static named-location table.
///
/// Picks the entries closest to the leg midpoint, within a corridor
/// sized to the leg itself, so narration stays relevant to the path.
#[derive(Debug, Clone)]
pub struct StaticLandmarks {
    entries: Vec<(String, (f64, f64))>,
}

impl StaticLandmarks {
    pub fn new(entries: Vec<(String, (f64, f64))>) -> Self {
        Self { entries }
    }

    /// Built-in table of well-known Bengaluru landmarks.
    pub fn bengaluru() -> Self {
        Self::new(
            [
                ("Vidhana Soudha", (12.9794, 77.5907)),
                ("Cubbon Park", (12.9763, 77.5929)),
                ("Lalbagh Botanical Garden", (12.9507, 77.5848)),
                ("KSR Railway Station", (12.9783, 77.5713)),
                ("ISKCON Temple", (13.0108, 77.5511)),
                ("Ulsoor Lake", (12.9810, 77.6200)),
                ("Bannerghatta Road Junction", (12.8911, 77.5970)),
                ("Hebbal Flyover", (13.0358, 77.5970)),
            ]
            .into_iter()
            .map(|(name, loc)| (name.to_string(), loc))
            .collect(),
        )
    }
}

impl LandmarkProvider for StaticLandmarks {
    fn landmarks_between(&self, from: (f64, f64), to: (f64, f64)) -> Vec<String> {
        let midpoint = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
        // Corridor: half the leg plus a small margin for nearby detours.
        let corridor_km = geo::distance_km(from, to) / 2.0 + 2.0;

        let mut nearby: Vec<(f64, &str)> = self
            .entries
            .iter()
            .map(|(name, location)| (geo::distance_km(midpoint, *location), name.as_str()))
            .filter(|(distance, _)| *distance <= corridor_km)
            .collect();
        nearby.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        nearby.into_iter().map(|(_, name)| name.to_string()).collect()
    }
}
