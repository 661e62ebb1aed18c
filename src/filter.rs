//! Eligibility filtering over a resource pool snapshot.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cultural;
use crate::geo;
use crate::model::{DispatchRequest, Resource, ResourceStatus};

/// Search radius ceiling around the requester, in kilometers.
const DEFAULT_SEARCH_RADIUS_KM: f64 = 50.0;

/// Minimum cultural compatibility floor for eligibility.
const DEFAULT_MIN_CULTURAL_MATCH: f64 = 0.3;

/// Eligibility thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub search_radius_km: f64,
    pub min_cultural_match: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            search_radius_km: DEFAULT_SEARCH_RADIUS_KM,
            min_cultural_match: DEFAULT_MIN_CULTURAL_MATCH,
        }
    }
}

/// Filter the pool down to resources eligible for this request.
///
/// The scan is parallel but order-preserving: survivors keep the pool's
/// insertion order so the later ranking stays deterministic. An empty
/// result is a valid outcome, not an error; the orchestrator surfaces it
/// as a no-resource condition. `excluded` carries resource ids knocked
/// out by an earlier reservation conflict.
pub fn eligible_candidates<'a>(
    pool: &'a [Resource],
    request: &DispatchRequest,
    now: DateTime<Utc>,
    config: &FilterConfig,
    excluded: &HashSet<String>,
) -> Vec<&'a Resource> {
    pool.par_iter()
        .filter(|resource| {
            !excluded.contains(&resource.id) && is_eligible(resource, request, now, config)
        })
        .collect()
}

/// The full eligibility predicate. All checks must hold.
pub fn is_eligible(
    resource: &Resource,
    request: &DispatchRequest,
    now: DateTime<Utc>,
    config: &FilterConfig,
) -> bool {
    if resource.status != ResourceStatus::Available {
        return false;
    }
    let time_of_day = now.time();
    if !resource.availability.on_duty(time_of_day) {
        return false;
    }
    if resource.availability.culturally_constrained(time_of_day) {
        return false;
    }
    if !resource.capabilities.contains(&request.service_type) {
        return false;
    }
    if geo::distance_km(resource.location, request.location) > config.search_radius_km {
        return false;
    }
    if cultural::compatibility(resource, request) < config.min_cultural_match {
        return false;
    }
    match resource.availability.free_until {
        Some(free_until) => free_until > now,
        None => true,
    }
}
