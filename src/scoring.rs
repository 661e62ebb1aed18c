//! Weighted multi-factor scoring and candidate ranking.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cultural;
use crate::error::DispatchError;
use crate::geo;
use crate::model::{
    AssignmentScore, DispatchRequest, OptimizationMetrics, Priority, Resource, ScoreBreakdown,
};

/// Relative weights of the scoring factors. Must sum to 1.0 for the
/// total to stay on the 0-100 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub distance: f64,
    pub performance: f64,
    pub cultural: f64,
    pub priority: f64,
    pub availability: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance: 0.40,
            performance: 0.25,
            cultural: 0.20,
            priority: 0.10,
            availability: 0.05,
        }
    }
}

/// Pool occupancy inputs for the utilization metric.
#[derive(Debug, Clone, Copy)]
pub struct PoolStats {
    /// Resources in the registry snapshot.
    pub listed: usize,
    /// Resources that passed eligibility filtering.
    pub eligible: usize,
}

impl PoolStats {
    fn occupancy(&self) -> f64 {
        if self.listed == 0 {
            return 0.0;
        }
        self.eligible as f64 / self.listed as f64
    }
}

/// A candidate with its freshly computed score.
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub resource: &'a Resource,
    pub score: AssignmentScore,
}

/// Score every candidate and rank them best-first.
///
/// Deterministic: identical inputs produce identical totals and order.
/// The sort is stable, so candidates with equal totals keep their
/// insertion order.
pub fn rank<'a>(
    candidates: &[&'a Resource],
    request: &DispatchRequest,
    now: DateTime<Utc>,
    weights: &ScoringWeights,
    stats: PoolStats,
) -> Result<Vec<ScoredCandidate<'a>>, DispatchError> {
    if candidates.is_empty() {
        return Err(DispatchError::NoEligibleResource {
            request_id: request.request_id.clone(),
        });
    }

    let mut ranked: Vec<ScoredCandidate<'a>> = candidates
        .iter()
        .map(|&resource| ScoredCandidate {
            resource,
            score: score_candidate(resource, request, now, weights, stats),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total
            .partial_cmp(&a.score.total)
            .unwrap_or(Ordering::Equal)
    });

    Ok(ranked)
}

/// Compute the weighted composite score for one candidate.
pub fn score_candidate(
    resource: &Resource,
    request: &DispatchRequest,
    now: DateTime<Utc>,
    weights: &ScoringWeights,
    stats: PoolStats,
) -> AssignmentScore {
    let km = geo::distance_km(resource.location, request.location);
    let perf = &resource.performance;

    let distance = (100.0 - 2.0 * km).max(0.0);
    let performance = (perf.rating * 10.0 + perf.on_time_pct + perf.satisfaction_pct) / 3.0;
    let compatibility = cultural::compatibility(resource, request);
    let cultural_factor = compatibility * 100.0;
    let priority = request.priority.multiplier() * 20.0;
    let availability = availability_score(resource, request, now);

    let total = (distance * weights.distance
        + performance * weights.performance
        + cultural_factor * weights.cultural
        + priority * weights.priority
        + availability * weights.availability)
        .clamp(0.0, 100.0);

    AssignmentScore {
        resource_id: resource.id.clone(),
        total,
        breakdown: ScoreBreakdown {
            distance,
            performance,
            cultural: cultural_factor,
            priority,
            availability,
        },
        metrics: optimization_metrics(resource, request, km, cultural_factor, stats),
        distance_km: km,
    }
}

/// Availability subscore: full marks when the resource is free now,
/// penalized per minute until it frees up and when the service type is
/// outside its preferred list. Floored at zero.
fn availability_score(resource: &Resource, request: &DispatchRequest, now: DateTime<Utc>) -> f64 {
    let mut score = 100.0;

    if let Some(free_from) = resource.availability.free_from {
        if free_from > now {
            let minutes_until_free = (free_from - now).num_minutes() as f64;
            score -= 2.0 * minutes_until_free;
        }
    }

    let preferred = &resource.availability.preferred_service_types;
    if !preferred.is_empty() && !preferred.contains(&request.service_type) {
        score -= 20.0;
    }

    score.max(0.0)
}

fn optimization_metrics(
    resource: &Resource,
    request: &DispatchRequest,
    km: f64,
    cultural_factor: f64,
    stats: PoolStats,
) -> OptimizationMetrics {
    let perf = &resource.performance;

    let mut predicted_satisfaction = perf.satisfaction_pct;
    let preferred = &resource.availability.preferred_service_types;
    if preferred.contains(&request.service_type) {
        predicted_satisfaction += 5.0;
    }
    if request.priority == Priority::Urgent && perf.on_time_pct > 90.0 {
        predicted_satisfaction += 3.0;
    }

    OptimizationMetrics {
        travel_time_reduction_pct: (100.0 - 1.5 * km).max(0.0),
        cultural_match_pct: cultural_factor,
        predicted_satisfaction_pct: predicted_satisfaction.min(100.0),
        utilization_efficiency_pct: (stats.occupancy() * perf.completion_rate * 100.0)
            .clamp(0.0, 100.0),
    }
}
