//! Dispatch orchestration: the end-to-end decision pipeline.
//!
//! One dispatch is a synchronous, non-branching pass through filtering,
//! scoring, reservation, cultural adjustment, route building, and
//! monitoring setup, with a single failure exit when no candidate
//! survives. All collaborators are injected; the engine performs no I/O
//! of its own beyond what those collaborators do synchronously.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::advisor::{self, AdvisorConfig};
use crate::error::DispatchError;
use crate::filter::{self, FilterConfig};
use crate::geo::GeoConfig;
use crate::model::{
    AlternativeOffer, Consideration, DecisionReasoning, DispatchDecision, DispatchRequest,
    DispatchUpdate, DispatchUpdateKind, Impact, Resource, TimerTicket,
};
use crate::route;
use crate::scoring::{self, PoolStats, ScoredCandidate, ScoringWeights};
use crate::traits::{
    LandmarkProvider, LocalEventsProvider, ResourceRegistry, TrafficProvider, UpdateScheduler,
};

/// Pipeline phases, in execution order. `Failed` is reachable from
/// `Filtering` and `Scoring` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPhase {
    Received,
    Filtering,
    Scoring,
    CulturallyAdjusting,
    RouteBuilding,
    MonitoringSetup,
    Completed,
    Failed,
}

/// All engine tunables in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub geo: GeoConfig,
    pub filter: FilterConfig,
    pub weights: ScoringWeights,
    pub advisor: AdvisorConfig,
    /// Ranked runners-up offered alongside the decision.
    pub max_alternatives: usize,
    /// Period of the scheduled location-update timer.
    pub location_update_interval_minutes: i64,
    /// How far ahead of arrival a cultural alert should fire.
    pub cultural_alert_lead_minutes: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            geo: GeoConfig::default(),
            filter: FilterConfig::default(),
            weights: ScoringWeights::default(),
            advisor: AdvisorConfig::default(),
            max_alternatives: 3,
            location_update_interval_minutes: 5,
            cultural_alert_lead_minutes: 10,
        }
    }
}

/// Everything one dispatch produces: the decision record, immediate
/// notification updates, and tickets for the scheduled monitoring
/// timers (cancel these on cancellation or reassignment).
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub decision: DispatchDecision,
    pub updates: Vec<DispatchUpdate>,
    pub timers: Vec<TimerTicket>,
}

/// The dispatch orchestrator, parameterized over its collaborators.
pub struct DispatchEngine<R, T, E, L, S> {
    registry: R,
    traffic: T,
    events: E,
    landmarks: L,
    scheduler: S,
    config: EngineConfig,
}

impl<R, T, E, L, S> DispatchEngine<R, T, E, L, S>
where
    R: ResourceRegistry,
    T: TrafficProvider,
    E: LocalEventsProvider,
    L: LandmarkProvider,
    S: UpdateScheduler,
{
    pub fn new(registry: R, traffic: T, events: E, landmarks: L, scheduler: S) -> Self {
        Self::with_config(registry, traffic, events, landmarks, scheduler, EngineConfig::default())
    }

    pub fn with_config(
        registry: R,
        traffic: T,
        events: E,
        landmarks: L,
        scheduler: S,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            traffic,
            events,
            landmarks,
            scheduler,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one dispatch against the current pool snapshot.
    ///
    /// `now` is supplied by the caller so concurrent and replayed
    /// dispatches see a consistent clock. A reservation conflict on the
    /// selected winner triggers exactly one refilter/rescore pass with
    /// the conflicting resource excluded; a second conflict is surfaced
    /// as [`DispatchError::ReservationConflict`].
    pub fn dispatch(
        &self,
        request: &DispatchRequest,
        now: DateTime<Utc>,
    ) -> Result<DispatchOutcome, DispatchError> {
        debug!(
            request_id = %request.request_id,
            phase = ?DispatchPhase::Received,
            "dispatch received"
        );
        if let Some(reason) = request.validation_error() {
            warn!(request_id = %request.request_id, reason, "request rejected at intake");
            return Err(DispatchError::InvalidRequest {
                reason: reason.to_string(),
            });
        }

        let pool = self.registry.list_available();
        let mut excluded: HashSet<String> = HashSet::new();
        let mut retried = false;

        loop {
            debug!(
                request_id = %request.request_id,
                phase = ?DispatchPhase::Filtering,
                pool = pool.len(),
                excluded = excluded.len(),
                "filtering candidates"
            );
            let candidates =
                filter::eligible_candidates(&pool, request, now, &self.config.filter, &excluded);
            if candidates.is_empty() {
                warn!(
                    request_id = %request.request_id,
                    phase = ?DispatchPhase::Failed,
                    "no eligible resource"
                );
                return Err(DispatchError::NoEligibleResource {
                    request_id: request.request_id.clone(),
                });
            }

            debug!(
                request_id = %request.request_id,
                phase = ?DispatchPhase::Scoring,
                candidates = candidates.len(),
                "scoring candidates"
            );
            let stats = PoolStats {
                listed: pool.len(),
                eligible: candidates.len(),
            };
            let ranked = scoring::rank(&candidates, request, now, &self.config.weights, stats)?;

            let winner_id = ranked[0].resource.id.clone();
            if !self.registry.reserve(&winner_id) {
                if retried {
                    warn!(
                        request_id = %request.request_id,
                        resource_id = %winner_id,
                        phase = ?DispatchPhase::Failed,
                        "reservation conflict after retry"
                    );
                    return Err(DispatchError::ReservationConflict {
                        resource_id: winner_id,
                    });
                }
                warn!(
                    request_id = %request.request_id,
                    resource_id = %winner_id,
                    "reservation conflict, retrying once without it"
                );
                excluded.insert(winner_id);
                retried = true;
                continue;
            }

            return Ok(self.complete(request, now, ranked));
        }
    }

    /// Cancel every monitoring timer from a prior outcome, e.g. when the
    /// dispatch is cancelled or reassigned.
    pub fn cancel_monitoring(&self, timers: &[TimerTicket]) {
        for ticket in timers {
            self.scheduler.cancel(ticket);
        }
    }

    fn complete(
        &self,
        request: &DispatchRequest,
        now: DateTime<Utc>,
        ranked: Vec<ScoredCandidate<'_>>,
    ) -> DispatchOutcome {
        let winner = &ranked[0];
        let resource = winner.resource;

        let travel_minutes = self
            .config
            .geo
            .travel_time_minutes(resource.location, request.location);
        let estimated_arrival = now + Duration::minutes(travel_minutes);

        debug!(
            request_id = %request.request_id,
            phase = ?DispatchPhase::CulturallyAdjusting,
            "collecting cultural considerations"
        );
        let considerations = advisor::assess(
            resource,
            request,
            estimated_arrival,
            &self.events,
            &self.config.advisor,
        );

        debug!(
            request_id = %request.request_id,
            phase = ?DispatchPhase::RouteBuilding,
            "building route"
        );
        let route = route::build_route(
            resource,
            request,
            now,
            &self.traffic,
            &self.landmarks,
            &self.config.geo,
        );

        let alternatives = self.alternatives(&ranked, request, now);
        let confidence = confidence(&ranked);
        let reasoning = reasoning(winner, &self.config.weights, &considerations);

        debug!(
            request_id = %request.request_id,
            phase = ?DispatchPhase::MonitoringSetup,
            "scheduling monitoring updates"
        );
        let (updates, timers) =
            self.monitoring(request, resource, now, estimated_arrival, &considerations);

        info!(
            request_id = %request.request_id,
            resource_id = %resource.id,
            total = winner.score.total,
            alternatives = alternatives.len(),
            phase = ?DispatchPhase::Completed,
            "dispatch completed"
        );

        DispatchOutcome {
            decision: DispatchDecision {
                request_id: request.request_id.clone(),
                resource_id: resource.id.clone(),
                estimated_arrival,
                route,
                alternatives,
                considerations,
                confidence,
                reasoning,
                score: winner.score.clone(),
            },
            updates,
            timers,
        }
    }

    /// Ranked runners-up, capped and always excluding the winner.
    fn alternatives(
        &self,
        ranked: &[ScoredCandidate<'_>],
        request: &DispatchRequest,
        now: DateTime<Utc>,
    ) -> Vec<AlternativeOffer> {
        ranked
            .iter()
            .skip(1)
            .take(self.config.max_alternatives)
            .map(|candidate| {
                let travel_minutes = self
                    .config
                    .geo
                    .travel_time_minutes(candidate.resource.location, request.location);
                AlternativeOffer {
                    resource_id: candidate.resource.id.clone(),
                    estimated_arrival: now + Duration::minutes(travel_minutes),
                    cost_estimate: 50.0
                        + 10.0 * candidate.score.distance_km
                        + 25.0 * request.priority.multiplier(),
                    cultural_match_pct: candidate.score.metrics.cultural_match_pct,
                }
            })
            .collect()
    }

    fn monitoring(
        &self,
        request: &DispatchRequest,
        resource: &Resource,
        now: DateTime<Utc>,
        estimated_arrival: DateTime<Utc>,
        considerations: &[Consideration],
    ) -> (Vec<DispatchUpdate>, Vec<TimerTicket>) {
        let assignment = DispatchUpdate {
            request_id: request.request_id.clone(),
            resource_id: resource.id.clone(),
            kind: DispatchUpdateKind::Status,
            message: format!(
                "resource {} assigned, estimated arrival {}",
                resource.id,
                estimated_arrival.format("%H:%M")
            ),
            at: now,
        };

        let interval = Duration::minutes(self.config.location_update_interval_minutes);
        let mut timers = vec![self.scheduler.schedule(
            DispatchUpdate {
                request_id: request.request_id.clone(),
                resource_id: resource.id.clone(),
                kind: DispatchUpdateKind::Location,
                message: "periodic location update".to_string(),
                at: now,
            },
            now + interval,
            Some(interval),
        )];

        let lead = Duration::minutes(self.config.cultural_alert_lead_minutes);
        for consideration in considerations
            .iter()
            .filter(|c| c.impact >= Impact::Medium)
        {
            let due = std::cmp::max(estimated_arrival - lead, now);
            timers.push(self.scheduler.schedule(
                DispatchUpdate {
                    request_id: request.request_id.clone(),
                    resource_id: resource.id.clone(),
                    kind: DispatchUpdateKind::CulturalAlert,
                    message: consideration.description.clone(),
                    at: now,
                },
                due,
                None,
            ));
        }

        (vec![assignment], timers)
    }
}

/// Confidence in the assignment: the winner's composite on a 0-1 scale,
/// plus a small bump when it is uncontested or leads by a clear margin.
fn confidence(ranked: &[ScoredCandidate<'_>]) -> f64 {
    let top = ranked[0].score.total / 100.0;
    let margin_bonus = match ranked.get(1) {
        None => 0.05,
        Some(second) if ranked[0].score.total - second.score.total >= 10.0 => 0.05,
        Some(_) => 0.0,
    };
    (top + margin_bonus).clamp(0.0, 1.0)
}

fn reasoning(
    winner: &ScoredCandidate<'_>,
    weights: &ScoringWeights,
    considerations: &[Consideration],
) -> DecisionReasoning {
    let breakdown = &winner.score.breakdown;
    let mut contributions = [
        ("close proximity to the requester", breakdown.distance * weights.distance),
        ("strong service record", breakdown.performance * weights.performance),
        ("cultural fit with the requester", breakdown.cultural * weights.cultural),
        ("request urgency", breakdown.priority * weights.priority),
        ("immediate availability", breakdown.availability * weights.availability),
    ];
    contributions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let primary_factors = contributions
        .iter()
        .take(2)
        .map(|(label, contribution)| format!("{label} (weighted contribution {contribution:.1})"))
        .collect();

    let mut cultural_factors = vec![format!(
        "cultural match {:.0}%",
        winner.score.metrics.cultural_match_pct
    )];
    cultural_factors.extend(considerations.iter().map(|c| c.description.clone()));

    let mut trade_offs = Vec::new();
    if breakdown.distance < 50.0 {
        trade_offs.push(
            "accepted a longer approach in exchange for performance and cultural fit".to_string(),
        );
    }
    if breakdown.availability < 100.0 {
        trade_offs.push("selected resource is not immediately free".to_string());
    }

    DecisionReasoning {
        primary_factors,
        cultural_factors,
        trade_offs,
    }
}
