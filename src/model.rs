//! Domain data model for dispatch requests, resources, and decisions.
//!
//! Requests come from an external intake collaborator and resources from
//! the fleet registry; the planner only ever sees read-only snapshots of
//! both. Decisions and updates are produced once per dispatch and handed
//! back to the caller.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Service categories a request can ask for and a resource can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Ride,
    Delivery,
    Emergency,
    Maintenance,
}

/// Request urgency, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Multiplier used by the priority subscore and cost estimates.
    pub fn multiplier(self) -> f64 {
        match self {
            Priority::Low => 1.0,
            Priority::Medium => 2.0,
            Priority::High => 3.0,
            Priority::Urgent => 4.0,
        }
    }
}

/// What kind of field resource this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Driver,
    Vehicle,
    Agent,
}

/// Live status of a resource. Mutated externally as the physical world
/// changes; the planner never writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Available,
    Busy,
    Break,
    Offline,
}

/// Traffic condition label along a route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficCondition {
    Light,
    Moderate,
    Heavy,
}

impl TrafficCondition {
    /// Parse a condition label as reported by traffic services.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "light" => Some(TrafficCondition::Light),
            "moderate" => Some(TrafficCondition::Moderate),
            "heavy" => Some(TrafficCondition::Heavy),
            _ => None,
        }
    }
}

/// Requester profile carried on every dispatch request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub tier: String,
    pub interaction_history: Vec<String>,
    /// Preferred spoken language, possibly a code-mixed dialect.
    pub language_preference: String,
    pub communication_preferences: Vec<String>,
    /// Rolling satisfaction score, 0-100.
    pub satisfaction_score: f64,
}

/// Regional/cultural context of the requester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CulturalContext {
    pub language: String,
    pub region: String,
    /// Whether festival-sensitive handling is active for this requester.
    pub festival_awareness: bool,
}

/// An incoming service request. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub request_id: String,
    /// Requester location as (lat, lng).
    pub location: (f64, f64),
    pub service_type: ServiceType,
    pub priority: Priority,
    pub request_time: DateTime<Utc>,
    pub expected_duration_minutes: i64,
    pub special_requirements: Vec<String>,
    pub customer: CustomerProfile,
    pub cultural_context: CulturalContext,
}

impl DispatchRequest {
    /// Intake contract: all required fields present and well-formed.
    /// No side effects.
    pub fn validate(&self) -> bool {
        self.validation_error().is_none()
    }

    /// The first validation failure, if any.
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.request_id.trim().is_empty() {
            return Some("request id is empty");
        }
        let (lat, lng) = self.location;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Some("location out of coordinate range");
        }
        if self.expected_duration_minutes <= 0 {
            return Some("expected duration must be positive");
        }
        if self.customer.language_preference.trim().is_empty() {
            return Some("customer language preference is empty");
        }
        None
    }
}

/// Rolling performance numbers for a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceProfile {
    /// Rolling rating on a 0-5 scale.
    pub rating: f64,
    /// Fraction of accepted jobs completed, 0-1.
    pub completion_rate: f64,
    /// On-time arrival percentage, 0-100.
    pub on_time_pct: f64,
    /// Customer satisfaction percentage, 0-100.
    pub satisfaction_pct: f64,
    /// Cultural sensitivity rating, 0-10.
    pub cultural_sensitivity: f64,
}

/// Language/regional profile of a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CulturalProfile {
    pub languages: Vec<String>,
    pub dialects: Vec<String>,
    /// Regions the resource knows well.
    pub regional_familiarity: Vec<String>,
    pub festival_awareness: bool,
}

impl CulturalProfile {
    /// Case-insensitive check across languages and dialects.
    pub fn speaks(&self, language: &str) -> bool {
        self.languages
            .iter()
            .chain(self.dialects.iter())
            .any(|known| known.eq_ignore_ascii_case(language))
    }
}

/// When a resource is free and what work it prefers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    /// When the resource becomes free. `None` means free right now.
    pub free_from: Option<DateTime<Utc>>,
    /// End of the current free period. `None` means open-ended.
    pub free_until: Option<DateTime<Utc>>,
    /// Daily working-hour ranges. Empty means on duty around the clock.
    /// Ranges that end before they start wrap past midnight.
    pub working_hours: Vec<(NaiveTime, NaiveTime)>,
    /// Daily windows the resource is unavailable for cultural reasons
    /// (observance breaks and the like).
    pub cultural_constraint_windows: Vec<(NaiveTime, NaiveTime)>,
    /// Preferred service types. Empty means no preference.
    pub preferred_service_types: Vec<ServiceType>,
}

impl AvailabilityWindow {
    /// Whether `at` falls inside the daily working hours.
    pub fn on_duty(&self, at: NaiveTime) -> bool {
        self.working_hours.is_empty()
            || self
                .working_hours
                .iter()
                .any(|&window| within_daily_window(at, window))
    }

    /// Whether `at` falls inside a cultural constraint window.
    pub fn culturally_constrained(&self, at: NaiveTime) -> bool {
        self.cultural_constraint_windows
            .iter()
            .any(|&window| within_daily_window(at, window))
    }
}

fn within_daily_window(at: NaiveTime, (start, end): (NaiveTime, NaiveTime)) -> bool {
    if start <= end {
        start <= at && at < end
    } else {
        at >= start || at < end
    }
}

/// A field resource snapshot as returned by the fleet registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub kind: ResourceKind,
    /// Current location as (lat, lng).
    pub location: (f64, f64),
    pub status: ResourceStatus,
    /// Service types this resource can handle.
    pub capabilities: Vec<ServiceType>,
    pub availability: AvailabilityWindow,
    pub performance: PerformanceProfile,
    pub cultural: CulturalProfile,
}

/// Itemized factor subscores, each on a 0-100 scale before weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub distance: f64,
    pub performance: f64,
    pub cultural: f64,
    pub priority: f64,
    pub availability: f64,
}

/// Reporting metrics computed alongside the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    pub travel_time_reduction_pct: f64,
    pub cultural_match_pct: f64,
    pub predicted_satisfaction_pct: f64,
    pub utilization_efficiency_pct: f64,
}

/// Ephemeral per-candidate score. Created fresh each scoring pass and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentScore {
    pub resource_id: String,
    /// Weighted composite, 0-100.
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    pub metrics: OptimizationMetrics,
    /// Straight-line distance used by the distance factor, kept for
    /// route/alternative building without recomputing.
    pub distance_km: f64,
}

/// Kinds of cultural considerations the advisor can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsiderationKind {
    PrayerTime,
    Festival,
    LocalEvent,
    LanguageAlignment,
}

/// Severity of a consideration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// An advisory annotation on an assignment. Never a veto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consideration {
    pub kind: ConsiderationKind,
    pub impact: Impact,
    pub description: String,
    pub mitigation: String,
}

/// One leg of the planned route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub distance_km: f64,
    pub travel_time_minutes: i64,
    pub traffic: TrafficCondition,
    /// Up to two descriptive landmarks along the leg.
    pub landmarks: Vec<String>,
}

/// A ranked fallback offer from the remaining candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeOffer {
    pub resource_id: String,
    pub estimated_arrival: DateTime<Utc>,
    pub cost_estimate: f64,
    pub cultural_match_pct: f64,
}

/// Human-readable explanation of why the winner won.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionReasoning {
    pub primary_factors: Vec<String>,
    pub cultural_factors: Vec<String>,
    pub trade_offs: Vec<String>,
}

/// Final output record of one dispatch request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchDecision {
    pub request_id: String,
    pub resource_id: String,
    pub estimated_arrival: DateTime<Utc>,
    /// Never empty when a resource is assigned.
    pub route: Vec<RouteSegment>,
    /// At most three, never containing the assigned resource.
    pub alternatives: Vec<AlternativeOffer>,
    pub considerations: Vec<Consideration>,
    /// Confidence in the assignment, 0-1.
    pub confidence: f64,
    pub reasoning: DecisionReasoning,
    pub score: AssignmentScore,
}

/// Kind of monitoring update emitted towards the notification collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchUpdateKind {
    Status,
    Location,
    CulturalAlert,
}

/// A monitoring/notification event descriptor. The planner only produces
/// these as data; delivery belongs to the notification collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchUpdate {
    pub request_id: String,
    pub resource_id: String,
    pub kind: DispatchUpdateKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Opaque handle for a scheduled timer, used to cancel it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerTicket(pub u64);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> DispatchRequest {
        DispatchRequest {
            request_id: "req-1".to_string(),
            location: (12.97, 77.59),
            service_type: ServiceType::Ride,
            priority: Priority::Medium,
            request_time: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            expected_duration_minutes: 45,
            special_requirements: Vec::new(),
            customer: CustomerProfile {
                tier: "standard".to_string(),
                interaction_history: Vec::new(),
                language_preference: "kannada".to_string(),
                communication_preferences: Vec::new(),
                satisfaction_score: 80.0,
            },
            cultural_context: CulturalContext {
                language: "kannada".to_string(),
                region: "karnataka".to_string(),
                festival_awareness: true,
            },
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate());
    }

    #[test]
    fn empty_id_fails() {
        let mut req = request();
        req.request_id = "  ".to_string();
        assert!(!req.validate());
        assert_eq!(req.validation_error(), Some("request id is empty"));
    }

    #[test]
    fn out_of_range_location_fails() {
        let mut req = request();
        req.location = (95.0, 10.0);
        assert!(!req.validate());
    }

    #[test]
    fn non_positive_duration_fails() {
        let mut req = request();
        req.expected_duration_minutes = 0;
        assert!(!req.validate());
    }

    #[test]
    fn missing_language_preference_fails() {
        let mut req = request();
        req.customer.language_preference = String::new();
        assert!(!req.validate());
    }

    #[test]
    fn priority_multipliers() {
        assert_eq!(Priority::Low.multiplier(), 1.0);
        assert_eq!(Priority::Medium.multiplier(), 2.0);
        assert_eq!(Priority::High.multiplier(), 3.0);
        assert_eq!(Priority::Urgent.multiplier(), 4.0);
    }

    #[test]
    fn traffic_label_parsing() {
        assert_eq!(
            TrafficCondition::from_label("Heavy"),
            Some(TrafficCondition::Heavy)
        );
        assert_eq!(
            TrafficCondition::from_label(" light "),
            Some(TrafficCondition::Light)
        );
        assert_eq!(TrafficCondition::from_label("gridlock"), None);
    }

    #[test]
    fn empty_working_hours_mean_always_on_duty() {
        let window = AvailabilityWindow::default();
        assert!(window.on_duty(NaiveTime::from_hms_opt(3, 0, 0).unwrap()));
        assert!(!window.culturally_constrained(NaiveTime::from_hms_opt(3, 0, 0).unwrap()));
    }

    #[test]
    fn working_hours_bound_duty_times() {
        let window = AvailabilityWindow {
            working_hours: vec![(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            )],
            ..AvailabilityWindow::default()
        };
        assert!(window.on_duty(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert!(window.on_duty(NaiveTime::from_hms_opt(17, 59, 0).unwrap()));
        assert!(!window.on_duty(NaiveTime::from_hms_opt(18, 0, 0).unwrap()));
        assert!(!window.on_duty(NaiveTime::from_hms_opt(8, 59, 0).unwrap()));
    }

    #[test]
    fn overnight_shift_wraps_past_midnight() {
        let window = AvailabilityWindow {
            working_hours: vec![(
                NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            )],
            ..AvailabilityWindow::default()
        };
        assert!(window.on_duty(NaiveTime::from_hms_opt(23, 30, 0).unwrap()));
        assert!(window.on_duty(NaiveTime::from_hms_opt(2, 0, 0).unwrap()));
        assert!(!window.on_duty(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn constraint_windows_mark_observance_breaks() {
        let window = AvailabilityWindow {
            cultural_constraint_windows: vec![(
                NaiveTime::from_hms_opt(12, 15, 0).unwrap(),
                NaiveTime::from_hms_opt(12, 45, 0).unwrap(),
            )],
            ..AvailabilityWindow::default()
        };
        assert!(window.culturally_constrained(NaiveTime::from_hms_opt(12, 30, 0).unwrap()));
        assert!(!window.culturally_constrained(NaiveTime::from_hms_opt(13, 0, 0).unwrap()));
    }

    #[test]
    fn speaks_is_case_insensitive_across_dialects() {
        let profile = CulturalProfile {
            languages: vec!["Hindi".to_string()],
            dialects: vec!["Hinglish".to_string()],
            regional_familiarity: Vec::new(),
            festival_awareness: false,
        };
        assert!(profile.speaks("hindi"));
        assert!(profile.speaks("HINGLISH"));
        assert!(!profile.speaks("tamil"));
    }
}
