//! Test fixtures for dispatch-planner.
//!
//! Provides builder-style requests and resources plus a handful of real
//! Bengaluru pickup points for realistic scenarios.

// Each integration test binary uses a different slice of these helpers.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use dispatch_planner::model::{
    AvailabilityWindow, CulturalContext, CulturalProfile, CustomerProfile, DispatchRequest,
    PerformanceProfile, Priority, Resource, ResourceKind, ResourceStatus, ServiceType,
};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// Real Bengaluru pickup points, central business district and suburbs.
pub const PICKUP_POINTS: &[Place] = &[
    Place::new("MG Road Metro", 12.9757, 77.6066),
    Place::new("Majestic Bus Stand", 12.9774, 77.5709),
    Place::new("Koramangala Water Tank", 12.9352, 77.6245),
    Place::new("Indiranagar 100 Feet Road", 12.9719, 77.6412),
    Place::new("Jayanagar 4th Block", 12.9254, 77.5834),
    Place::new("Whitefield ITPL Gate", 12.9866, 77.7360),
];

/// A fixed reference clock for deterministic scenarios.
pub fn monday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()
}

/// Builder for requests with sensible defaults.
#[derive(Debug, Clone)]
pub struct RequestFixture {
    request: DispatchRequest,
}

impl RequestFixture {
    pub fn new(id: &str) -> Self {
        Self {
            request: DispatchRequest {
                request_id: id.to_string(),
                location: (12.9757, 77.6066),
                service_type: ServiceType::Ride,
                priority: Priority::Medium,
                request_time: monday_morning(),
                expected_duration_minutes: 30,
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
                    festival_awareness: false,
                },
            },
        }
    }

    pub fn at(mut self, place: &Place) -> Self {
        self.request.location = place.coords();
        self
    }

    pub fn location(mut self, lat: f64, lng: f64) -> Self {
        self.request.location = (lat, lng);
        self
    }

    pub fn service_type(mut self, service_type: ServiceType) -> Self {
        self.request.service_type = service_type;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.request.priority = priority;
        self
    }

    pub fn language(mut self, preference: &str) -> Self {
        self.request.customer.language_preference = preference.to_string();
        self.request.cultural_context.language = preference.to_string();
        self
    }

    pub fn festival_aware(mut self, aware: bool) -> Self {
        self.request.cultural_context.festival_awareness = aware;
        self
    }

    pub fn request_id(mut self, id: &str) -> Self {
        self.request.request_id = id.to_string();
        self
    }

    pub fn build(self) -> DispatchRequest {
        self.request
    }
}

/// Builder for resources with sensible defaults.
#[derive(Debug, Clone)]
pub struct ResourceFixture {
    resource: Resource,
}

impl ResourceFixture {
    pub fn new(id: &str) -> Self {
        Self {
            resource: Resource {
                id: id.to_string(),
                kind: ResourceKind::Driver,
                location: (12.98, 77.60),
                status: ResourceStatus::Available,
                capabilities: vec![ServiceType::Ride],
                availability: AvailabilityWindow::default(),
                performance: PerformanceProfile {
                    rating: 4.0,
                    completion_rate: 0.9,
                    on_time_pct: 90.0,
                    satisfaction_pct: 85.0,
                    cultural_sensitivity: 5.0,
                },
                cultural: CulturalProfile {
                    languages: vec!["kannada".to_string()],
                    dialects: Vec::new(),
                    regional_familiarity: vec!["karnataka".to_string()],
                    festival_awareness: false,
                },
            },
        }
    }

    pub fn at(mut self, place: &Place) -> Self {
        self.resource.location = place.coords();
        self
    }

    pub fn location(mut self, lat: f64, lng: f64) -> Self {
        self.resource.location = (lat, lng);
        self
    }

    pub fn status(mut self, status: ResourceStatus) -> Self {
        self.resource.status = status;
        self
    }

    pub fn capabilities(mut self, capabilities: &[ServiceType]) -> Self {
        self.resource.capabilities = capabilities.to_vec();
        self
    }

    pub fn speaks(mut self, languages: &[&str]) -> Self {
        self.resource.cultural.languages = languages.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.resource.performance.rating = rating;
        self
    }

    pub fn free_from(mut self, at: DateTime<Utc>) -> Self {
        self.resource.availability.free_from = Some(at);
        self
    }

    pub fn free_until(mut self, at: DateTime<Utc>) -> Self {
        self.resource.availability.free_until = Some(at);
        self
    }

    pub fn build(self) -> Resource {
        self.resource
    }
}
