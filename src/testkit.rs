//! Shared builder fixtures for unit tests.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};

use crate::model::{
    AvailabilityWindow, CulturalContext, CulturalProfile, CustomerProfile, DispatchRequest,
    PerformanceProfile, Priority, Resource, ResourceKind, ResourceStatus, ServiceType,
};

/// Builder for test requests with sensible defaults.
#[derive(Debug, Clone)]
pub struct TestRequest {
    request: DispatchRequest,
}

impl TestRequest {
    pub fn new(id: &str) -> Self {
        Self {
            request: DispatchRequest {
                request_id: id.to_string(),
                location: (12.9716, 77.5946),
                service_type: ServiceType::Ride,
                priority: Priority::Medium,
                request_time: Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap(),
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

    pub fn build(self) -> DispatchRequest {
        self.request
    }
}

/// Builder for test resources with sensible defaults.
#[derive(Debug, Clone)]
pub struct TestResource {
    resource: Resource,
}

impl TestResource {
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

    pub fn regions(mut self, regions: &[&str]) -> Self {
        self.resource.cultural.regional_familiarity =
            regions.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn sensitivity(mut self, sensitivity: f64) -> Self {
        self.resource.performance.cultural_sensitivity = sensitivity;
        self
    }

    pub fn festival_aware(mut self, aware: bool) -> Self {
        self.resource.cultural.festival_awareness = aware;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.resource.performance.rating = rating;
        self
    }

    pub fn on_time_pct(mut self, pct: f64) -> Self {
        self.resource.performance.on_time_pct = pct;
        self
    }

    pub fn satisfaction_pct(mut self, pct: f64) -> Self {
        self.resource.performance.satisfaction_pct = pct;
        self
    }

    pub fn completion_rate(mut self, rate: f64) -> Self {
        self.resource.performance.completion_rate = rate;
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

    pub fn working_hours(mut self, ranges: &[(NaiveTime, NaiveTime)]) -> Self {
        self.resource.availability.working_hours = ranges.to_vec();
        self
    }

    pub fn constraint_windows(mut self, windows: &[(NaiveTime, NaiveTime)]) -> Self {
        self.resource.availability.cultural_constraint_windows = windows.to_vec();
        self
    }

    pub fn prefers(mut self, service_types: &[ServiceType]) -> Self {
        self.resource.availability.preferred_service_types = service_types.to_vec();
        self
    }

    pub fn build(self) -> Resource {
        self.resource
    }
}
