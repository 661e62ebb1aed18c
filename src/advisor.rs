//! Post-assignment cultural context checks.
//!
//! The advisor annotates an assignment with calendar and language
//! considerations; it never vetoes or alters the assignment itself.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Consideration, ConsiderationKind, DispatchRequest, Impact, Resource};
use crate::traits::LocalEventsProvider;

/// How close to an observance window an arrival must be to warrant a
/// consideration, in minutes.
const DEFAULT_PRAYER_PROXIMITY_MINUTES: u32 = 30;

/// A festival period keyed by calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FestivalEntry {
    /// Calendar month, 1-12.
    pub month: u32,
    pub name: String,
}

/// Advisor calendars and thresholds. Windows are minutes since midnight
/// in the deployment's local reckoning of the arrival timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Daily observance windows as (start, end) minutes since midnight.
    pub prayer_windows: Vec<(u32, u32)>,
    pub prayer_proximity_minutes: u32,
    pub festivals: Vec<FestivalEntry>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            // Dawn, midday, afternoon, dusk, night.
            prayer_windows: vec![
                (5 * 60 + 30, 6 * 60),
                (12 * 60 + 15, 12 * 60 + 45),
                (15 * 60 + 30, 16 * 60),
                (18 * 60 + 15, 18 * 60 + 45),
                (19 * 60 + 45, 20 * 60 + 15),
            ],
            prayer_proximity_minutes: DEFAULT_PRAYER_PROXIMITY_MINUTES,
            festivals: vec![
                FestivalEntry {
                    month: 4,
                    name: "regional new year".to_string(),
                },
                FestivalEntry {
                    month: 8,
                    name: "regional harvest festival".to_string(),
                },
                FestivalEntry {
                    month: 9,
                    name: "regional harvest festival".to_string(),
                },
            ],
        }
    }
}

/// Collect cultural considerations for an assignment arriving at
/// `estimated_arrival`.
///
/// Checks run in a fixed order (prayer, festival, local events,
/// language) so the output is reproducible. The events collaborator
/// contributes zero or more entries and never fails.
pub fn assess<E: LocalEventsProvider>(
    resource: &Resource,
    request: &DispatchRequest,
    estimated_arrival: DateTime<Utc>,
    events: &E,
    config: &AdvisorConfig,
) -> Vec<Consideration> {
    let mut considerations = Vec::new();

    if let Some(consideration) = prayer_proximity(estimated_arrival, config) {
        considerations.push(consideration);
    }

    if request.cultural_context.festival_awareness {
        let month = estimated_arrival.month();
        if let Some(festival) = config.festivals.iter().find(|f| f.month == month) {
            considerations.push(Consideration {
                kind: ConsiderationKind::Festival,
                impact: Impact::High,
                description: format!(
                    "arrival falls during the {} period",
                    festival.name
                ),
                mitigation: "expect congestion near celebration areas and greet accordingly"
                    .to_string(),
            });
        }
    }

    considerations.extend(events.events_near(request.location, estimated_arrival));

    let preference = request.customer.language_preference.as_str();
    if !resource.cultural.speaks(preference) {
        considerations.push(Consideration {
            kind: ConsiderationKind::LanguageAlignment,
            impact: Impact::Low,
            description: format!(
                "assigned resource does not speak the preferred language ({preference})"
            ),
            mitigation: "offer translation support or in-app text communication".to_string(),
        });
    }

    considerations
}

/// At most one consideration for the first observance window the arrival
/// lands near.
fn prayer_proximity(arrival: DateTime<Utc>, config: &AdvisorConfig) -> Option<Consideration> {
    let arrival_minutes = arrival.hour() * 60 + arrival.minute();
    let proximity = config.prayer_proximity_minutes;

    for &(start, end) in &config.prayer_windows {
        let lower = start.saturating_sub(proximity);
        let upper = end + proximity;
        if (lower..=upper).contains(&arrival_minutes) {
            return Some(Consideration {
                kind: ConsiderationKind::PrayerTime,
                impact: Impact::Medium,
                description: format!(
                    "estimated arrival {:02}:{:02} is within {} minutes of a daily observance window",
                    arrival.hour(),
                    arrival.minute(),
                    proximity
                ),
                mitigation: "offer to reschedule until after the observance window".to_string(),
            });
        }
    }

    None
}
