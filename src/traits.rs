//! Collaborator traits at the planner boundary.
//!
//! These are intentionally minimal. The planner is injected with concrete
//! implementations and never reaches past these interfaces: no network or
//! disk I/O happens inside the decision pipeline itself, so lookups must
//! either be cheap synchronous calls or fold failures into defaults.

use chrono::{DateTime, Duration, Utc};

use crate::model::{Consideration, DispatchUpdate, Resource, TimerTicket, TrafficCondition};

/// Fleet registry owning the live resource pool.
///
/// `list_available` returns a snapshot; the planner treats it as a
/// consistent view for the duration of one dispatch. The planner does not
/// itself guarantee at-most-one assignment across concurrent dispatches;
/// `reserve` carries that contract: implementations must flip the
/// resource from available to busy atomically (compare-and-swap
/// semantics) and return `false` when another dispatch got there first.
pub trait ResourceRegistry {
    fn list_available(&self) -> Vec<Resource>;

    /// Atomically claim a resource. Returns `false` on conflict.
    fn reserve(&self, resource_id: &str) -> bool;
}

/// Road traffic lookup for a leg at a given time.
///
/// Infallible by contract: adapters fold timeouts and failures into
/// [`TrafficCondition::Moderate`] (or their configured default) rather
/// than erroring.
pub trait TrafficProvider {
    fn condition(&self, from: (f64, f64), to: (f64, f64), at: DateTime<Utc>) -> TrafficCondition;
}

/// Local events near the requester that may affect an assignment.
pub trait LocalEventsProvider {
    /// Considerations for events near `location` around `at`. Must return
    /// an empty list rather than erroring when nothing is known.
    fn events_near(&self, location: (f64, f64), at: DateTime<Utc>) -> Vec<Consideration>;
}

/// Null-object events provider: no local event source configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalEvents;

impl LocalEventsProvider for NoLocalEvents {
    fn events_near(&self, _location: (f64, f64), _at: DateTime<Utc>) -> Vec<Consideration> {
        Vec::new()
    }
}

/// Descriptive landmarks along a leg, for route narration.
pub trait LandmarkProvider {
    fn landmarks_between(&self, from: (f64, f64), to: (f64, f64)) -> Vec<String>;
}

/// Cancellable timer scheduling for monitoring updates.
///
/// The planner only produces update descriptors and schedules them here;
/// firing and delivery are external. Every `schedule` call returns a
/// ticket so a later cancellation or reassignment can revoke the timer.
pub trait UpdateScheduler {
    fn schedule(
        &self,
        update: DispatchUpdate,
        first_due: DateTime<Utc>,
        repeat_every: Option<Duration>,
    ) -> TimerTicket;

    /// Cancel a previously scheduled timer. Unknown tickets are ignored.
    fn cancel(&self, ticket: &TimerTicket);
}

// Shared references delegate, so an engine can borrow collaborators the
// caller keeps inspecting (or wrap them in Arc) without adapter types.

impl<P: ResourceRegistry + ?Sized> ResourceRegistry for &P {
    fn list_available(&self) -> Vec<Resource> {
        (**self).list_available()
    }

    fn reserve(&self, resource_id: &str) -> bool {
        (**self).reserve(resource_id)
    }
}

impl<P: TrafficProvider + ?Sized> TrafficProvider for &P {
    fn condition(&self, from: (f64, f64), to: (f64, f64), at: DateTime<Utc>) -> TrafficCondition {
        (**self).condition(from, to, at)
    }
}

impl<P: LocalEventsProvider + ?Sized> LocalEventsProvider for &P {
    fn events_near(&self, location: (f64, f64), at: DateTime<Utc>) -> Vec<Consideration> {
        (**self).events_near(location, at)
    }
}

impl<P: LandmarkProvider + ?Sized> LandmarkProvider for &P {
    fn landmarks_between(&self, from: (f64, f64), to: (f64, f64)) -> Vec<String> {
        (**self).landmarks_between(from, to)
    }
}

impl<P: UpdateScheduler + ?Sized> UpdateScheduler for &P {
    fn schedule(
        &self,
        update: DispatchUpdate,
        first_due: DateTime<Utc>,
        repeat_every: Option<Duration>,
    ) -> TimerTicket {
        (**self).schedule(update, first_due, repeat_every)
    }

    fn cancel(&self, ticket: &TimerTicket) {
        (**self).cancel(ticket)
    }
}
