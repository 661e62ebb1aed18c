//! Cancellable timer scheduling for monitoring updates.
//!
//! The planner never runs timers itself; it records update descriptors
//! with a scheduler and returns the tickets so a cancellation or
//! reassignment can revoke them later.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};

use crate::model::{DispatchUpdate, TimerTicket};
use crate::traits::UpdateScheduler;

/// A scheduled update descriptor as recorded by [`InMemoryScheduler`].
#[derive(Debug, Clone)]
pub struct ScheduledUpdate {
    pub update: DispatchUpdate,
    pub first_due: DateTime<Utc>,
    pub repeat_every: Option<Duration>,
}

/// Ticket-issuing scheduler that only records what was asked of it.
/// Firing belongs to an external runtime; this keeps the decision path
/// free of timers and I/O while remaining fully inspectable in tests.
#[derive(Debug, Default)]
pub struct InMemoryScheduler {
    next_ticket: AtomicU64,
    entries: Mutex<HashMap<u64, ScheduledUpdate>>,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the still-pending entries, ordered by ticket.
    pub fn pending(&self) -> Vec<(TimerTicket, ScheduledUpdate)> {
        let entries = self.lock();
        let mut pending: Vec<_> = entries
            .iter()
            .map(|(&id, entry)| (TimerTicket(id), entry.clone()))
            .collect();
        pending.sort_by_key(|(ticket, _)| ticket.0);
        pending
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, ScheduledUpdate>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl UpdateScheduler for InMemoryScheduler {
    fn schedule(
        &self,
        update: DispatchUpdate,
        first_due: DateTime<Utc>,
        repeat_every: Option<Duration>,
    ) -> TimerTicket {
        let id = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(
            id,
            ScheduledUpdate {
                update,
                first_due,
                repeat_every,
            },
        );
        TimerTicket(id)
    }

    fn cancel(&self, ticket: &TimerTicket) {
        self.lock().remove(&ticket.0);
    }
}
