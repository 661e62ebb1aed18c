//! In-memory fleet registry with atomic reservation.
//!
//! Reference implementation of the registry contract, useful for tests
//! and single-process deployments. Production deployments typically back
//! this trait with a shared store that can compare-and-swap resource
//! status across processes.

use std::sync::Mutex;

use tracing::debug;

use crate::model::{Resource, ResourceStatus};
use crate::traits::ResourceRegistry;

/// Mutex-guarded resource pool. `reserve` flips a resource from
/// available to busy under the lock, so two concurrent dispatches can
/// never both claim the same resource.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    resources: Mutex<Vec<Resource>>,
}

impl InMemoryRegistry {
    pub fn new(resources: Vec<Resource>) -> Self {
        Self {
            resources: Mutex::new(resources),
        }
    }

    /// Put a reserved resource back into rotation, e.g. after a
    /// cancellation or reassignment. Returns `false` for unknown ids.
    pub fn release(&self, resource_id: &str) -> bool {
        let mut pool = self.lock();
        match pool.iter_mut().find(|r| r.id == resource_id) {
            Some(resource) if resource.status == ResourceStatus::Busy => {
                resource.status = ResourceStatus::Available;
                true
            }
            _ => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Resource>> {
        // A poisoned lock still holds consistent data for this structure;
        // keep serving rather than propagating the panic.
        self.resources
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResourceRegistry for InMemoryRegistry {
    fn list_available(&self) -> Vec<Resource> {
        self.lock()
            .iter()
            .filter(|r| r.status == ResourceStatus::Available)
            .cloned()
            .collect()
    }

    fn reserve(&self, resource_id: &str) -> bool {
        let mut pool = self.lock();
        match pool.iter_mut().find(|r| r.id == resource_id) {
            Some(resource) if resource.status == ResourceStatus::Available => {
                resource.status = ResourceStatus::Busy;
                debug!(resource_id, "resource reserved");
                true
            }
            _ => {
                debug!(resource_id, "reservation refused");
                false
            }
        }
    }
}
