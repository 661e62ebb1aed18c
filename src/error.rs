//! Error taxonomy for the dispatch planner.
//!
//! External lookup failures (traffic, local events) are not represented
//! here: those collaborators fold failures into documented defaults and
//! never surface a fatal error.

use thiserror::Error;

/// Fatal conditions surfaced across the planner's public boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The request failed intake validation; nothing was processed.
    #[error("invalid dispatch request: {reason}")]
    InvalidRequest { reason: String },

    /// Filtering produced an empty candidate set. Definitive for this
    /// call; retry policy belongs to the caller's queue layer.
    #[error("no eligible resource for request {request_id}")]
    NoEligibleResource { request_id: String },

    /// The registry refused to reserve the selected resource and the
    /// bounded retry also failed.
    #[error("reservation conflict on resource {resource_id}")]
    ReservationConflict { resource_id: String },
}
