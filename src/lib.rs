//! dispatch-planner core
//!
//! Scores and assigns field resources to incoming service requests,
//! factoring in geographic distance, performance history, cultural and
//! language compatibility, priority, and real-time availability, then
//! produces route, alternative, and monitoring outputs. External
//! collaborators (fleet registry, traffic, local events, timers) are
//! injected through the traits module.

pub mod traits;
pub mod model;
pub mod error;
pub mod geo;
pub mod cultural;
pub mod filter;
pub mod scoring;
pub mod advisor;
pub mod route;
pub mod traffic;
pub mod registry;
pub mod timers;
pub mod engine;

#[cfg(test)]
pub(crate) mod testkit;
