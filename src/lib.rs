//! Learning progress and scheduling engine for the vocab app.
//!
//! The crate owns the per-word learning state machine, the simplified
//! Ebbinghaus interval scheduler, the daily-plan calculators and the
//! prioritized task picker. Everything persists into a local sled store;
//! the presentation layer embedding this crate drives it with discrete
//! learner actions and renders whatever batches and snapshots it returns.

pub mod config;
pub mod constants;
pub mod engine;
pub mod logging;
pub mod session;
pub mod store;
pub mod validation;
