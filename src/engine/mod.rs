//! Learning progress and scheduling core.
//!
//! Pure calculators live in [`scheduler`] and [`plan`]; the stateful
//! operations take an explicit [`crate::session::Session`] plus the
//! [`crate::store::Store`] they mutate. Nothing here retries storage
//! failures and nothing treats an empty batch as an error.

pub mod daily;
pub mod picker;
pub mod plan;
pub mod progress;
pub mod scheduler;

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Dependent operations decline instead of computing with defaults.
    #[error("no active plan for user")]
    MissingPlan,
    #[error("validation error: {0}")]
    Validation(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}
