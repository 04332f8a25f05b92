//! Explicit session context.
//!
//! The device owns exactly one signed-in learner at a time, but the engine
//! never reads that from ambient state: every core operation takes a
//! `Session` so callers (and tests) decide whose records are touched.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
