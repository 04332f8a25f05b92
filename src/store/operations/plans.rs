use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// The learner's configured scope and pace. One active plan per user;
/// saving a plan replaces the previous one wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub user_id: String,
    pub book_ids: Vec<String>,
    pub mode: PlanMode,
    pub per_day: u32,
    pub days: u32,
    pub order: PlanOrder,

    pub created_at: DateTime<Utc>,
    /// Local calendar date the plan took effect; anchors the streak index.
    pub start_date: NaiveDate,
    pub total_words: u64,
    pub daily_target: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PlanMode {
    PerDay,
    Deadline,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanOrder {
    Alpha,
    Random,
}

impl Store {
    pub fn set_plan(&self, plan: &Plan) -> Result<(), StoreError> {
        let key = keys::plan_key(&plan.user_id);
        self.plans.insert(key.as_bytes(), Self::serialize(plan)?)?;
        Ok(())
    }

    pub fn get_plan(&self, user_id: &str) -> Result<Option<Plan>, StoreError> {
        let key = keys::plan_key(user_id);
        match self.plans.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }
}
