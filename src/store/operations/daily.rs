use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// Per-(user, calendar day) summary. A cache derived from the Plan and the
/// current date; `target_today` is refreshed from the live Plan on every
/// mutation, so the Plan stays the source of truth for targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyState {
    pub user_id: String,
    pub date: NaiveDate,
    /// Raw counter; revisiting a word the same day counts again.
    pub learned_today: u32,
    pub target_today: u32,
    /// 1-based day index since plan start ("第X天").
    pub streak_day_index: u32,
    pub total_days: u32,
    /// Unique `bookId:word` identities touched today.
    pub learned_word_keys: BTreeSet<String>,
}

impl Store {
    pub fn get_daily(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyState>, StoreError> {
        let key = keys::daily_key(user_id, &date.to_string());
        match self.daily.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_daily(&self, state: &DailyState) -> Result<(), StoreError> {
        let key = keys::daily_key(&state.user_id, &state.date.to_string());
        self.daily.insert(key.as_bytes(), Self::serialize(state)?)?;
        Ok(())
    }
}
