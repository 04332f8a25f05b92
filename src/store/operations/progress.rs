use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// Per-(user, book, word) learning record. Created lazily on the first
/// learner interaction; never deleted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProgress {
    pub user_id: String,
    pub book_id: String,
    pub word: String,

    pub status: LearnStatus,
    /// Mirrors the most recent outcome only, not cumulative history.
    pub mastered: bool,

    pub wrong_learn_count: u32,
    pub wrong_quiz_count: u32,
    pub last_wrong_at: Option<DateTime<Utc>>,

    /// Index into the review interval table. Never decreases.
    pub stage: u8,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub next_review_at: Option<DateTime<Utc>>,

    pub seen_count: u32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LearnStatus {
    New,
    Known,
    Unknown,
    Skipped,
}

impl WordProgress {
    pub fn wrong_total(&self) -> u32 {
        self.wrong_learn_count + self.wrong_quiz_count
    }

    pub fn identity(&self) -> String {
        keys::word_identity(&self.book_id, &self.word)
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        matches!(self.next_review_at, Some(at) if at <= now)
    }
}

impl Store {
    pub fn get_progress(
        &self,
        user_id: &str,
        book_id: &str,
        word: &str,
    ) -> Result<Option<WordProgress>, StoreError> {
        let key = keys::progress_key(user_id, book_id, word);
        match self.progress.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_progress(&self, progress: &WordProgress) -> Result<(), StoreError> {
        let key = keys::progress_key(&progress.user_id, &progress.book_id, &progress.word);
        self.progress
            .insert(key.as_bytes(), Self::serialize(progress)?)?;
        Ok(())
    }

    pub fn list_user_progress(&self, user_id: &str) -> Result<Vec<WordProgress>, StoreError> {
        let prefix = keys::progress_prefix(user_id);
        let mut records = Vec::new();
        for item in self.progress.scan_prefix(prefix.as_bytes()) {
            let (_, v) = item?;
            records.push(Self::deserialize::<WordProgress>(&v)?);
        }
        Ok(records)
    }

    /// Leaderboard input: how many words this learner currently masters.
    pub fn count_mastered(&self, user_id: &str) -> Result<u64, StoreError> {
        let prefix = keys::progress_prefix(user_id);
        let mut count = 0_u64;
        for item in self.progress.scan_prefix(prefix.as_bytes()) {
            let (_, v) = item?;
            let record: WordProgress = Self::deserialize(&v)?;
            if record.mastered {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Due reviews across the given books, most overdue first.
    pub fn list_due_review(
        &self,
        user_id: &str,
        book_ids: &[String],
        limit: usize,
    ) -> Result<Vec<WordProgress>, StoreError> {
        let now = Utc::now();
        let mut due: Vec<WordProgress> = self
            .list_user_progress(user_id)?
            .into_iter()
            .filter(|p| book_ids.contains(&p.book_id) && p.is_due(now))
            .collect();
        due.sort_by_key(|p| p.next_review_at);
        due.truncate(limit);
        Ok(due)
    }

    /// Mistake-book query: records with any wrong answer, worst first,
    /// most recent mistake breaking ties.
    pub fn list_mistakes(
        &self,
        user_id: &str,
        book_ids: &[String],
    ) -> Result<Vec<WordProgress>, StoreError> {
        let mut wrong: Vec<WordProgress> = self
            .list_user_progress(user_id)?
            .into_iter()
            .filter(|p| book_ids.contains(&p.book_id) && p.wrong_total() > 0)
            .collect();
        wrong.sort_by(|a, b| {
            b.wrong_total()
                .cmp(&a.wrong_total())
                .then(b.last_wrong_at.cmp(&a.last_wrong_at))
        });
        Ok(wrong)
    }
}
