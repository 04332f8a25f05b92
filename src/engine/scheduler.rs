//! 复习间隔表（艾宾浩斯简化版）。
//!
//! Pure functions only: no storage access, no clock reads except the
//! explicit helpers at the bottom. Determinism here is what makes the
//! rest of the engine testable.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

/// Days until the next review, indexed by stage. Index 0 is the
/// "due immediately" sentinel; advances start at index 1.
pub const REVIEW_DAYS: [i64; 6] = [0, 1, 2, 4, 7, 15];

/// Highest reachable stage; advances saturate here.
pub const MAX_STAGE: u8 = (REVIEW_DAYS.len() - 1) as u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleAdvance {
    pub stage: u8,
    pub next_review_at: DateTime<Utc>,
}

/// Advance one stage (saturating at [`MAX_STAGE`]) and schedule the next
/// review exactly `REVIEW_DAYS[new_stage]` days after `now`.
pub fn advance(now: DateTime<Utc>, stage: u8) -> ScheduleAdvance {
    let next_stage = (stage + 1).min(MAX_STAGE);
    ScheduleAdvance {
        stage: next_stage,
        next_review_at: add_days(now, REVIEW_DAYS[next_stage as usize]),
    }
}

pub fn add_days(at: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    at + Duration::days(days)
}

/// Current local calendar date; all "today" computations go through here.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
