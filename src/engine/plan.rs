//! Plan engine: pacing math plus the save-plan cascade.

use chrono::{NaiveDate, Utc};

use crate::engine::{daily, scheduler, EngineError};
use crate::session::Session;
use crate::store::operations::plans::{Plan, PlanMode, PlanOrder};
use crate::store::Store;
use crate::validation::validate_plan_params;

/// Daily target for a word pool of `total_words`.
///
/// `perDay` mode takes the learner's number as-is (floored at 1);
/// `deadline` mode spreads the pool over the requested days, rounding up
/// so the plan always finishes on time.
pub fn compute_daily_target(total_words: u64, mode: PlanMode, per_day: u32, days: u32) -> u32 {
    if total_words == 0 {
        return 0;
    }
    match mode {
        PlanMode::PerDay => per_day.max(1),
        PlanMode::Deadline => {
            let d = days.max(1) as u64;
            (total_words.div_ceil(d)) as u32
        }
    }
}

/// Implied total days, recomputed from the target independently of the
/// mode's own day parameter so perDay plans also get an estimate.
pub fn compute_total_days(total_words: u64, daily_target: u32) -> u32 {
    if total_words == 0 {
        return 0;
    }
    let dt = daily_target.max(1) as u64;
    total_words.div_ceil(dt) as u32
}

#[derive(Debug, Clone)]
pub struct PlanParams {
    pub book_ids: Vec<String>,
    pub mode: PlanMode,
    pub per_day: u32,
    pub days: u32,
    pub order: PlanOrder,
}

/// Replace the user's plan wholesale and reset today's learned counter.
///
/// `total_words` is summed from the selected books at save time and not
/// re-derived if the books change later. The plan write and the daily
/// reset are two separate writes with no atomicity between them.
pub fn save_plan(store: &Store, session: &Session, params: PlanParams) -> Result<Plan, EngineError> {
    save_plan_at(store, session, params, scheduler::today())
}

pub fn save_plan_at(
    store: &Store,
    session: &Session,
    params: PlanParams,
    today: NaiveDate,
) -> Result<Plan, EngineError> {
    validate_plan_params(&params.book_ids, params.per_day, params.days)
        .map_err(EngineError::Validation)?;

    let mut total_words = 0_u64;
    for book_id in &params.book_ids {
        if let Some(book) = store.get_book(book_id)? {
            total_words += book.word_count;
        }
    }

    let daily_target = compute_daily_target(total_words, params.mode, params.per_day, params.days);

    let plan = Plan {
        user_id: session.user_id().to_string(),
        book_ids: params.book_ids,
        mode: params.mode,
        per_day: params.per_day.max(1),
        days: params.days.max(1),
        order: params.order,
        created_at: Utc::now(),
        start_date: today,
        total_words,
        daily_target,
    };
    store.set_plan(&plan)?;
    tracing::info!(
        user_id = session.user_id(),
        total_words,
        daily_target,
        "Saved plan"
    );

    // 换计划只清空今天的计数，不动任何历史进度。
    daily::reset_today_learned_at(store, session, today)?;

    Ok(plan)
}

pub fn get_plan(store: &Store, session: &Session) -> Result<Option<Plan>, EngineError> {
    Ok(store.get_plan(session.user_id())?)
}

/// Like [`get_plan`] but for callers that cannot proceed without one.
pub fn require_plan(store: &Store, session: &Session) -> Result<Plan, EngineError> {
    store
        .get_plan(session.user_id())?
        .ok_or(EngineError::MissingPlan)
}
