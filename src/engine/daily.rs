//! Daily state tracker.
//!
//! The per-day record is a derived cache: created on first access each
//! day, its target refreshed from the live Plan on every mutation.

use chrono::NaiveDate;

use crate::engine::{plan, scheduler, EngineError};
use crate::session::Session;
use crate::store::operations::daily::DailyState;
use crate::store::operations::plans::Plan;
use crate::store::operations::words::WordEntry;
use crate::store::Store;

pub fn get_or_create_today(
    store: &Store,
    session: &Session,
    active: &Plan,
) -> Result<DailyState, EngineError> {
    get_or_create_at(store, session, active, scheduler::today())
}

pub fn get_or_create_at(
    store: &Store,
    session: &Session,
    active: &Plan,
    today: NaiveDate,
) -> Result<DailyState, EngineError> {
    if let Some(existing) = store.get_daily(session.user_id(), today)? {
        return Ok(existing);
    }

    let state = DailyState {
        user_id: session.user_id().to_string(),
        date: today,
        learned_today: 0,
        target_today: active.daily_target,
        streak_day_index: streak_day_index(active.start_date, today),
        total_days: plan::compute_total_days(active.total_words, active.daily_target).max(1),
        learned_word_keys: Default::default(),
    };
    store.set_daily(&state)?;
    Ok(state)
}

/// 1-based "day X of the plan". Clock skew can make today precede the
/// plan's start date; the index floors at 1 instead of going negative.
fn streak_day_index(start: NaiveDate, today: NaiveDate) -> u32 {
    let diff = (today - start).num_days().max(0);
    diff as u32 + 1
}

/// Count one learn event for today. `learned_today` is a raw counter,
/// while the key set keeps unique word identities for today-scoped
/// queries; revisiting a word bumps the former but not the latter.
pub fn increment_learned(
    store: &Store,
    session: &Session,
    active: &Plan,
    entry: &WordEntry,
) -> Result<DailyState, EngineError> {
    increment_learned_at(store, session, active, entry, scheduler::today())
}

pub fn increment_learned_at(
    store: &Store,
    session: &Session,
    active: &Plan,
    entry: &WordEntry,
    today: NaiveDate,
) -> Result<DailyState, EngineError> {
    let mut state = get_or_create_at(store, session, active, today)?;

    state.learned_today += 1;
    // 同日改计划立即生效，不等第二天。
    state.target_today = active.daily_target;
    state.learned_word_keys.insert(entry.identity());

    store.set_daily(&state)?;
    Ok(state)
}

/// Zero today's counter and key set. WordProgress history is untouched.
pub fn reset_today_learned(store: &Store, session: &Session) -> Result<(), EngineError> {
    reset_today_learned_at(store, session, scheduler::today())
}

pub fn reset_today_learned_at(
    store: &Store,
    session: &Session,
    today: NaiveDate,
) -> Result<(), EngineError> {
    let Some(mut state) = store.get_daily(session.user_id(), today)? else {
        return Ok(());
    };
    state.learned_today = 0;
    state.learned_word_keys.clear();
    store.set_daily(&state)?;
    Ok(())
}
