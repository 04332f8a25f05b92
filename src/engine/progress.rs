//! Learn/quiz outcome state machine.
//!
//! Every outcome read-or-creates the progress record, bumps the shared
//! bookkeeping fields and either advances the review schedule (success)
//! or requeues the word immediately (failure). A missed word is never
//! punished with a longer wait; it jumps ahead of the normal curve.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::scheduler;
use crate::engine::EngineError;
use crate::session::Session;
use crate::store::operations::progress::{LearnStatus, WordProgress};
use crate::store::operations::words::WordEntry;
use crate::store::Store;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LearnAction {
    Known,
    Unknown,
    /// Treated like `known`: skipping advances the schedule. Deliberate
    /// product behavior, see DESIGN.md.
    Skipped,
}

pub fn mark_learn(
    store: &Store,
    session: &Session,
    entry: &WordEntry,
    action: LearnAction,
) -> Result<WordProgress, EngineError> {
    mark_learn_at(store, session, entry, action, Utc::now())
}

pub fn mark_learn_at(
    store: &Store,
    session: &Session,
    entry: &WordEntry,
    action: LearnAction,
    now: DateTime<Utc>,
) -> Result<WordProgress, EngineError> {
    let mut p = load_or_base(store, session, entry, now)?;

    p.status = match action {
        LearnAction::Known => LearnStatus::Known,
        LearnAction::Unknown => LearnStatus::Unknown,
        LearnAction::Skipped => LearnStatus::Skipped,
    };
    p.seen_count += 1;
    p.last_seen_at = Some(now);
    p.updated_at = now;

    match action {
        LearnAction::Known | LearnAction::Skipped => apply_success(&mut p, now),
        LearnAction::Unknown => {
            p.mastered = false;
            p.wrong_learn_count += 1;
            p.last_wrong_at = Some(now);
            // Stage untouched; the word is due again right now.
            p.next_review_at = Some(now);
        }
    }

    store.set_progress(&p)?;
    tracing::debug!(
        user_id = session.user_id(),
        word = %entry.word,
        status = ?p.status,
        stage = p.stage,
        "Recorded learn outcome"
    );
    Ok(p)
}

pub fn mark_quiz(
    store: &Store,
    session: &Session,
    entry: &WordEntry,
    correct: bool,
) -> Result<WordProgress, EngineError> {
    mark_quiz_at(store, session, entry, correct, Utc::now())
}

pub fn mark_quiz_at(
    store: &Store,
    session: &Session,
    entry: &WordEntry,
    correct: bool,
    now: DateTime<Utc>,
) -> Result<WordProgress, EngineError> {
    let mut p = load_or_base(store, session, entry, now)?;

    p.seen_count += 1;
    p.last_seen_at = Some(now);
    p.updated_at = now;

    if correct {
        apply_success(&mut p, now);
    } else {
        p.mastered = false;
        p.wrong_quiz_count += 1;
        p.last_wrong_at = Some(now);
        p.next_review_at = Some(now);
    }

    store.set_progress(&p)?;
    Ok(p)
}

fn apply_success(p: &mut WordProgress, now: DateTime<Utc>) {
    p.mastered = true;
    let advanced = scheduler::advance(now, p.stage);
    p.stage = advanced.stage;
    p.next_review_at = Some(advanced.next_review_at);
}

fn load_or_base(
    store: &Store,
    session: &Session,
    entry: &WordEntry,
    now: DateTime<Utc>,
) -> Result<WordProgress, EngineError> {
    let existing = store.get_progress(session.user_id(), &entry.book_id, &entry.word)?;
    Ok(existing.unwrap_or_else(|| WordProgress {
        user_id: session.user_id().to_string(),
        book_id: entry.book_id.clone(),
        word: entry.word.clone(),
        status: LearnStatus::New,
        mastered: false,
        wrong_learn_count: 0,
        wrong_quiz_count: 0,
        last_wrong_at: None,
        stage: 0,
        last_seen_at: None,
        next_review_at: None,
        seen_count: 0,
        updated_at: now,
    }))
}
