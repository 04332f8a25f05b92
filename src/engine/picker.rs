//! Task picker: assembles a learning batch from prioritized pools.
//!
//! Pool priority in append mode: new words, then mistakes, then due
//! reviews, then stale mastered words as a fallback so the learner always
//! has something to cycle. Plan mode is new-word-only by design.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_BATCH_SIZE;
use crate::engine::EngineError;
use crate::session::Session;
use crate::store::operations::plans::{Plan, PlanOrder};
use crate::store::operations::progress::{LearnStatus, WordProgress};
use crate::store::operations::words::WordEntry;
use crate::store::Store;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Daily-plan batch: first `count` unlearned words, nothing else.
    Plan,
    /// Extra batch: walk all pools in priority order until full.
    Append,
}

pub fn pick_words(
    store: &Store,
    session: &Session,
    active: &Plan,
    count: usize,
    mode: SelectionMode,
) -> Result<Vec<WordEntry>, EngineError> {
    pick_words_at(
        store,
        session,
        active,
        count,
        mode,
        Utc::now(),
        &mut rand::thread_rng(),
    )
}

pub fn pick_words_at<R: Rng + ?Sized>(
    store: &Store,
    session: &Session,
    active: &Plan,
    count: usize,
    mode: SelectionMode,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<WordEntry>, EngineError> {
    let count = count.min(MAX_BATCH_SIZE);
    if count == 0 {
        return Ok(Vec::new());
    }

    // Candidate universe: every word of every selected book, with the
    // plan's ordering applied before any pool filtering.
    let mut universe: Vec<WordEntry> = Vec::new();
    for book_id in &active.book_ids {
        universe.extend(store.list_book_words(book_id)?);
    }
    match active.order {
        PlanOrder::Alpha => universe.sort_by(|a, b| a.word.cmp(&b.word)),
        PlanOrder::Random => universe.shuffle(rng),
    }

    let records = store.list_user_progress(session.user_id())?;
    let by_identity: HashMap<String, &WordProgress> =
        records.iter().map(|p| (p.identity(), p)).collect();
    let entry_by_identity: HashMap<String, &WordEntry> =
        universe.iter().map(|w| (w.identity(), w)).collect();

    // Pool 1: no record yet, or still marked new.
    let new_words: Vec<&WordEntry> = universe
        .iter()
        .filter(|w| match by_identity.get(&w.identity()) {
            None => true,
            Some(p) => p.status == LearnStatus::New,
        })
        .collect();

    if mode == SelectionMode::Plan {
        return Ok(new_words.into_iter().take(count).cloned().collect());
    }

    let mut picked: Vec<WordEntry> = Vec::with_capacity(count);
    let mut picked_identities: HashSet<String> = HashSet::with_capacity(count);
    let mut take = |pool: &[&WordEntry], picked: &mut Vec<WordEntry>| {
        for &w in pool {
            if picked.len() >= count {
                break;
            }
            if picked_identities.insert(w.identity()) {
                picked.push(w.clone());
            }
        }
    };

    take(&new_words, &mut picked);
    if picked.len() >= count {
        return Ok(picked);
    }

    // Pool 2: mistakes, worst first. A record whose dictionary entry is
    // gone resolves to nothing and is skipped, not surfaced.
    let mut wrong: Vec<&WordProgress> = records
        .iter()
        .filter(|p| active.book_ids.contains(&p.book_id) && p.wrong_total() > 0)
        .collect();
    wrong.sort_by(|a, b| {
        b.wrong_total()
            .cmp(&a.wrong_total())
            .then(b.last_wrong_at.cmp(&a.last_wrong_at))
    });
    let wrong_entries = resolve(&wrong, &entry_by_identity);
    take(&wrong_entries, &mut picked);
    if picked.len() >= count {
        return Ok(picked);
    }

    // Pool 3: due reviews, most overdue first.
    let mut due: Vec<&WordProgress> = records
        .iter()
        .filter(|p| active.book_ids.contains(&p.book_id) && p.is_due(now))
        .collect();
    due.sort_by_key(|p| p.next_review_at);
    let due_entries = resolve(&due, &entry_by_identity);
    take(&due_entries, &mut picked);
    if picked.len() >= count {
        return Ok(picked);
    }

    // Pool 4: stale mastered words, longest untouched first.
    let mut stale: Vec<&WordProgress> = records
        .iter()
        .filter(|p| active.book_ids.contains(&p.book_id) && p.mastered)
        .collect();
    stale.sort_by_key(|p| p.last_seen_at);
    let stale_entries = resolve(&stale, &entry_by_identity);
    take(&stale_entries, &mut picked);

    Ok(picked)
}

fn resolve<'a>(
    records: &[&WordProgress],
    entry_by_identity: &HashMap<String, &'a WordEntry>,
) -> Vec<&'a WordEntry> {
    records
        .iter()
        .filter_map(|p| entry_by_identity.get(&p.identity()).copied())
        .collect()
}
