//! End-to-end learner flow: build a catalog, save a plan, pull a batch,
//! record outcomes, watch the daily state and mastery counters move.

mod common;

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use vocab_engine::engine::picker::{pick_words_at, SelectionMode};
use vocab_engine::engine::progress::{mark_learn_at, mark_quiz_at, LearnAction};
use vocab_engine::engine::{daily, plan, EngineError};
use vocab_engine::session::Session;
use vocab_engine::store::operations::plans::{PlanMode, PlanOrder};

use common::{open_store, seed_book, seed_book_words};

#[test]
fn full_learning_day() {
    let (_dir, store) = open_store();
    let session = Session::new("u1");
    let now = Utc::now();
    let today = now.date_naive();

    seed_book(&store, "b1", "KET Core");
    let entries = seed_book_words(&store, "b1", &["ant", "bee", "cat", "dog", "elk", "fox"]);

    let active = plan::save_plan_at(
        &store,
        &session,
        plan::PlanParams {
            book_ids: vec!["b1".to_string()],
            mode: PlanMode::Deadline,
            per_day: 20,
            days: 3,
            order: PlanOrder::Alpha,
        },
        today,
    )
    .unwrap();
    assert_eq!(active.total_words, 6);
    assert_eq!(active.daily_target, 2, "ceil(6 / 3)");

    // First batch of the day: daily target of new words, alphabetical.
    let mut rng = StdRng::seed_from_u64(1);
    let batch = pick_words_at(
        &store,
        &session,
        &active,
        active.daily_target as usize,
        SelectionMode::Plan,
        now,
        &mut rng,
    )
    .unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].word, "ant");
    assert_eq!(batch[1].word, "bee");

    // Learner knows "ant", misses "bee".
    mark_learn_at(&store, &session, &batch[0], LearnAction::Known, now).unwrap();
    daily::increment_learned_at(&store, &session, &active, &batch[0], today).unwrap();
    mark_learn_at(&store, &session, &batch[1], LearnAction::Unknown, now).unwrap();
    daily::increment_learned_at(&store, &session, &active, &batch[1], today).unwrap();

    let state = daily::get_or_create_at(&store, &session, &active, today).unwrap();
    assert_eq!(state.learned_today, 2);
    assert_eq!(state.target_today, 2);
    assert_eq!(state.streak_day_index, 1);
    assert_eq!(state.total_days, 3);
    assert_eq!(state.learned_word_keys.len(), 2);

    // "bee" is immediately due again and tops the mistake list.
    let due = store.list_due_review("u1", &active.book_ids, 10).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].word, "bee");
    let mistakes = store.list_mistakes("u1", &active.book_ids).unwrap();
    assert_eq!(mistakes.len(), 1);
    assert_eq!(mistakes[0].wrong_learn_count, 1);

    assert_eq!(store.count_mastered("u1").unwrap(), 1);

    // An append batch starts with the remaining new words, then the miss.
    let extra = pick_words_at(
        &store,
        &session,
        &active,
        5,
        SelectionMode::Append,
        now,
        &mut rng,
    )
    .unwrap();
    let words: Vec<&str> = extra.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["cat", "dog", "elk", "fox", "bee"]);

    // Quizzing "bee" correctly flips it back to mastered.
    let bee = entries.iter().find(|e| e.word == "bee").unwrap();
    mark_quiz_at(&store, &session, bee, true, now + Duration::minutes(5)).unwrap();
    assert_eq!(store.count_mastered("u1").unwrap(), 2);
}

#[test]
fn replacing_a_plan_resets_today_but_keeps_history() {
    let (_dir, store) = open_store();
    let session = Session::new("u1");
    let now = Utc::now();
    let today = now.date_naive();

    seed_book(&store, "b1", "KET Core");
    seed_book_words(&store, "b1", &["ant", "bee", "cat", "dog"]);

    let first = plan::save_plan_at(
        &store,
        &session,
        plan::PlanParams {
            book_ids: vec!["b1".to_string()],
            mode: PlanMode::PerDay,
            per_day: 2,
            days: 1,
            order: PlanOrder::Alpha,
        },
        today,
    )
    .unwrap();

    let ant = store.get_word_entry("b1", "ant").unwrap().unwrap();
    mark_learn_at(&store, &session, &ant, LearnAction::Unknown, now).unwrap();
    daily::increment_learned_at(&store, &session, &first, &ant, today).unwrap();
    assert_eq!(
        daily::get_or_create_at(&store, &session, &first, today)
            .unwrap()
            .learned_today,
        1
    );

    // Replace the plan: daily counter resets, progress history survives.
    let second = plan::save_plan_at(
        &store,
        &session,
        plan::PlanParams {
            book_ids: vec!["b1".to_string()],
            mode: PlanMode::PerDay,
            per_day: 3,
            days: 1,
            order: PlanOrder::Alpha,
        },
        today,
    )
    .unwrap();
    assert_eq!(second.daily_target, 3);

    let state = daily::get_or_create_at(&store, &session, &second, today).unwrap();
    assert_eq!(state.learned_today, 0);
    assert!(state.learned_word_keys.is_empty());

    let progress = store.get_progress("u1", "b1", "ant").unwrap().unwrap();
    assert_eq!(progress.wrong_learn_count, 1);
    assert!(!progress.mastered);
}

#[test]
fn operations_decline_without_a_plan() {
    let (_dir, store) = open_store();
    let session = Session::new("nobody");

    assert!(plan::get_plan(&store, &session).unwrap().is_none());
    assert!(matches!(
        plan::require_plan(&store, &session),
        Err(EngineError::MissingPlan)
    ));
}

#[test]
fn exhausted_pools_return_a_short_batch() {
    let (_dir, store) = open_store();
    let session = Session::new("u1");
    let now = Utc::now();
    let today = now.date_naive();

    seed_book(&store, "b1", "Tiny Book");
    seed_book_words(&store, "b1", &["ant", "bee"]);

    let active = plan::save_plan_at(
        &store,
        &session,
        plan::PlanParams {
            book_ids: vec!["b1".to_string()],
            mode: PlanMode::PerDay,
            per_day: 10,
            days: 1,
            order: PlanOrder::Alpha,
        },
        today,
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(2);
    let batch = pick_words_at(
        &store,
        &session,
        &active,
        10,
        SelectionMode::Append,
        now,
        &mut rng,
    )
    .unwrap();
    assert_eq!(batch.len(), 2, "a short batch is a valid outcome");
}
