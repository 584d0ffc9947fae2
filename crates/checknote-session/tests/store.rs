use std::sync::Arc;

use checknote_core::catalog::QuestionCatalog;
use checknote_core::error::CoreError;
use checknote_core::models::answer::{Answer, AnswerSet};
use checknote_session::store::{AnswerStore, ToggleOutcome};

const ADHD: usize = 15;
const FEMALES: usize = 21;

fn store() -> AnswerStore {
    AnswerStore::new(Arc::new(QuestionCatalog::builtin().clone()))
}

#[test]
fn single_select_commits_and_replaces() {
    let mut store = store();
    assert_eq!(store.toggle_choice(0, 1).unwrap(), ToggleOutcome::Committed);
    assert_eq!(
        store.answer(0),
        Some(&Answer {
            selected_choice_ids: vec![1],
            free_text: String::new(),
        })
    );

    assert_eq!(store.toggle_choice(0, 3).unwrap(), ToggleOutcome::Committed);
    assert_eq!(store.answers().selected(0), &[3]);
}

#[test]
fn single_select_reselect_deselects_without_commit() {
    let mut store = store();
    store.toggle_choice(0, 2).unwrap();
    assert_eq!(store.toggle_choice(0, 2).unwrap(), ToggleOutcome::Updated);
    assert!(store.answers().selected(0).is_empty());
}

#[test]
fn single_select_never_exceeds_one_selection() {
    let mut store = store();
    for choice_id in [0, 1, 1, 3, 2, 2, 0, 3] {
        store.toggle_choice(1, choice_id).unwrap();
        assert!(store.answers().selected(1).len() <= 1);
    }
}

#[test]
fn exclusive_denies_collapses_selection() {
    let mut store = store();
    store.toggle_choice(ADHD, 2).unwrap();
    store.toggle_choice(ADHD, 4).unwrap();
    assert_eq!(store.answers().selected(ADHD), &[2, 4]);

    assert_eq!(store.toggle_choice(ADHD, 0).unwrap(), ToggleOutcome::Committed);
    assert_eq!(store.answers().selected(ADHD), &[0]);
}

#[test]
fn exclusive_other_choice_drops_denies() {
    let mut store = store();
    store.toggle_choice(ADHD, 0).unwrap();
    assert_eq!(store.toggle_choice(ADHD, 3).unwrap(), ToggleOutcome::Updated);
    assert_eq!(store.answers().selected(ADHD), &[3]);

    store.toggle_choice(ADHD, 1).unwrap();
    assert_eq!(store.answers().selected(ADHD), &[3, 1]);
}

#[test]
fn exclusive_deselect_is_plain_toggle() {
    let mut store = store();
    store.toggle_choice(ADHD, 0).unwrap();
    assert_eq!(store.toggle_choice(ADHD, 0).unwrap(), ToggleOutcome::Updated);
    assert!(store.answers().selected(ADHD).is_empty());

    store.toggle_choice(ADHD, 1).unwrap();
    store.toggle_choice(ADHD, 2).unwrap();
    store.toggle_choice(ADHD, 1).unwrap();
    assert_eq!(store.answers().selected(ADHD), &[2]);
}

#[test]
fn ordinary_multi_select_toggles_membership() {
    let catalog = QuestionCatalog::parse("* Symptoms: cough, fever, rash");
    let mut store = AnswerStore::new(Arc::new(catalog));

    assert_eq!(store.toggle_choice(0, 0).unwrap(), ToggleOutcome::Updated);
    assert_eq!(store.toggle_choice(0, 2).unwrap(), ToggleOutcome::Updated);
    assert_eq!(store.answers().selected(0), &[0, 2]);

    store.toggle_choice(0, 0).unwrap();
    assert_eq!(store.answers().selected(0), &[2]);
}

#[test]
fn free_text_leaves_selection_alone() {
    let mut store = store();
    store.toggle_choice(0, 1).unwrap();
    store.set_free_text(0, "worse at night").unwrap();
    assert_eq!(store.answers().selected(0), &[1]);
    assert_eq!(store.answers().free_text(0), "worse at night");

    store.toggle_choice(0, 1).unwrap();
    assert_eq!(store.answers().free_text(0), "worse at night");
}

#[test]
fn unknown_ids_are_rejected() {
    let mut store = store();
    assert!(matches!(
        store.toggle_choice(99, 0),
        Err(CoreError::UnknownQuestion(99))
    ));
    assert!(matches!(
        store.toggle_choice(0, 4),
        Err(CoreError::UnknownChoice {
            question_id: 0,
            choice_id: 4
        })
    ));
    assert!(store.set_free_text(22, "x").is_err());
    assert!(store.answer(0).is_none());
}

#[test]
fn reset_restores_pregnancy_default_only() {
    let mut store = store();
    store.toggle_choice(0, 1).unwrap();
    store.toggle_choice(FEMALES, 1).unwrap();
    store.set_free_text(3, "naps").unwrap();

    store.reset();
    assert_eq!(store.answers().len(), 1);
    assert_eq!(store.answers().selected(FEMALES), &[0]);
}

#[test]
fn saved_answers_are_sanitized_on_load() {
    let mut saved = AnswerSet::new();
    saved.insert(
        0,
        Answer {
            selected_choice_ids: vec![1, 2],
            free_text: String::new(),
        },
    );
    saved.insert(40, Answer::default());

    let store = AnswerStore::with_answers(Arc::new(QuestionCatalog::builtin().clone()), saved);
    assert_eq!(store.answers().selected(0), &[1]);
    assert!(store.answer(40).is_none());
}
