use std::sync::Arc;

use checknote_core::catalog::QuestionCatalog;
use checknote_core::error::CoreError;
use checknote_core::models::answer::{Answer, AnswerSet};
use checknote_core::models::question::Question;

/// Result of [`AnswerStore::toggle_choice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The selection finalizes the question; the caller should advance.
    Committed,
    Updated,
}

impl ToggleOutcome {
    pub fn is_commit(self) -> bool {
        self == ToggleOutcome::Committed
    }
}

/// Owns the answer set and applies the per-question selection rules.
#[derive(Debug, Clone)]
pub struct AnswerStore {
    catalog: Arc<QuestionCatalog>,
    answers: AnswerSet,
}

impl AnswerStore {
    /// A store holding the catalog's default answers.
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        let answers = catalog.default_answers();
        Self { catalog, answers }
    }

    /// A store seeded from saved answers. Entries that do not fit the
    /// catalog are dropped.
    pub fn with_answers(catalog: Arc<QuestionCatalog>, answers: AnswerSet) -> Self {
        let answers = catalog.sanitize(answers);
        Self { catalog, answers }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn answer(&self, question_id: usize) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    fn question(&self, question_id: usize) -> Result<&Question, CoreError> {
        self.catalog
            .get(question_id)
            .ok_or(CoreError::UnknownQuestion(question_id))
    }

    /// Replace the free text of a question. The selection is untouched.
    pub fn set_free_text(&mut self, question_id: usize, text: impl Into<String>) -> Result<(), CoreError> {
        self.question(question_id)?;
        self.answers.entry(question_id).free_text = text.into();
        Ok(())
    }

    pub fn toggle_choice(&mut self, question_id: usize, choice_id: usize) -> Result<ToggleOutcome, CoreError> {
        let question = self.question(question_id)?;
        if !question.has_choice(choice_id) {
            return Err(CoreError::UnknownChoice {
                question_id,
                choice_id,
            });
        }
        let is_multi_select = question.is_multi_select;
        let is_exclusive = question.is_exclusive();

        let selected = &mut self.answers.entry(question_id).selected_choice_ids;
        let already_selected = selected.contains(&choice_id);

        let outcome = if !is_multi_select {
            if already_selected {
                selected.clear();
                ToggleOutcome::Updated
            } else {
                *selected = vec![choice_id];
                ToggleOutcome::Committed
            }
        } else if already_selected {
            selected.retain(|&id| id != choice_id);
            ToggleOutcome::Updated
        } else if is_exclusive && choice_id == 0 {
            *selected = vec![0];
            ToggleOutcome::Committed
        } else {
            if is_exclusive {
                selected.retain(|&id| id != 0);
            }
            selected.push(choice_id);
            ToggleOutcome::Updated
        };

        tracing::debug!(
            question_id,
            choice_id,
            selected = ?self.answers.selected(question_id),
            committed = outcome.is_commit(),
            "choice toggled"
        );
        Ok(outcome)
    }

    /// Back to the catalog defaults.
    pub fn reset(&mut self) {
        self.answers = self.catalog.default_answers();
    }
}
