use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current selection state and free-text note for one question.
///
/// Serialized as `{ "selected": [..], "text": ".." }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Selected choice ids in selection order. Never contains duplicates.
    #[serde(rename = "selected", default)]
    pub selected_choice_ids: Vec<usize>,
    #[serde(rename = "text", default)]
    pub free_text: String,
}

impl Answer {
    pub fn is_selected(&self, choice_id: usize) -> bool {
        self.selected_choice_ids.contains(&choice_id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected_choice_ids.is_empty() && self.free_text.is_empty()
    }
}

/// Every answer of a session, keyed by question id.
///
/// Answers are materialized lazily: a missing entry is equivalent to
/// [`Answer::default`]. JSON keys are string-encoded question ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<usize, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: usize) -> Option<&Answer> {
        self.answers.get(&question_id)
    }

    /// The answer for `question_id`, materializing an empty one if absent.
    pub fn entry(&mut self, question_id: usize) -> &mut Answer {
        self.answers.entry(question_id).or_default()
    }

    pub fn insert(&mut self, question_id: usize, answer: Answer) {
        self.answers.insert(question_id, answer);
    }

    pub fn selected(&self, question_id: usize) -> &[usize] {
        self.get(question_id)
            .map(|a| a.selected_choice_ids.as_slice())
            .unwrap_or_default()
    }

    pub fn free_text(&self, question_id: usize) -> &str {
        self.get(question_id)
            .map(|a| a.free_text.as_str())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Answer)> {
        self.answers.iter().map(|(id, answer)| (*id, answer))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn to_json(&self) -> Result<String, crate::error::CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, crate::error::CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}
