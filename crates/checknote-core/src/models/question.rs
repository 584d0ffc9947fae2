use serde::{Deserialize, Serialize};

/// Structural role of a question. Renderer and store dispatch on this tag
/// instead of on label text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionRole {
    #[default]
    None,
    /// Pregnancy/breastfeeding status. Choice 0 means "not applicable".
    ReproductiveStatus,
    /// Multi-select question whose choice 0 ("denies") excludes all others.
    PrimaryExclusion,
}

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Position within its question, 0-based.
    pub id: usize,
    pub text: String,
}

/// One checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Position within the catalog, 0-based. Doubles as the catalog index.
    pub id: usize,
    pub label: String,
    pub choices: Vec<Choice>,
    pub is_multi_select: bool,
    #[serde(default)]
    pub role: QuestionRole,
}

impl Question {
    pub fn choice(&self, choice_id: usize) -> Option<&Choice> {
        self.choices.get(choice_id)
    }

    pub fn has_choice(&self, choice_id: usize) -> bool {
        choice_id < self.choices.len()
    }

    /// Whether choice 0 of this question excludes every other choice.
    pub fn is_exclusive(&self) -> bool {
        self.is_multi_select && self.role == QuestionRole::PrimaryExclusion
    }

    /// Keyboard shortcut letter for this question (`a` for id 0), if any.
    pub fn shortcut(&self) -> Option<char> {
        u8::try_from(self.id)
            .ok()
            .filter(|id| *id < 26)
            .map(|id| char::from(b'a' + id))
    }
}
