//! Question catalog: the ordered, immutable list of checklist questions.
//!
//! The catalog is parsed from a line-oriented specification, one question
//! per non-blank line:
//!
//! ```text
//! ["*"] label ":" choice ("," choice)*
//! ```
//!
//! A leading `*` marks the question multi-select. A line without `:` is a
//! free-text-only question with zero choices. Parsing never fails.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::models::answer::{Answer, AnswerSet};
use crate::models::question::{Choice, Question, QuestionRole};

/// The built-in psychiatric follow-up checklist.
pub const BUILTIN_QUESTIONS: &str = "\
Anxiety: denies, mild, moderate, severe
Depression: denies, mild, moderate, severe
Anhedonia: denies, mild, moderate, severe
Sleep quality: within normal limits, fair, poor
Sleep (hours): 1, 2, 3, 4, 5, 6, 7, 8+
Energy: within normal limits, fair, poor
Appetite: within normal limits, fair, poor
Concentration: within normal limits, fair, poor
Irritability: within normal limits, fair, poor
SI/SH: denies, active, passive
Psychosis: denies, present
Mania-Hypomania: absent, present
Substance Use: denied, reported
Medication Adherence: adherent, non-adherent
Medication Side Effects: denies
* ADHD: denies, history of seizures, cardiac disease, migraines, eating disorder, weight changes
OCD: denies symptoms, endorses symptoms
Trauma: denies, present
Psychiatric Hospitalization: denies
Medical: denies
Social: support present, denies support
Females: N/A, pregnant, not pregnant";

static BUILTIN: LazyLock<QuestionCatalog> =
    LazyLock::new(|| QuestionCatalog::parse(BUILTIN_QUESTIONS));

/// Assigns a [`QuestionRole`] to questions whose label matches exactly.
///
/// Applied once while the catalog is built; nothing downstream looks at
/// label text to find special questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignments {
    pub rules: Vec<RoleRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRule {
    pub label: String,
    pub role: QuestionRole,
}

impl RoleAssignments {
    pub fn none() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn role_for(&self, label: &str) -> QuestionRole {
        self.rules
            .iter()
            .find(|rule| rule.label == label)
            .map(|rule| rule.role)
            .unwrap_or_default()
    }
}

impl Default for RoleAssignments {
    fn default() -> Self {
        Self {
            rules: vec![
                RoleRule {
                    label: "Females".to_string(),
                    role: QuestionRole::ReproductiveStatus,
                },
                RoleRule {
                    label: "ADHD".to_string(),
                    role: QuestionRole::PrimaryExclusion,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Parse with the default role assignments.
    pub fn parse(text: &str) -> Self {
        Self::parse_with_roles(text, &RoleAssignments::default())
    }

    pub fn parse_with_roles(text: &str, roles: &RoleAssignments) -> Self {
        let questions = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(id, line)| parse_line(id, line, roles))
            .collect();
        Self { questions }
    }

    /// A shared handle to the built-in checklist.
    pub fn builtin() -> &'static QuestionCatalog {
        &BUILTIN
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, question_id: usize) -> Option<&Question> {
        self.questions.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Index of the last question, or 0 for an empty catalog.
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    pub fn find_role(&self, role: QuestionRole) -> Option<&Question> {
        self.questions.iter().find(|q| q.role == role)
    }

    /// The answer set of a fresh session: everything absent except the
    /// reproductive-status question, which starts at choice 0.
    pub fn default_answers(&self) -> AnswerSet {
        let mut answers = AnswerSet::new();
        if let Some(question) = self.find_role(QuestionRole::ReproductiveStatus)
            && question.has_choice(0)
        {
            answers.insert(
                question.id,
                Answer {
                    selected_choice_ids: vec![0],
                    free_text: String::new(),
                },
            );
        }
        answers
    }

    /// Drop answers that do not fit this catalog: unknown question ids,
    /// out-of-range or duplicate choice ids, and extra selections on
    /// single-select questions.
    pub fn sanitize(&self, answers: AnswerSet) -> AnswerSet {
        let mut clean = AnswerSet::new();
        for (question_id, answer) in answers.iter() {
            let Some(question) = self.get(question_id) else {
                tracing::warn!(question_id, "dropping answer for unknown question");
                continue;
            };

            let mut selected: Vec<usize> = Vec::with_capacity(answer.selected_choice_ids.len());
            for &choice_id in &answer.selected_choice_ids {
                if question.has_choice(choice_id) && !selected.contains(&choice_id) {
                    selected.push(choice_id);
                }
            }
            if !question.is_multi_select {
                selected.truncate(1);
            } else if question.is_exclusive() && selected.contains(&0) && selected.len() > 1 {
                selected = vec![0];
            }

            clean.insert(
                question_id,
                Answer {
                    selected_choice_ids: selected,
                    free_text: answer.free_text.clone(),
                },
            );
        }
        clean
    }
}

fn parse_line(id: usize, line: &str, roles: &RoleAssignments) -> Question {
    let line = line.trim();
    let (is_multi_select, body) = match line.strip_prefix('*') {
        Some(rest) => (true, rest),
        None => (false, line),
    };

    let (label, raw_choices) = match body.split_once(':') {
        Some((label, rest)) => (label.trim(), rest.trim()),
        None => (body.trim(), ""),
    };

    let choices = if raw_choices.is_empty() {
        Vec::new()
    } else {
        raw_choices
            .split(',')
            .enumerate()
            .map(|(id, text)| Choice {
                id,
                text: text.trim().to_string(),
            })
            .collect()
    };

    Question {
        id,
        label: label.to_string(),
        choices,
        is_multi_select,
        role: roles.role_for(label),
    }
}
