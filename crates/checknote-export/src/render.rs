use serde::{Deserialize, Serialize};

use checknote_core::catalog::QuestionCatalog;
use checknote_core::models::answer::{Answer, AnswerSet};
use checknote_core::models::question::{Question, QuestionRole};

use crate::error::ExportError;
use crate::footer::{FooterContext, render_footer};
use crate::markup;

const STATUS_ADVICE: &str = "Advised to notify provider if status changes.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Plain,
    Rich,
}

/// Both renderings of the same answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub plain: String,
    pub html: String,
}

/// Turns a catalog plus answer set into note text.
///
/// Rendering is pure: the same inputs always produce the same note.
#[derive(Debug, Clone)]
pub struct NoteRenderer {
    footer: String,
}

impl NoteRenderer {
    /// Use an already-rendered footer (with `**bold**` markup).
    pub fn new(footer: impl Into<String>) -> Self {
        Self {
            footer: footer.into(),
        }
    }

    /// Render the footer template once and keep the result.
    pub fn from_template(template: &str, context: &FooterContext) -> Result<Self, ExportError> {
        Ok(Self::new(render_footer(template, context)?))
    }

    pub fn footer(&self) -> &str {
        &self.footer
    }

    pub fn render(&self, catalog: &QuestionCatalog, answers: &AnswerSet, mode: RenderMode) -> String {
        let lines: Vec<String> = catalog
            .questions()
            .iter()
            .filter_map(|question| question_line(question, answers.get(question.id), mode))
            .collect();

        match mode {
            RenderMode::Plain => format!(
                "{}\n\n{}",
                lines.join("\n"),
                markup::to_plain(&self.footer)
            ),
            RenderMode::Rich => format!(
                "{}<br><br>{}",
                lines.join("<br>"),
                markup::to_rich(&self.footer)
            ),
        }
    }

    pub fn render_note(&self, catalog: &QuestionCatalog, answers: &AnswerSet) -> Note {
        Note {
            plain: self.render(catalog, answers, RenderMode::Plain),
            html: self.render(catalog, answers, RenderMode::Rich),
        }
    }
}

/// `<label>: <items>` for one question, or `None` when the question is
/// omitted from the note.
fn question_line(question: &Question, answer: Option<&Answer>, mode: RenderMode) -> Option<String> {
    let selected = answer
        .map(|a| a.selected_choice_ids.as_slice())
        .unwrap_or_default();

    if question.role == QuestionRole::ReproductiveStatus && selected.contains(&0) {
        return None;
    }

    let mut items: Vec<String> = selected
        .iter()
        .filter_map(|&choice_id| question.choice(choice_id))
        .map(|choice| display_text(question, &choice.text))
        .collect();

    if let Some(answer) = answer
        && !answer.free_text.is_empty()
    {
        items.push(answer.free_text.clone());
    }

    let joined = if items.is_empty() {
        "n/a".to_string()
    } else {
        items.join(", ")
    };

    Some(match mode {
        RenderMode::Plain => format!("{}: {}", question.label, joined),
        RenderMode::Rich => format!(
            "<b>{}</b>: {}",
            markup::escape_html(&question.label),
            markup::escape_html(&joined)
        ),
    })
}

fn display_text(question: &Question, text: &str) -> String {
    if question.role == QuestionRole::ReproductiveStatus {
        match text {
            "pregnant" => return format!("is pregnant/breastfeeding. {STATUS_ADVICE}"),
            "not pregnant" => return format!("is not pregnant/breastfeeding. {STATUS_ADVICE}"),
            _ => {}
        }
    }

    if question.label.starts_with("Sleep") && text.starts_with(|c: char| c.is_ascii_digit()) {
        let unit = if text == "1" { "hour" } else { "hours" };
        return format!("about {text} {unit}");
    }

    text.to_string()
}
