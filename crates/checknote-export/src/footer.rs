use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

use crate::error::ExportError;

/// Treatment-plan footer appended after the question lines.
///
/// Uses `**bold**` markup; see [`crate::markup`].
pub const DEFAULT_FOOTER_TEMPLATE: &str = "\
**TREATMENT PLAN**

**Psychiatric**:
Discussed diagnosis, medications, risks/benefits, side effects (including black box warnings).
Patient had opportunity for questions and provided informed consent.
Encouraged completion of follow-up scales.

**Medical**: Defer

**Psychosocial**:
Reinforced importance of exercise, nutrition, sleep hygiene, routine, socialization, and sobriety.

**Safety**:
Safety plan reviewed.
Advised to contact office for worsening symptoms or medication concerns.
Instructed to call 911 or go to ER for emergencies (SI/HI, inability to care for self).
Patient verbalized understanding.

{{ provider_name }} maintains a collaborative relationship with supervising physician, {{ supervising_physician }}.";

/// Values available to the footer template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterContext {
    pub provider_name: String,
    pub supervising_physician: String,
}

impl Default for FooterContext {
    fn default() -> Self {
        Self {
            provider_name: "Nathan Puls, APRN".to_string(),
            supervising_physician: "Dr. Siddiqui".to_string(),
        }
    }
}

/// Render the footer template. The result still carries `**bold**` markup.
pub fn render_footer(template: &str, context: &FooterContext) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template("footer", template)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(context)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render("footer", &context)?;
    Ok(rendered)
}
