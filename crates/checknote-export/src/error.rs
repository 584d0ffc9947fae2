use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("footer template parse error: {0}")]
    TemplateParse(String),

    #[error("footer template rendering failed: {0}")]
    TemplateRender(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::TemplateRender(e.to_string())
    }
}
