use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown question: {0}")]
    UnknownQuestion(usize),

    #[error("unknown choice {choice_id} for question {question_id}")]
    UnknownChoice { question_id: usize, choice_id: usize },
}
