use thiserror::Error;

#[derive(Error, Debug)]
pub enum TutorError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payment amount exceeds current outstanding fees. Invalid transaction.")]
    Overpayment,

    #[error("This lesson clashes with an existing lesson.")]
    ClashingLesson,

    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl TutorError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type TutorResult<T> = Result<T, TutorError>;
