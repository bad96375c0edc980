use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoalError {
    /// A malformed row fails the whole parse; no partial goal sets.
    #[error("Error processing line {line}: {message}\nFormat expected: {expected}")]
    Format {
        line: usize,
        message: String,
        expected: &'static str,
    },

    #[error("Goal file requires a header")]
    MissingHeader,

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GoalError {
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GoalError>;
