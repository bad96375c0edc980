use goals::GoalError;
use remote::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploaderError {
    #[error(transparent)]
    Goal(#[from] GoalError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Settings error: {message}")]
    Settings { message: String },

    #[error("{message}")]
    Usage { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl UploaderError {
    pub fn settings<S: Into<String>>(message: S) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    pub fn usage<S: Into<String>>(message: S) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Transport exhaustion gets its own exit code so operators and
    /// wrapper scripts can tell a dead bus from a bad file.
    pub fn exit_code(&self) -> u8 {
        match self {
            UploaderError::Remote(error) if error.is_transport() => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, UploaderError>;
