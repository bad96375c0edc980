use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    /// The channel to the strategy process is unusable. The only
    /// retryable kind.
    #[error("transport fault: {message}")]
    Transport { message: String },

    /// The strategy process rejected the request for a business reason.
    #[error("remote fault: {message}")]
    Fault { message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl RemoteError {
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn fault<S: Into<String>>(message: S) -> Self {
        Self::Fault {
            message: message.into(),
        }
    }

    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RemoteError::Transport { .. })
    }
}

pub type Result<T> = std::result::Result<T, RemoteError>;
