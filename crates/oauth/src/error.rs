use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A session or credential invariant was violated by the caller.
    /// A programming error, never retried and never recovered from.
    #[error("credential precondition violated: {message}")]
    Precondition { message: String },

    /// Authentication could not be re-established even after rebuilding the
    /// session from scratch. Aborts the current operation, not the process.
    #[error("hard authentication failure: {source}")]
    AuthenticationFailed {
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Platform(#[from] rover_platform::Error),

    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn authentication_failed(source: Error) -> Self {
        Self::AuthenticationFailed {
            source: Box::new(source),
        }
    }

    /// The session itself may be at fault; worth one rebuild-and-retry.
    #[must_use]
    pub fn warrants_session_rebuild(&self) -> bool {
        matches!(
            self,
            Self::Platform(e) if e.is_transient() || e.is_authorization()
        )
    }
}

impl rover_common::FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

rover_common::impl_context!();
