use std::error::Error as StdError;

/// Crate-wide result type for platform operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed errors raised at the platform-client boundary.
///
/// The retry and re-authentication machinery keys off the variant: transient
/// transport failures are retried with a bounded budget, authorization
/// denials are never retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure (timeouts, 5xx, connection resets). Retryable.
    #[error("transient platform failure: {context}")]
    Transient {
        context: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// The platform rejected the presented credentials. Never retryable.
    #[error("authorization rejected: {context}")]
    Authorization { context: String },

    /// Response payload did not have the expected shape.
    #[error("malformed platform response: {context}")]
    MalformedResponse { context: String },

    /// Anything else surfaced by a client implementation.
    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn transient(context: impl std::fmt::Display) -> Self {
        Self::Transient {
            context: context.to_string(),
            source: None,
        }
    }

    #[must_use]
    pub fn transient_with(
        context: impl std::fmt::Display,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Transient {
            context: context.to_string(),
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub fn authorization(context: impl std::fmt::Display) -> Self {
        Self::Authorization {
            context: context.to_string(),
        }
    }

    #[must_use]
    pub fn malformed_response(context: impl std::fmt::Display) -> Self {
        Self::MalformedResponse {
            context: context.to_string(),
        }
    }

    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    /// Safe to retry with a bounded budget.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    /// Credentials were rejected outright.
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization { .. })
    }
}
