//! Failure taxonomy for the fetch pipeline.
//!
//! All fallibility originates at the network and decode boundary; the pure
//! stages (enrichment, endpoint selection, filtering) are total. Cancellation
//! is modelled as an error variant so it can flow through `Result` plumbing,
//! but it is not user-visible: the orchestrator swallows it without touching
//! observable state.

/// Error produced by one fetch operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {status_text}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Canonical status text, when known.
        status_text: String,
    },
    /// The transport failed before a response arrived.
    #[error("transport failed: {message}")]
    Transport {
        /// Underlying transport error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("response decode failed: {message}")]
    Decode {
        /// Underlying decode error description.
        message: String,
    },
    /// The operation was cancelled before it settled.
    #[error("operation cancelled")]
    Cancelled,
}

impl FetchError {
    /// Build an [`FetchError::Http`] from a status code and text.
    pub fn http(status: u16, status_text: impl Into<String>) -> Self {
        Self::Http {
            status,
            status_text: status_text.into(),
        }
    }

    /// Build a [`FetchError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`FetchError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether this outcome represents cancellation rather than a failure.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
