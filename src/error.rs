//! Error handling and custom error types
//!
//! Every failure of the public operations surfaces as a [`GenerationError`].
//! Variants are distinguished by condition; the `Display` text is safe to show
//! to end users, while [`GenerationError::detail`] carries diagnostics.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("image count must be between 1 and 4, got {0}")]
    InvalidCount(u32),

    #[error("image generation service unavailable: request timed out")]
    Timeout(String),

    #[error("image generation service unavailable: network error")]
    Transport(String),

    #[error("image generation service unavailable: remote returned status {status}")]
    Http { status: u16, detail: String },

    #[error("image generation service unavailable: invalid response format")]
    MalformedResponse(String),

    #[error("image generation failed: {message}")]
    Business { code: i64, message: String },

    #[error("could not extract image URL from response")]
    Extraction(String),

    #[error("failed to download image: {0}")]
    Download(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl GenerationError {
    /// Diagnostic detail that is logged but kept out of the user-facing message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Timeout(detail)
            | Self::Transport(detail)
            | Self::Http { detail, .. }
            | Self::MalformedResponse(detail)
            | Self::Extraction(detail) => Some(detail.as_str()),
            _ => None,
        }
    }

    /// Transport-level failures: the remote service could not be reached.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Transport(_))
    }

    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
