//! Domain errors for the Dead Air debate engine.

use thiserror::Error;

use super::models::dialogue::Speaker;

/// Malformed input rejected at construction time. Never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty or whitespace")]
    BlankField { field: &'static str },

    #[error("Transcript must contain at least one turn")]
    EmptyTranscript,

    #[error("Invalid exchange count: {0}. Must be at least 1")]
    InvalidExchangeCount(usize),

    #[error("Exchange count {0} is too large: the turn count overflows")]
    ExchangeCountTooLarge(usize),

    #[error("Unknown emotion tag: {0}")]
    UnknownEmotionTag(String),
}

impl ValidationError {
    /// Shorthand for a blank-field failure.
    pub const fn blank(field: &'static str) -> Self {
        Self::BlankField { field }
    }
}

/// Check that a string field carries non-whitespace content.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::blank(field))
    } else {
        Ok(())
    }
}

/// Failure classification used by the retry controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The upstream service signalled a temporary failure (rate limit, 5xx, timeout).
    Transient,
    /// Local input validation failed.
    Validation,
    /// The upstream service rejected the request outright.
    Permanent,
}

/// Errors that can be classified into an [`ErrorKind`].
pub trait RetryableError: std::error::Error {
    /// Kind of this failure.
    fn kind(&self) -> ErrorKind;

    /// Returns true if this error is transient and should be retried
    fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}

/// Failure of a single speaker invocation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeakerError {
    /// The generative backend failed in a way worth retrying.
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// The generative backend refused the request (auth, bad request).
    #[error("Upstream rejected request: {0}")]
    Rejected(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RetryableError for SpeakerError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Upstream(_) => ErrorKind::Transient,
            Self::Rejected(_) => ErrorKind::Permanent,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }
}

/// Terminal failure of a whole dialogue run. No partial transcript accompanies it.
#[derive(Debug, Error)]
pub enum DialogueGenerationError {
    #[error("{speaker} failed at exchange {exchange}: {source}")]
    SpeakerFailed {
        speaker: Speaker,
        exchange: usize,
        #[source]
        source: SpeakerError,
    },

    #[error("Invalid dialogue request: {0}")]
    InvalidRequest(#[from] ValidationError),
}

impl DialogueGenerationError {
    /// Speaker responsible for the failure, if any.
    pub const fn speaker(&self) -> Option<Speaker> {
        match self {
            Self::SpeakerFailed { speaker, .. } => Some(*speaker),
            Self::InvalidRequest(_) => None,
        }
    }

    /// Zero-based exchange index at which the run failed, if any.
    pub const fn exchange(&self) -> Option<usize> {
        match self {
            Self::SpeakerFailed { exchange, .. } => Some(*exchange),
            Self::InvalidRequest(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("title", "Cold Creek").is_ok());
        assert_eq!(
            require_text("title", "  \n\t"),
            Err(ValidationError::blank("title"))
        );
        assert_eq!(require_text("title", ""), Err(ValidationError::blank("title")));
    }

    #[test]
    fn test_speaker_error_kinds() {
        assert_eq!(SpeakerError::Upstream("429".into()).kind(), ErrorKind::Transient);
        assert_eq!(SpeakerError::Rejected("401".into()).kind(), ErrorKind::Permanent);
        assert_eq!(
            SpeakerError::from(ValidationError::blank("text")).kind(),
            ErrorKind::Validation
        );
        assert!(SpeakerError::Upstream("overloaded".into()).is_transient());
        assert!(!SpeakerError::Rejected("forbidden".into()).is_transient());
    }

    #[test]
    fn test_generation_error_display() {
        let err = DialogueGenerationError::SpeakerFailed {
            speaker: Speaker::HostB,
            exchange: 4,
            source: SpeakerError::Upstream("server overloaded".into()),
        };
        assert_eq!(err.speaker(), Some(Speaker::HostB));
        assert_eq!(err.exchange(), Some(4));
        assert_eq!(
            err.to_string(),
            "host_b failed at exchange 4: Upstream failure: server overloaded"
        );
    }
}
