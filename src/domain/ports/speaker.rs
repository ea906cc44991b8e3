//! Speaker agent port
//!
//! A speaker is an external generative black box that turns a bounded prompt
//! into one line of dialogue. Implementations must be `Send + Sync` so a
//! generator can hold them behind `Arc<dyn SpeakerAgent>`.

use async_trait::async_trait;

use crate::domain::errors::SpeakerError;
use crate::domain::models::{DialogueTurn, Speaker, TurnFraming};

/// Everything a speaker sees for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnContext {
    /// Role the generator expects to fill
    pub role: Speaker,

    /// Zero-based exchange index
    pub exchange: usize,

    /// Zero-based position in the transcript
    pub turn_index: usize,

    /// Positional framing of this turn
    pub framing: TurnFraming,

    /// Full prompt: case prefix, recent conversation, instruction
    pub prompt: String,
}

/// Port trait for the two host agents.
#[async_trait]
pub trait SpeakerAgent: Send + Sync {
    /// Human-readable name, used in logs
    fn name(&self) -> &str;

    /// Produce the next line of dialogue.
    ///
    /// The returned turn's `speaker` is advisory; the generator re-attributes
    /// it to `context.role`.
    ///
    /// # Errors
    /// - `SpeakerError::Upstream` - transient backend failure, retried
    /// - `SpeakerError::Rejected` - backend refused the request, not retried
    /// - `SpeakerError::Validation` - the produced line was invalid, not retried
    async fn speak(&self, context: &TurnContext) -> Result<DialogueTurn, SpeakerError>;
}
