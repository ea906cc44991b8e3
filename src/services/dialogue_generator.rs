//! Turn-taking dialogue generation.
//!
//! Exchange `i` is host A's turn followed by host B's, each built from the
//! turns before it. Turns are strictly sequential. A speaker failure that
//! survives its retries aborts the whole run; no partial transcript is
//! returned. Dropping the returned future cancels the run.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::errors::{DialogueGenerationError, ValidationError};
use crate::domain::models::{
    CaseFile, DialogueConfig, DialogueTurn, HighlightConfig, Speaker, Transcript, TurnFraming,
};
use crate::domain::ports::{SpeakerAgent, TurnContext};
use crate::services::prompt_builder::PromptBuilder;
use crate::services::retry::RetryController;

/// Upper bound on turn storage reserved before any speaker has answered.
const MAX_PREALLOCATED_TURNS: usize = 64;

/// Generates a two-host transcript for a case.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use dead_air::adapters::speakers::ScriptedSpeaker;
/// use dead_air::domain::models::{CaseFile, DialogueConfig, HighlightConfig};
/// use dead_air::services::{DialogueGenerator, RetryController, RetryPolicy};
///
/// # async fn example() -> anyhow::Result<()> {
/// let generator = DialogueGenerator::new(
///     Arc::new(ScriptedSpeaker::new("Maya")),
///     Arc::new(ScriptedSpeaker::new("Dr. Thorne")),
///     RetryController::new(RetryPolicy::default()),
///     DialogueConfig::default(),
///     HighlightConfig::default(),
/// );
/// let case = CaseFile::new("case-1", "Lantern Road", "Asheville, NC", "A hiker vanished.");
/// let transcript = generator.generate_dialogue(&case, 5).await?;
/// assert_eq!(transcript.len(), 10);
/// # Ok(())
/// # }
/// ```
pub struct DialogueGenerator {
    host_a: Arc<dyn SpeakerAgent>,
    host_b: Arc<dyn SpeakerAgent>,
    retry: RetryController,
    prompts: PromptBuilder,
    highlights: HighlightConfig,
    on_turn: Option<TurnCallback>,
}

/// Called after each accepted turn with the number of turns so far.
pub type TurnCallback = Box<dyn Fn(usize, &DialogueTurn) + Send + Sync>;

impl DialogueGenerator {
    pub fn new(
        host_a: Arc<dyn SpeakerAgent>,
        host_b: Arc<dyn SpeakerAgent>,
        retry: RetryController,
        dialogue: DialogueConfig,
        highlights: HighlightConfig,
    ) -> Self {
        Self {
            host_a,
            host_b,
            retry,
            prompts: PromptBuilder::new(dialogue),
            highlights,
            on_turn: None,
        }
    }

    /// Observe turns as they are accepted (progress reporting).
    #[must_use]
    pub fn on_turn(mut self, callback: impl Fn(usize, &DialogueTurn) + Send + Sync + 'static) -> Self {
        self.on_turn = Some(Box::new(callback));
        self
    }

    pub const fn prompt_builder(&self) -> &PromptBuilder {
        &self.prompts
    }

    fn agent(&self, speaker: Speaker) -> &Arc<dyn SpeakerAgent> {
        match speaker {
            Speaker::HostA => &self.host_a,
            Speaker::HostB => &self.host_b,
        }
    }

    /// Run `exchanges` exchanges over `case` and compile the transcript.
    ///
    /// # Errors
    /// - `DialogueGenerationError::InvalidRequest` - zero or overflowing exchanges, or a blank case field
    /// - `DialogueGenerationError::SpeakerFailed` - a speaker call failed after its retries
    #[instrument(skip(self, case), fields(case_id = %case.case_id), err)]
    pub async fn generate_dialogue(
        &self,
        case: &CaseFile,
        exchanges: usize,
    ) -> Result<Transcript, DialogueGenerationError> {
        if exchanges == 0 {
            return Err(ValidationError::InvalidExchangeCount(exchanges).into());
        }
        case.validate()?;

        info!(
            "Generating {} exchanges for '{}' ({} vs {})",
            exchanges,
            case.title,
            self.host_a.name(),
            self.host_b.name()
        );

        let total_turns = exchanges
            .checked_mul(2)
            .ok_or(ValidationError::ExchangeCountTooLarge(exchanges))?;
        let mut turns: Vec<DialogueTurn> = Vec::with_capacity(total_turns.min(MAX_PREALLOCATED_TURNS));

        for turn_index in 0..total_turns {
            let role = Speaker::for_turn(turn_index);
            let exchange = turn_index / 2;
            let framing = TurnFraming::for_turn(turn_index, exchanges);

            let context = TurnContext {
                role,
                exchange,
                turn_index,
                framing,
                prompt: self.prompts.build(case, &turns, role, framing),
            };

            let turn = self.take_turn(&context).await?;
            debug!(
                "Turn {} ({}, {}): {} chars",
                turn_index,
                role,
                framing,
                turn.text().chars().count()
            );
            turns.push(turn);
            if let (Some(callback), Some(last)) = (&self.on_turn, turns.last()) {
                callback(turns.len(), last);
            }
        }

        let transcript = Transcript::compile(case, turns, &self.highlights)?;
        info!(
            script_id = %transcript.script_id(),
            turns = transcript.len(),
            highlights = transcript.highlights().len(),
            "Transcript compiled"
        );
        Ok(transcript)
    }

    /// One speaker invocation under the retry policy, attributed to `context.role`.
    async fn take_turn(&self, context: &TurnContext) -> Result<DialogueTurn, DialogueGenerationError> {
        let agent = self.agent(context.role);

        let turn = self
            .retry
            .execute(|| agent.speak(context))
            .await
            .map_err(|source| DialogueGenerationError::SpeakerFailed {
                speaker: context.role,
                exchange: context.exchange,
                source,
            })?;

        if turn.speaker() != context.role {
            debug!(
                "{} labelled its turn {}, re-attributing to {}",
                agent.name(),
                turn.speaker(),
                context.role
            );
        }
        Ok(turn.attributed_to(context.role))
    }
}
