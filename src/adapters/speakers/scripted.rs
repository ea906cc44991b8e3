//! Scripted speaker for dry runs and tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::SpeakerError;
use crate::domain::models::{DialogueTurn, EmotionTag, Speaker};
use crate::domain::ports::{SpeakerAgent, TurnContext};

/// One queued reaction of a [`ScriptedSpeaker`].
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Speak this line
    Line { text: String, emotion: EmotionTag },
    /// Fail with this error
    Fail(SpeakerError),
    /// Never complete
    Hang,
}

impl ScriptedResponse {
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line {
            text: text.into(),
            emotion: EmotionTag::Neutral,
        }
    }

    pub fn line_with(text: impl Into<String>, emotion: EmotionTag) -> Self {
        Self::Line {
            text: text.into(),
            emotion,
        }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::Fail(SpeakerError::Upstream(message.into()))
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Fail(SpeakerError::Rejected(message.into()))
    }
}

/// Speaker that replays queued responses, then falls back to a generated line.
///
/// Every invocation is recorded, so tests can inspect the prompts it saw.
pub struct ScriptedSpeaker {
    name: String,
    queue: Arc<RwLock<VecDeque<ScriptedResponse>>>,
    seen: Arc<RwLock<Vec<TurnContext>>>,
    claimed_role: Option<Speaker>,
}

impl ScriptedSpeaker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            queue: Arc::new(RwLock::new(VecDeque::new())),
            seen: Arc::new(RwLock::new(Vec::new())),
            claimed_role: None,
        }
    }

    pub fn with_responses(
        name: impl Into<String>,
        responses: impl IntoIterator<Item = ScriptedResponse>,
    ) -> Self {
        let speaker = Self::new(name);
        let queue: VecDeque<_> = responses.into_iter().collect();
        Self {
            queue: Arc::new(RwLock::new(queue)),
            ..speaker
        }
    }

    /// Label every produced turn with `role`, regardless of the requested one.
    #[must_use]
    pub const fn claiming(mut self, role: Speaker) -> Self {
        self.claimed_role = Some(role);
        self
    }

    pub async fn push(&self, response: ScriptedResponse) {
        self.queue.write().await.push_back(response);
    }

    /// Number of times `speak` has been called.
    pub async fn calls(&self) -> usize {
        self.seen.read().await.len()
    }

    /// Contexts passed to `speak`, in call order.
    pub async fn contexts(&self) -> Vec<TurnContext> {
        self.seen.read().await.clone()
    }

    fn fallback_line(&self, context: &TurnContext) -> String {
        format!(
            "{} speaking on turn {} ({}).",
            self.name,
            context.turn_index + 1,
            context.framing
        )
    }
}

#[async_trait]
impl SpeakerAgent for ScriptedSpeaker {
    fn name(&self) -> &str {
        &self.name
    }

    async fn speak(&self, context: &TurnContext) -> Result<DialogueTurn, SpeakerError> {
        self.seen.write().await.push(context.clone());
        let next = self.queue.write().await.pop_front();
        let role = self.claimed_role.unwrap_or(context.role);

        match next {
            Some(ScriptedResponse::Line { text, emotion }) => {
                Ok(DialogueTurn::new(role, text, emotion)?)
            }
            Some(ScriptedResponse::Fail(err)) => Err(err),
            Some(ScriptedResponse::Hang) => std::future::pending().await,
            None => Ok(DialogueTurn::new(
                role,
                self.fallback_line(context),
                EmotionTag::Neutral,
            )?),
        }
    }
}
