//! Speaker backed by the Claude Messages API.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::personas;
use crate::domain::errors::SpeakerError;
use crate::domain::models::{AnthropicConfig, DialogueConfig, DialogueTurn, EmotionTag, Speaker};
use crate::domain::ports::{SpeakerAgent, TurnContext};
use crate::infrastructure::claude::{ClaudeApiError, ClaudeClient, MessageRequest};

impl From<ClaudeApiError> for SpeakerError {
    fn from(err: ClaudeApiError) -> Self {
        if err.is_transient() {
            Self::Upstream(err.to_string())
        } else {
            Self::Rejected(err.to_string())
        }
    }
}

/// Expected model output.
#[derive(Debug, Deserialize)]
struct LinePayload {
    text: String,
    #[serde(default)]
    emotion_tag: Option<String>,
}

/// One host voiced by a Claude model.
pub struct ClaudeSpeaker {
    name: String,
    client: ClaudeClient,
    model: String,
    max_tokens: u32,
    temperature: Option<f32>,
    system_prompt: String,
}

impl ClaudeSpeaker {
    pub fn new(
        name: impl Into<String>,
        client: ClaudeClient,
        anthropic: &AnthropicConfig,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            client,
            model: anthropic.model.clone(),
            max_tokens: anthropic.max_tokens,
            temperature: anthropic.temperature,
            system_prompt: system_prompt.into(),
        }
    }

    /// Speaker for `speaker` using its configured or built-in persona.
    pub fn for_host(
        client: ClaudeClient,
        anthropic: &AnthropicConfig,
        dialogue: &DialogueConfig,
        speaker: Speaker,
    ) -> Self {
        let name = match speaker {
            Speaker::HostA => &dialogue.host_a.name,
            Speaker::HostB => &dialogue.host_b.name,
        };
        Self::new(
            name.clone(),
            client,
            anthropic,
            personas::system_prompt(dialogue, speaker),
        )
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

#[async_trait]
impl SpeakerAgent for ClaudeSpeaker {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, context), fields(speaker = %self.name, turn = context.turn_index, framing = %context.framing))]
    async fn speak(&self, context: &TurnContext) -> Result<DialogueTurn, SpeakerError> {
        let request = MessageRequest::user(&self.model, &context.prompt, self.max_tokens)
            .with_system(&self.system_prompt)
            .with_temperature(self.temperature);

        let response = self.client.send_message(&request).await?;
        let raw = response.text();
        debug!("Raw model output: {} chars", raw.len());

        let (text, emotion) = parse_line(&raw)?;
        Ok(DialogueTurn::new(context.role, text, emotion)?)
    }
}

/// Extract `(text, emotion)` from model output.
///
/// Accepts a bare JSON object, one wrapped in a code fence, or one surrounded
/// by prose. Output with no parsable object is an upstream failure; an
/// unrecognised emotion cue degrades to neutral.
fn parse_line(raw: &str) -> Result<(String, EmotionTag), SpeakerError> {
    let start = raw.find('{');
    let end = raw.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => {
            return Err(SpeakerError::Upstream(format!(
                "Model output contained no JSON object: {}",
                preview(raw)
            )))
        }
    };

    let payload: LinePayload = serde_json::from_str(json).map_err(|e| {
        SpeakerError::Upstream(format!("Malformed model output ({e}): {}", preview(raw)))
    })?;

    let emotion = match payload.emotion_tag.as_deref() {
        None | Some("") => EmotionTag::Neutral,
        Some(tag) => tag.parse().unwrap_or_else(|_| {
            warn!("Unknown emotion tag '{}', using neutral", tag);
            EmotionTag::Neutral
        }),
    };

    Ok((payload.text.trim().to_string(), emotion))
}

fn preview(raw: &str) -> String {
    raw.chars().take(80).collect()
}
