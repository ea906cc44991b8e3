//! Dialogue turns and compiled transcripts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::case::CaseFile;
use super::highlights::{extract_highlights, HighlightConfig};
use crate::domain::errors::{require_text, ValidationError};

/// The two fixed host roles. Host A always opens an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    HostA,
    HostB,
}

impl Speaker {
    /// Role that speaks at a zero-based transcript position.
    pub const fn for_turn(turn_index: usize) -> Self {
        if turn_index % 2 == 0 {
            Self::HostA
        } else {
            Self::HostB
        }
    }

    /// The other host.
    pub const fn counterpart(self) -> Self {
        match self {
            Self::HostA => Self::HostB,
            Self::HostB => Self::HostA,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HostA => "host_a",
            Self::HostB => "host_b",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery cue rendered into the TTS markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionTag {
    Scoffs,
    ClearsThroat,
    DramaticPause,
    Sighs,
    Excited,
    Whispers,
    Interrupting,
    Gasps,
    #[default]
    Neutral,
}

impl EmotionTag {
    pub const ALL: [Self; 9] = [
        Self::Scoffs,
        Self::ClearsThroat,
        Self::DramaticPause,
        Self::Sighs,
        Self::Excited,
        Self::Whispers,
        Self::Interrupting,
        Self::Gasps,
        Self::Neutral,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scoffs => "scoffs",
            Self::ClearsThroat => "clears_throat",
            Self::DramaticPause => "dramatic_pause",
            Self::Sighs => "sighs",
            Self::Excited => "excited",
            Self::Whispers => "whispers",
            Self::Interrupting => "interrupting",
            Self::Gasps => "gasps",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionTag {
    type Err = ValidationError;

    /// Accepts `excited`, `[Excited]`, `clears throat`, `dramatic-pause`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim()
            .to_lowercase()
            .replace([' ', '-'], "_");

        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownEmotionTag(s.to_string()))
    }
}

/// One utterance in a transcript. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTurn")]
pub struct DialogueTurn {
    speaker: Speaker,
    text: String,
    emotion_tag: EmotionTag,
}

#[derive(Deserialize)]
struct RawTurn {
    speaker: Speaker,
    text: String,
    #[serde(default)]
    emotion_tag: EmotionTag,
}

impl TryFrom<RawTurn> for DialogueTurn {
    type Error = ValidationError;

    fn try_from(raw: RawTurn) -> Result<Self, Self::Error> {
        Self::new(raw.speaker, raw.text, raw.emotion_tag)
    }
}

impl DialogueTurn {
    /// Build a turn, rejecting whitespace-only text.
    pub fn new(
        speaker: Speaker,
        text: impl Into<String>,
        emotion_tag: EmotionTag,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        require_text("text", &text)?;
        Ok(Self {
            speaker,
            text,
            emotion_tag,
        })
    }

    pub const fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn emotion_tag(&self) -> EmotionTag {
        self.emotion_tag
    }

    /// Consume the turn and produce one attributed to `speaker`.
    #[must_use]
    pub fn attributed_to(self, speaker: Speaker) -> Self {
        Self { speaker, ..self }
    }

    /// Text prefixed with the emotion cue, e.g. `[whispers] It was never him.`
    pub fn to_tts_markup(&self) -> String {
        match self.emotion_tag {
            EmotionTag::Neutral => self.text.clone(),
            tag => format!("[{tag}] {}", self.text),
        }
    }
}

/// A finished episode script. Highlights are always derived from the turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TranscriptRecord")]
pub struct Transcript {
    script_id: String,
    case_id: String,
    episode_title: String,
    turns: Vec<DialogueTurn>,
    highlights: Vec<String>,
    created_at: DateTime<Utc>,
}

/// Wire form of a transcript. Any `highlights` in the input are ignored and recomputed.
#[derive(Deserialize)]
struct TranscriptRecord {
    script_id: String,
    case_id: String,
    episode_title: String,
    turns: Vec<DialogueTurn>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl TryFrom<TranscriptRecord> for Transcript {
    type Error = ValidationError;

    fn try_from(record: TranscriptRecord) -> Result<Self, Self::Error> {
        require_text("script_id", &record.script_id)?;
        require_text("case_id", &record.case_id)?;
        require_text("episode_title", &record.episode_title)?;
        Self::assemble(
            record.script_id,
            record.case_id,
            record.episode_title,
            record.turns,
            record.created_at,
            &HighlightConfig::default(),
        )
    }
}

impl Transcript {
    /// Assemble the turns generated for `case` into a transcript.
    pub fn compile(
        case: &CaseFile,
        turns: Vec<DialogueTurn>,
        highlights: &HighlightConfig,
    ) -> Result<Self, ValidationError> {
        let simple = Uuid::new_v4().simple().to_string();
        Self::assemble(
            format!("script-{}", &simple[..12]),
            case.case_id.clone(),
            format!("The {} Mystery: {}", case.location, case.title),
            turns,
            Utc::now(),
            highlights,
        )
    }

    fn assemble(
        script_id: String,
        case_id: String,
        episode_title: String,
        turns: Vec<DialogueTurn>,
        created_at: DateTime<Utc>,
        highlight_config: &HighlightConfig,
    ) -> Result<Self, ValidationError> {
        if turns.is_empty() {
            return Err(ValidationError::EmptyTranscript);
        }
        let highlights = extract_highlights(&turns, highlight_config);
        Ok(Self {
            script_id,
            case_id,
            episode_title,
            turns,
            highlights,
            created_at,
        })
    }

    /// Recompute highlights with a different configuration.
    #[must_use]
    pub fn with_highlight_config(mut self, config: &HighlightConfig) -> Self {
        self.highlights = extract_highlights(&self.turns, config);
        self
    }

    pub fn script_id(&self) -> &str {
        &self.script_id
    }

    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    pub fn episode_title(&self) -> &str {
        &self.episode_title
    }

    pub fn turns(&self) -> &[DialogueTurn] {
        &self.turns
    }

    pub fn highlights(&self) -> &[String] {
        &self.highlights
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false for a constructed transcript.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::case::CaseFile;

    fn case() -> CaseFile {
        CaseFile::new("case-17", "The Lantern Road Disappearance", "Asheville, NC", "A hiker vanished.")
    }

    fn turn(speaker: Speaker, text: &str) -> DialogueTurn {
        DialogueTurn::new(speaker, text, EmotionTag::Neutral).unwrap()
    }

    #[test]
    fn test_speaker_for_turn_alternates() {
        assert_eq!(Speaker::for_turn(0), Speaker::HostA);
        assert_eq!(Speaker::for_turn(1), Speaker::HostB);
        assert_eq!(Speaker::for_turn(6), Speaker::HostA);
        assert_eq!(Speaker::HostA.counterpart(), Speaker::HostB);
    }

    #[test]
    fn test_turn_rejects_whitespace_text() {
        let err = DialogueTurn::new(Speaker::HostA, "   \n", EmotionTag::Excited).unwrap_err();
        assert_eq!(err, ValidationError::blank("text"));
        assert!(DialogueTurn::new(Speaker::HostA, "", EmotionTag::Neutral).is_err());
    }

    #[test]
    fn test_turn_deserialization_validates() {
        let ok: DialogueTurn =
            serde_json::from_str(r#"{"speaker":"host_b","text":"Chain of custody broke here."}"#)
                .unwrap();
        assert_eq!(ok.speaker(), Speaker::HostB);
        assert_eq!(ok.emotion_tag(), EmotionTag::Neutral);

        let blank = serde_json::from_str::<DialogueTurn>(r#"{"speaker":"host_a","text":"  "}"#);
        assert!(blank.is_err());
    }

    #[test]
    fn test_attributed_to_replaces_role() {
        let original = turn(Speaker::HostB, "I think the timeline is off.");
        let fixed = original.attributed_to(Speaker::HostA);
        assert_eq!(fixed.speaker(), Speaker::HostA);
        assert_eq!(fixed.text(), "I think the timeline is off.");
    }

    #[test]
    fn test_tts_markup() {
        let neutral = turn(Speaker::HostA, "Welcome back.");
        assert_eq!(neutral.to_tts_markup(), "Welcome back.");

        let whisper =
            DialogueTurn::new(Speaker::HostA, "It was never him.", EmotionTag::Whispers).unwrap();
        assert_eq!(whisper.to_tts_markup(), "[whispers] It was never him.");

        let pause =
            DialogueTurn::new(Speaker::HostB, "The blood evidence.", EmotionTag::DramaticPause)
                .unwrap();
        assert_eq!(pause.to_tts_markup(), "[dramatic_pause] The blood evidence.");
    }

    #[test]
    fn test_emotion_tag_parsing() {
        assert_eq!("excited".parse::<EmotionTag>().unwrap(), EmotionTag::Excited);
        assert_eq!("[Whispers]".parse::<EmotionTag>().unwrap(), EmotionTag::Whispers);
        assert_eq!("clears throat".parse::<EmotionTag>().unwrap(), EmotionTag::ClearsThroat);
        assert_eq!("dramatic-pause".parse::<EmotionTag>().unwrap(), EmotionTag::DramaticPause);
        assert!(matches!(
            "giggles".parse::<EmotionTag>(),
            Err(ValidationError::UnknownEmotionTag(_))
        ));
    }

    #[test]
    fn test_compile_sets_metadata() {
        let transcript = Transcript::compile(
            &case(),
            vec![turn(Speaker::HostA, "Welcome."), turn(Speaker::HostB, "Evening.")],
            &HighlightConfig::default(),
        )
        .unwrap();

        assert!(transcript.script_id().starts_with("script-"));
        assert_eq!(transcript.script_id().len(), "script-".len() + 12);
        assert_eq!(transcript.case_id(), "case-17");
        assert_eq!(
            transcript.episode_title(),
            "The Asheville, NC Mystery: The Lantern Road Disappearance"
        );
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_compile_rejects_empty() {
        let result = Transcript::compile(&case(), Vec::new(), &HighlightConfig::default());
        assert_eq!(result.unwrap_err(), ValidationError::EmptyTranscript);
    }

    #[test]
    fn test_deserialize_recomputes_highlights() {
        let json = serde_json::json!({
            "script_id": "script-abc123def456",
            "case_id": "case-17",
            "episode_title": "The Asheville Mystery: Lantern Road",
            "turns": [
                {"speaker": "host_a", "text": "Wait, nobody knew she had a second phone?", "emotion_tag": "gasps"},
                {"speaker": "host_b", "text": "Correct."}
            ],
            "highlights": ["injected", "from", "outside"]
        });

        let transcript: Transcript = serde_json::from_value(json).unwrap();
        assert_eq!(
            transcript.highlights(),
            ["Wait, nobody knew she had a second phone?".to_string()]
        );
    }

    #[test]
    fn test_deserialize_rejects_empty_turns() {
        let json = serde_json::json!({
            "script_id": "script-abc123def456",
            "case_id": "case-17",
            "episode_title": "Lantern Road",
            "turns": []
        });
        assert!(serde_json::from_value::<Transcript>(json).is_err());
    }
}
