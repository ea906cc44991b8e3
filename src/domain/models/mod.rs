pub mod case;
pub mod config;
pub mod dialogue;
pub mod framing;
pub mod highlights;

pub use case::{CaseFile, Evidence};
pub use config::{
    AnthropicConfig, Config, DialogueConfig, HostProfile, LogFormat, LoggingConfig,
    RetryConfig, RotationPolicy,
};
pub use dialogue::{DialogueTurn, EmotionTag, Speaker, Transcript};
pub use framing::{closing_exchanges, TurnFraming};
pub use highlights::{
    extract_highlights, HighlightConfig, DEFAULT_HOOK_INDICATORS, MAX_HIGHLIGHTS,
};
