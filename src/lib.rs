//! Dead Air - two-host cold case podcast script generator
//!
//! Dead Air runs a turn-taking debate between two AI hosts over a cold case
//! file and compiles the result into a transcript with promotional highlights.
//! Every speaker call goes through a retry controller with exponential backoff.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, error taxonomy and port traits
//! - **Service Layer** (`services`): Retry control, prompt assembly and dialogue generation
//! - **Infrastructure Layer** (`infrastructure`): Claude API client, configuration, logging
//! - **Adapters** (`adapters`): Speaker implementations behind the `SpeakerAgent` port
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use dead_air::adapters::speakers::ScriptedSpeaker;
//! use dead_air::{CaseFile, Config, DialogueGenerator, RetryController, RetryPolicy};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let generator = DialogueGenerator::new(
//!         Arc::new(ScriptedSpeaker::new("Maya Vance")),
//!         Arc::new(ScriptedSpeaker::new("Dr. Aris Thorne")),
//!         RetryController::new(RetryPolicy::from_config(&config.retry)),
//!         config.dialogue,
//!         config.highlights,
//!     );
//!
//!     let case = CaseFile::new("case-1", "Lantern Road", "Asheville, NC", "A hiker vanished.");
//!     let transcript = generator.generate_dialogue(&case, 15).await?;
//!     println!("{}", transcript.episode_title());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{
    DialogueGenerationError, ErrorKind, RetryableError, SpeakerError, ValidationError,
};
pub use domain::models::{
    CaseFile, Config, DialogueConfig, DialogueTurn, EmotionTag, Evidence, HighlightConfig,
    Speaker, Transcript, TurnFraming,
};
pub use domain::ports::{Sleeper, SpeakerAgent, TurnContext};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{with_retry, DialogueGenerator, RetryController, RetryPolicy};
