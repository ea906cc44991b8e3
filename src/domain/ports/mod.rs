//! Port trait definitions (Hexagonal Architecture)
//!
//! - SpeakerAgent: one host's line generator
//! - Sleeper: suspension between retry attempts

pub mod sleeper;
pub mod speaker;

pub use sleeper::{Sleeper, TokioSleeper};
pub use speaker::{SpeakerAgent, TurnContext};
