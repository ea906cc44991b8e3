//! Application services: retry control, prompt assembly and dialogue generation.

pub mod dialogue_generator;
pub mod prompt_builder;
pub mod retry;

pub use dialogue_generator::DialogueGenerator;
pub use prompt_builder::PromptBuilder;
pub use retry::{with_retry, RetryController, RetryPolicy};
