pub mod client;
pub mod errors;
pub mod types;

pub use client::{ClaudeClient, ClaudeClientConfig};
pub use errors::ClaudeApiError;
pub use types::{ContentBlock, Message, MessageRequest, MessageResponse, StopReason, Usage};
