//! Speaker agent implementations.

pub mod claude;
pub mod personas;
pub mod scripted;

pub use claude::ClaudeSpeaker;
pub use scripted::{ScriptedResponse, ScriptedSpeaker};
