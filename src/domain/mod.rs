//! Domain layer for the Dead Air debate engine
//!
//! This module contains the core models, error taxonomy and port traits.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{
    DialogueGenerationError, ErrorKind, RetryableError, SpeakerError, ValidationError,
};
