//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber, with an optional
//! rolling JSON file appender.

pub mod logger;

pub use logger::{parse_log_level, LoggerImpl};
