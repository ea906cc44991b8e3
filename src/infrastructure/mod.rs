//! Infrastructure layer module
//!
//! External integrations behind the domain's ports:
//! - Claude Messages API client
//! - Configuration management
//! - Logging infrastructure

pub mod claude;
pub mod config;
pub mod logging;
