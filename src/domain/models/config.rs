use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::highlights::HighlightConfig;

/// Main configuration structure for Dead Air
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Retry policy for speaker calls
    #[serde(default)]
    pub retry: RetryConfig,

    /// Dialogue generation settings
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Highlight extraction settings
    #[serde(default)]
    pub highlights: HighlightConfig,

    /// Anthropic API settings for the hosts
    #[serde(default)]
    pub anthropic: AnthropicConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Rotation policy for file output
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry in seconds; doubles on each further retry
    #[serde(default = "default_base_delay_secs")]
    pub base_delay_secs: f64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_base_delay_secs() -> f64 {
    1.0
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_secs: default_base_delay_secs(),
        }
    }
}

/// Dialogue generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DialogueConfig {
    /// Default number of exchanges (one turn per host each)
    #[serde(default = "default_exchanges")]
    pub exchanges: usize,

    /// Recent turns included in each prompt
    #[serde(default = "default_context_window_turns")]
    pub context_window_turns: usize,

    /// Evidence items included in the case prefix
    #[serde(default = "default_max_evidence")]
    pub max_evidence: usize,

    /// Characters of case narrative included in the case prefix
    #[serde(default = "default_max_case_chars")]
    pub max_case_chars: usize,

    /// Characters kept from each evidence description
    #[serde(default = "default_max_evidence_chars")]
    pub max_evidence_chars: usize,

    /// Show name used in opening and closing instructions
    #[serde(default = "default_show_name")]
    pub show_name: String,

    /// Host A, who opens every exchange
    #[serde(default = "HostProfile::default_host_a")]
    pub host_a: HostProfile,

    /// Host B, who answers host A
    #[serde(default = "HostProfile::default_host_b")]
    pub host_b: HostProfile,
}

const fn default_exchanges() -> usize {
    15
}

const fn default_context_window_turns() -> usize {
    6
}

const fn default_max_evidence() -> usize {
    5
}

const fn default_max_case_chars() -> usize {
    2000
}

const fn default_max_evidence_chars() -> usize {
    100
}

fn default_show_name() -> String {
    "Dead Air".to_string()
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            exchanges: default_exchanges(),
            context_window_turns: default_context_window_turns(),
            max_evidence: default_max_evidence(),
            max_case_chars: default_max_case_chars(),
            max_evidence_chars: default_max_evidence_chars(),
            show_name: default_show_name(),
            host_a: HostProfile::default_host_a(),
            host_b: HostProfile::default_host_b(),
        }
    }
}

/// A podcast host persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HostProfile {
    /// Full name, e.g. "Maya Vance"
    pub name: String,

    /// Name used in transcript context lines
    pub short_name: String,

    /// Persona system prompt; the built-in persona is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
}

impl HostProfile {
    pub fn default_host_a() -> Self {
        Self {
            name: "Maya Vance".to_string(),
            short_name: "Maya".to_string(),
            persona: None,
        }
    }

    pub fn default_host_b() -> Self {
        Self {
            name: "Dr. Aris Thorne".to_string(),
            short_name: "Dr. Thorne".to_string(),
            persona: None,
        }
    }
}

/// Anthropic API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnthropicConfig {
    /// API key (the CLI falls back to `ANTHROPIC_API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model to use for both hosts
    #[serde(default = "default_anthropic_model")]
    pub model: String,

    /// Base URL for API (for testing/proxies)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum tokens per generated line
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_anthropic_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

const fn default_max_tokens() -> u32 {
    1024
}

const fn default_timeout_secs() -> u64 {
    120
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_anthropic_model(),
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
            temperature: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}
