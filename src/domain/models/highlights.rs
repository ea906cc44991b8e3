//! Promotional highlight extraction.
//!
//! Picks the lines of a transcript that read like hooks: short enough to post,
//! long enough to stand alone, and containing one of the indicator phrases.

use serde::{Deserialize, Serialize};

use super::dialogue::DialogueTurn;

/// Hard ceiling on highlights per transcript, whatever the configuration asks for.
pub const MAX_HIGHLIGHTS: usize = 5;

/// Phrases that mark a dramatic or attention-grabbing line.
pub const DEFAULT_HOOK_INDICATORS: [&str; 10] = [
    "wait",
    "but here's the thing",
    "the evidence",
    "nobody knew",
    "the truth",
    "what if",
    "think about it",
    "full body chills",
    "the timeline",
    "the alibi",
];

/// Highlight extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HighlightConfig {
    /// Maximum number of highlights kept
    #[serde(default = "default_max_highlights")]
    pub max_highlights: usize,

    /// Minimum trimmed length in characters (inclusive)
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,

    /// Maximum trimmed length in characters (inclusive)
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Indicator phrases, matched case-insensitively
    #[serde(default = "default_indicators")]
    pub indicators: Vec<String>,
}

const fn default_max_highlights() -> usize {
    5
}

const fn default_min_chars() -> usize {
    20
}

const fn default_max_chars() -> usize {
    280
}

fn default_indicators() -> Vec<String> {
    DEFAULT_HOOK_INDICATORS.iter().map(|s| (*s).to_string()).collect()
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            max_highlights: default_max_highlights(),
            min_chars: default_min_chars(),
            max_chars: default_max_chars(),
            indicators: default_indicators(),
        }
    }
}

impl HighlightConfig {
    fn is_hook(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.indicators
            .iter()
            .any(|indicator| lower.contains(&indicator.to_lowercase()))
    }

    fn fits(&self, text: &str) -> bool {
        let len = text.chars().count();
        (self.min_chars..=self.max_chars).contains(&len)
    }
}

/// Collect hook lines in transcript order, stopping at `max_highlights`
/// (never more than [`MAX_HIGHLIGHTS`]).
pub fn extract_highlights(turns: &[DialogueTurn], config: &HighlightConfig) -> Vec<String> {
    turns
        .iter()
        .map(|turn| turn.text().trim())
        .filter(|text| config.is_hook(text) && config.fits(text))
        .take(config.max_highlights.min(MAX_HIGHLIGHTS))
        .map(str::to_string)
        .collect()
}
