//! Hooks command: re-extract highlights from a saved transcript.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, Transcript, MAX_HIGHLIGHTS};

#[derive(Args, Debug)]
pub struct HooksArgs {
    /// Transcript JSON written by `generate --output`
    pub transcript: PathBuf,

    /// Maximum number of highlights, 1 to 5 (defaults to highlights.max_highlights)
    #[arg(
        long,
        short = 'm',
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_HIGHLIGHTS as u64)
    )]
    pub max: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HooksOutput {
    pub script_id: String,
    pub episode_title: String,
    pub highlights: Vec<String>,
}

impl CommandOutput for HooksOutput {
    fn to_human(&self) -> String {
        if self.highlights.is_empty() {
            return format!("No highlights found in {}.", self.episode_title);
        }

        let mut lines = vec![format!(
            "{} highlight(s) from {}:\n",
            self.highlights.len(),
            self.episode_title
        )];
        lines.extend(
            self.highlights
                .iter()
                .enumerate()
                .map(|(i, h)| format!("{}. {h}", i + 1)),
        );
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: &HooksArgs, config: &Config, json_mode: bool) -> Result<()> {
    let result = extract(args, config)?;
    output(&result, json_mode);
    Ok(())
}

/// Load a saved transcript and recompute its highlights.
pub fn extract(args: &HooksArgs, config: &Config) -> Result<HooksOutput> {
    let body = std::fs::read_to_string(&args.transcript)
        .with_context(|| format!("Failed to read {}", args.transcript.display()))?;
    let transcript: Transcript = serde_json::from_str(&body)
        .with_context(|| format!("Invalid transcript in {}", args.transcript.display()))?;

    let mut highlight_config = config.highlights.clone();
    if let Some(max) = args.max {
        highlight_config.max_highlights = max;
    }
    let transcript = transcript.with_highlight_config(&highlight_config);

    Ok(HooksOutput {
        script_id: transcript.script_id().to_string(),
        episode_title: transcript.episode_title().to_string(),
        highlights: transcript.highlights().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn transcript_file() -> NamedTempFile {
        let json = serde_json::json!({
            "script_id": "script-0123456789ab",
            "case_id": "case-7",
            "episode_title": "The Duluth, MN Mystery: Mill Pond",
            "turns": [
                {"speaker": "host_a", "text": "Wait, the scarf was dry when they found it?"},
                {"speaker": "host_b", "text": "The evidence log says exactly that."},
                {"speaker": "host_a", "text": "What if someone placed it there after the rain?"},
                {"speaker": "host_b", "text": "Possible."}
            ]
        });
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), json.to_string()).unwrap();
        file
    }

    #[test]
    fn test_extracts_with_configured_limit() {
        let file = transcript_file();
        let args = HooksArgs {
            transcript: file.path().to_path_buf(),
            max: Some(2),
        };

        let result = extract(&args, &Config::default()).unwrap();
        assert_eq!(result.script_id, "script-0123456789ab");
        assert_eq!(
            result.highlights,
            [
                "Wait, the scarf was dry when they found it?",
                "The evidence log says exactly that."
            ]
        );
        assert!(result.to_human().starts_with("2 highlight(s)"));
    }

    #[test]
    fn test_limit_above_ceiling_is_clamped() {
        let file = transcript_file();
        let mut config = Config::default();
        config.highlights.max_highlights = 50;
        let args = HooksArgs {
            transcript: file.path().to_path_buf(),
            max: Some(9),
        };

        let result = extract(&args, &config).unwrap();
        assert_eq!(result.highlights.len(), 3);
        assert!(result.highlights.len() <= MAX_HIGHLIGHTS);
    }

    #[test]
    fn test_rejects_invalid_transcript() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"script_id": "x"}"#).unwrap();
        let args = HooksArgs {
            transcript: file.path().to_path_buf(),
            max: None,
        };
        assert!(extract(&args, &Config::default()).is_err());
    }
}
