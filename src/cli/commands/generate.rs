//! Generate command: run a full two-host debate over a case file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::adapters::speakers::{ClaudeSpeaker, ScriptedSpeaker};
use crate::cli::output::{
    create_progress_bar, output, truncate, CommandOutput, ProgressBarExt, TranscriptTable,
};
use crate::domain::models::{CaseFile, Config, Speaker, Transcript};
use crate::domain::ports::SpeakerAgent;
use crate::infrastructure::claude::{ClaudeClient, ClaudeClientConfig};
use crate::services::{DialogueGenerator, RetryController, RetryPolicy};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Case file (YAML or JSON)
    #[arg(long, short = 'c')]
    pub case: PathBuf,

    /// Number of exchanges (defaults to dialogue.exchanges)
    #[arg(long, short = 'e')]
    pub exchanges: Option<usize>,

    /// Write the transcript JSON to this file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Use scripted placeholder hosts instead of the API
    #[arg(long)]
    pub dry_run: bool,

    /// Abort the whole run after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct TurnOutput {
    pub speaker: Speaker,
    pub host: String,
    pub emotion_tag: String,
    pub text: String,
    pub tts: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateOutput {
    #[serde(skip)]
    pub table: String,
    pub script_id: String,
    pub case_id: String,
    pub episode_title: String,
    pub turns: Vec<TurnOutput>,
    pub highlights: Vec<String>,
    pub saved_to: Option<PathBuf>,
}

impl GenerateOutput {
    fn new(transcript: &Transcript, config: &Config, saved_to: Option<PathBuf>) -> Self {
        let dialogue = &config.dialogue;
        let turns = transcript
            .turns()
            .iter()
            .map(|turn| TurnOutput {
                speaker: turn.speaker(),
                host: match turn.speaker() {
                    Speaker::HostA => dialogue.host_a.name.clone(),
                    Speaker::HostB => dialogue.host_b.name.clone(),
                },
                emotion_tag: turn.emotion_tag().to_string(),
                text: turn.text().to_string(),
                tts: turn.to_tts_markup(),
            })
            .collect();

        Self {
            table: TranscriptTable::new().render(transcript, dialogue),
            script_id: transcript.script_id().to_string(),
            case_id: transcript.case_id().to_string(),
            episode_title: transcript.episode_title().to_string(),
            highlights: transcript.highlights().to_vec(),
            turns,
            saved_to,
        }
    }
}

impl CommandOutput for GenerateOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            console::style(&self.episode_title).bold().to_string(),
            format!("Script: {}  Case: {}", self.script_id, self.case_id),
            String::new(),
            self.table.clone(),
        ];

        if !self.highlights.is_empty() {
            lines.push(String::new());
            lines.push(console::style("Highlights").bold().to_string());
            lines.extend(self.highlights.iter().map(|h| format!("  • {h}")));
        }

        if let Some(path) = &self.saved_to {
            lines.push(String::new());
            lines.push(format!("Transcript saved to {}", path.display()));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: GenerateArgs, config: &Config, json_mode: bool) -> Result<()> {
    let case = load_case(&args.case)?;
    let exchanges = args.exchanges.unwrap_or(config.dialogue.exchanges);
    if exchanges == 0 {
        bail!("--exchanges must be at least 1");
    }

    let (host_a, host_b) = build_speakers(config, args.dry_run)?;
    let retry = RetryController::new(RetryPolicy::from_config(&config.retry));

    let progress = create_progress_bar((exchanges * 2) as u64, json_mode);
    progress.set_message(truncate(&format!("{} - {}", case.title, case.location), 60));
    let tick = progress.clone();
    let host_a_name = config.dialogue.host_a.short_name.clone();
    let host_b_name = config.dialogue.host_b.short_name.clone();

    let generator = DialogueGenerator::new(
        host_a,
        host_b,
        retry,
        config.dialogue.clone(),
        config.highlights.clone(),
    )
    .on_turn(move |count, turn| {
        let host = match turn.speaker() {
            Speaker::HostA => &host_a_name,
            Speaker::HostB => &host_b_name,
        };
        tick.set_message(format!("{host} [{}]", turn.emotion_tag()));
        tick.set_position(count as u64);
    });

    let run = generator.generate_dialogue(&case, exchanges);
    let result = match args.timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), run)
            .await
            .with_context(|| format!("Generation timed out after {secs}s"))?,
        None => run.await,
    };

    let transcript = match result {
        Ok(transcript) => {
            progress.finish_success(format!("{} turns", transcript.len()));
            transcript
        }
        Err(err) => {
            progress.finish_error("generation failed");
            return Err(err).context("Dialogue generation failed");
        }
    };

    if let Some(path) = &args.output {
        save_transcript(&transcript, path)?;
        info!("Transcript saved to {}", path.display());
    }

    output(&GenerateOutput::new(&transcript, config, args.output), json_mode);
    Ok(())
}

fn build_speakers(
    config: &Config,
    dry_run: bool,
) -> Result<(Arc<dyn SpeakerAgent>, Arc<dyn SpeakerAgent>)> {
    let dialogue = &config.dialogue;

    if dry_run {
        return Ok((
            Arc::new(ScriptedSpeaker::new(dialogue.host_a.name.clone())),
            Arc::new(ScriptedSpeaker::new(dialogue.host_b.name.clone())),
        ));
    }

    let client_config = ClaudeClientConfig::from_anthropic(&config.anthropic)?;
    let client = ClaudeClient::new(client_config)?;

    Ok((
        Arc::new(ClaudeSpeaker::for_host(
            client.clone(),
            &config.anthropic,
            dialogue,
            Speaker::HostA,
        )),
        Arc::new(ClaudeSpeaker::for_host(
            client,
            &config.anthropic,
            dialogue,
            Speaker::HostB,
        )),
    ))
}

/// Read a case file; `.json` files are parsed as JSON, anything else as YAML.
pub fn load_case(path: &Path) -> Result<CaseFile> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read case file {}", path.display()))?;

    let case: CaseFile = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&body)
            .with_context(|| format!("Invalid case JSON in {}", path.display()))?
    } else {
        serde_yaml::from_str(&body)
            .with_context(|| format!("Invalid case YAML in {}", path.display()))?
    };

    case.validate()
        .with_context(|| format!("Invalid case file {}", path.display()))?;
    Ok(case)
}

fn save_transcript(transcript: &Transcript, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(transcript)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CASE_YAML: &str = r"
case_id: case-1994-lr
title: The Lantern Road Disappearance
location: Asheville, NC
date_occurred: '1994-06-11'
raw_content: A hiker vanished from a marked trail. Her car was found two miles away.
evidence_list:
  - evidence_id: ev-1
    evidence_type: physical
    description: Car found unlocked with keys in the ignition
";

    #[test]
    fn test_load_case_yaml_and_json() {
        let dir = TempDir::new().unwrap();
        let yaml_path = dir.path().join("case.yaml");
        std::fs::write(&yaml_path, CASE_YAML).unwrap();

        let case = load_case(&yaml_path).unwrap();
        assert_eq!(case.case_id, "case-1994-lr");
        assert_eq!(case.evidence.len(), 1);

        let json_path = dir.path().join("case.json");
        std::fs::write(&json_path, serde_json::to_string(&case).unwrap()).unwrap();
        assert_eq!(load_case(&json_path).unwrap().title, case.title);
    }

    #[test]
    fn test_load_case_rejects_blank_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("case.yaml");
        std::fs::write(&path, "case_id: c\ntitle: ' '\nlocation: x\nraw_content: y\n").unwrap();
        assert!(load_case(&path).is_err());
    }

    #[tokio::test]
    async fn test_dry_run_writes_transcript() {
        let dir = TempDir::new().unwrap();
        let case_path = dir.path().join("case.yaml");
        std::fs::write(&case_path, CASE_YAML).unwrap();
        let out_path = dir.path().join("out").join("episode.json");

        let args = GenerateArgs {
            case: case_path,
            exchanges: Some(4),
            output: Some(out_path.clone()),
            dry_run: true,
            timeout_secs: Some(30),
        };
        execute(args, &Config::default(), true).await.unwrap();

        let saved: Transcript =
            serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(saved.len(), 8);
        assert_eq!(saved.case_id(), "case-1994-lr");
        assert_eq!(
            saved.episode_title(),
            "The Asheville, NC Mystery: The Lantern Road Disappearance"
        );
    }

    #[test]
    fn test_json_output_carries_hosts_markup_and_path() {
        use crate::domain::models::{DialogueTurn, EmotionTag};

        let case = CaseFile::new("case-7", "Mill Pond", "Duluth, MN", "A scarf by the water.");
        let turns = vec![
            DialogueTurn::new(Speaker::HostA, "Wait, the scarf was dry?", EmotionTag::Gasps).unwrap(),
            DialogueTurn::new(Speaker::HostB, "Bone dry.", EmotionTag::Neutral).unwrap(),
        ];
        let transcript =
            Transcript::compile(&case, turns, &Config::default().highlights).unwrap();

        let out = GenerateOutput::new(
            &transcript,
            &Config::default(),
            Some(PathBuf::from("out/episode.json")),
        );
        let json = out.to_json();

        assert_eq!(json["script_id"], transcript.script_id());
        assert_eq!(json["saved_to"], "out/episode.json");
        assert_eq!(json["turns"][0]["host"], "Maya Vance");
        assert_eq!(json["turns"][0]["tts"], "[gasps] Wait, the scarf was dry?");
        assert_eq!(json["turns"][1]["host"], "Dr. Aris Thorne");
        assert_eq!(json["turns"][1]["tts"], "Bone dry.");
        assert_eq!(json["highlights"][0], "Wait, the scarf was dry?");
        assert!(json.get("table").is_none());
    }

    #[tokio::test]
    async fn test_live_run_requires_api_key() {
        let dir = TempDir::new().unwrap();
        let case_path = dir.path().join("case.yaml");
        std::fs::write(&case_path, CASE_YAML).unwrap();

        let args = GenerateArgs {
            case: case_path,
            exchanges: Some(1),
            output: None,
            dry_run: false,
            timeout_secs: None,
        };
        let err = execute(args, &Config::default(), true).await.unwrap_err();
        assert!(err.to_string().contains("Missing API key"));
    }
}
