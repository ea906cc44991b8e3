//! Prompt construction for each host turn.
//!
//! A prompt is a fixed-size case prefix, a sliding window over the most
//! recent turns, and a positional instruction. Only the window moves as the
//! episode grows, so prompt size stays bounded however many exchanges run.

use std::fmt::Write as _;

use crate::domain::models::{
    CaseFile, DialogueConfig, DialogueTurn, HostProfile, Speaker, TurnFraming,
};

/// Builds per-turn prompts from a case file and the dialogue so far.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    config: DialogueConfig,
}

impl PromptBuilder {
    pub const fn new(config: DialogueConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &DialogueConfig {
        &self.config
    }

    pub const fn host(&self, speaker: Speaker) -> &HostProfile {
        match speaker {
            Speaker::HostA => &self.config.host_a,
            Speaker::HostB => &self.config.host_b,
        }
    }

    /// Assemble the full prompt for `speaker` given all turns so far.
    pub fn build(
        &self,
        case: &CaseFile,
        history: &[DialogueTurn],
        speaker: Speaker,
        framing: TurnFraming,
    ) -> String {
        let mut prompt = self.case_prefix(case);
        prompt.push('\n');
        prompt.push_str(&self.recent_conversation(history));
        prompt.push('\n');
        prompt.push_str(&self.instruction(speaker, framing));
        prompt
    }

    /// Case information block. Independent of conversation length.
    pub fn case_prefix(&self, case: &CaseFile) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "CASE INFORMATION:");
        let _ = writeln!(out, "Title: {}", case.title);
        let _ = writeln!(out, "Location: {}", case.location);
        let _ = writeln!(
            out,
            "Date: {}",
            case.date_occurred.as_deref().unwrap_or("Unknown")
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "CASE DETAILS:");
        let _ = writeln!(
            out,
            "{}",
            truncate_chars(&case.raw_content, self.config.max_case_chars)
        );

        if !case.evidence.is_empty() && self.config.max_evidence > 0 {
            let _ = writeln!(out);
            let _ = writeln!(out, "KEY EVIDENCE:");
            for item in case.evidence.iter().take(self.config.max_evidence) {
                let _ = writeln!(
                    out,
                    "- {}: {}",
                    item.evidence_type,
                    truncate_chars(&item.description, self.config.max_evidence_chars)
                );
            }
        }

        out
    }

    /// The last `context_window_turns` turns, oldest first. Empty before the first turn.
    pub fn recent_conversation(&self, history: &[DialogueTurn]) -> String {
        let window = recent_window(history, self.config.context_window_turns);
        if window.is_empty() {
            return String::new();
        }

        let mut out = String::from("RECENT CONVERSATION:\n");
        for turn in window {
            let _ = writeln!(out, "{}: {}", self.host(turn.speaker()).short_name, turn.text());
        }
        out
    }

    /// Positional instruction for `speaker`.
    pub fn instruction(&self, speaker: Speaker, framing: TurnFraming) -> String {
        let show = &self.config.show_name;
        let me = &self.host(speaker).name;
        let other = &self.host(speaker.counterpart()).name;

        match (framing, speaker) {
            (TurnFraming::Opening, _) => format!(
                "You are OPENING this episode of {show}. This is the INTRO.\n\
                 - Welcome listeners to {show}\n\
                 - Introduce yourself and mention {other}\n\
                 - Briefly tease this week's case to hook listeners\n\
                 - Set the tone for the investigation ahead\n\
                 Generate your opening dialogue line as {me}."
            ),
            (TurnFraming::OpeningResponse, _) => format!(
                "{other} just opened the show. Respond as {me} with your intro.\n\
                 - Greet listeners in your own voice\n\
                 - Acknowledge {other}'s opening\n\
                 - Set expectations for how you will approach this case\n\
                 Generate your opening dialogue line as {me}."
            ),
            (TurnFraming::Closing, Speaker::HostA) => format!(
                "You are CLOSING this episode of {show}. This is the OUTRO.\n\
                 - Summarize the key theories discussed\n\
                 - Thank listeners for joining\n\
                 - Remind them to follow {show} for next week's case\n\
                 - Sign off with warmth\n\
                 Generate your closing dialogue line as {me}."
            ),
            (TurnFraming::Closing, Speaker::HostB) => format!(
                "You are helping CLOSE this episode of {show}.\n\
                 - Summarize what the evidence actually supports\n\
                 - Acknowledge what remains unknown about this case\n\
                 - Encourage listeners to think critically\n\
                 - Sign off\n\
                 Generate your closing dialogue line as {me}."
            ),
            (TurnFraming::Continue, Speaker::HostA) => format!(
                "Continue the discussion as {me}.\n\
                 Respond to {other}'s last point while advancing your own read of the case.\n\
                 Generate your next dialogue line."
            ),
            (TurnFraming::Continue, Speaker::HostB) => format!(
                "Respond to {other}'s last point as {me}.\n\
                 Challenge the theory with evidence-based analysis.\n\
                 Generate your next dialogue line."
            ),
        }
    }
}

/// Tail of `history` holding at most `size` turns.
pub fn recent_window(history: &[DialogueTurn], size: usize) -> &[DialogueTurn] {
    &history[history.len().saturating_sub(size)..]
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
