//! Table output for transcripts using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use crate::domain::models::{DialogueConfig, EmotionTag, Speaker, Transcript};

/// Renders a transcript as a three-column table: host, cue, line.
pub struct TranscriptTable {
    use_colors: bool,
    max_width: Option<u16>,
}

impl TranscriptTable {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    pub fn render(&self, transcript: &Transcript, dialogue: &DialogueConfig) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Host").add_attribute(Attribute::Bold),
            Cell::new("Cue").add_attribute(Attribute::Bold),
            Cell::new("Line").add_attribute(Attribute::Bold),
        ]);

        for (i, turn) in transcript.turns().iter().enumerate() {
            let host = match turn.speaker() {
                Speaker::HostA => &dialogue.host_a.short_name,
                Speaker::HostB => &dialogue.host_b.short_name,
            };
            let host_cell = if self.use_colors {
                Cell::new(host).fg(speaker_color(turn.speaker()))
            } else {
                Cell::new(host)
            };
            let cue = match turn.emotion_tag() {
                EmotionTag::Neutral => String::new(),
                tag => tag.to_string(),
            };

            table.add_row(vec![
                Cell::new(i + 1),
                host_cell,
                Cell::new(cue),
                Cell::new(turn.text()),
            ]);
        }

        table.to_string()
    }
}

impl Default for TranscriptTable {
    fn default() -> Self {
        Self::new()
    }
}

const fn speaker_color(speaker: Speaker) -> Color {
    match speaker {
        Speaker::HostA => Color::Magenta,
        Speaker::HostB => Color::Cyan,
    }
}

/// Colors are off when `NO_COLOR` is set or stdout is not a terminal.
fn supports_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().features().colors_supported()
}
