use std::fmt;

use serde::{Deserialize, Serialize};

/// Exchanges per closing exchange: episodes close over `max(1, E / 10)` exchanges.
pub const EXCHANGES_PER_CLOSING_EXCHANGE: usize = 10;

/// Positional framing of a turn within an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnFraming {
    /// First turn of the episode: introduce the show and the case.
    Opening,
    /// Second turn: the other host's intro in reply to the opening.
    OpeningResponse,
    /// Mid-episode: respond to the other host's last point.
    Continue,
    /// Final turns: summarize and sign off.
    Closing,
}

impl TurnFraming {
    /// Framing for position `turn_index` in an episode of `exchanges` exchanges.
    ///
    /// The first two turns always open the show, even when they also fall in
    /// the closing range of a very short episode.
    pub fn for_turn(turn_index: usize, exchanges: usize) -> Self {
        let total_turns = exchanges.saturating_mul(2);
        let closing_turns = closing_exchanges(exchanges).saturating_mul(2);

        match turn_index {
            0 => Self::Opening,
            1 => Self::OpeningResponse,
            i if i >= total_turns.saturating_sub(closing_turns) => Self::Closing,
            _ => Self::Continue,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::OpeningResponse => "opening_response",
            Self::Continue => "continue",
            Self::Closing => "closing",
        }
    }
}

impl fmt::Display for TurnFraming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of trailing exchanges framed as closing.
pub const fn closing_exchanges(exchanges: usize) -> usize {
    let scaled = exchanges / EXCHANGES_PER_CLOSING_EXCHANGE;
    if scaled == 0 {
        1
    } else {
        scaled
    }
}
