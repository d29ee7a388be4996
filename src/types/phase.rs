//! Interaction phase definitions

use serde::{Deserialize, Serialize};

/// The five possible phases of an interaction session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Resting state, nothing targeted
    Idle,
    /// A pillar is under the pointer, not yet committed
    Hover,
    /// Commitment made, rupture opening (140 ms)
    Commit,
    /// Camera diving through the rupture (780 ms)
    Dive,
    /// Arrived, holding on the destination
    Hold,
}

impl Phase {
    /// Is the machine inside a committed sequence?
    pub fn is_committed(&self) -> bool {
        matches!(self, Phase::Commit | Phase::Dive | Phase::Hold)
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Phase::Idle => "\x1b[90m",   // Gray
            Phase::Hover => "\x1b[36m",  // Cyan
            Phase::Commit => "\x1b[33m", // Orange/Yellow
            Phase::Dive => "\x1b[35m",   // Magenta
            Phase::Hold => "\x1b[32m",   // Green
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for phase
    pub fn emoji(&self) -> &'static str {
        match self {
            Phase::Idle => "⚪",
            Phase::Hover => "👁",
            Phase::Commit => "💥",
            Phase::Dive => "🌀",
            Phase::Hold => "🏁",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "IDLE",
            Phase::Hover => "HOVER",
            Phase::Commit => "COMMIT",
            Phase::Dive => "DIVE",
            Phase::Hold => "HOLD",
        };
        write!(f, "{}", name)
    }
}
