//! Single-round resolution.

use serde::{Deserialize, Serialize};

use crate::gesture::MoveChoice;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Tie,
    PlayerWin,
    ComputerWin,
}

/// Points awarded by one round. At most one side scores, by exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub player: u32,
    pub computer: u32,
}

impl RoundOutcome {
    pub fn delta(self) -> ScoreDelta {
        match self {
            RoundOutcome::Tie => ScoreDelta::default(),
            RoundOutcome::PlayerWin => ScoreDelta {
                player: 1,
                computer: 0,
            },
            RoundOutcome::ComputerWin => ScoreDelta {
                player: 0,
                computer: 1,
            },
        }
    }

    pub fn result_text(self) -> &'static str {
        match self {
            RoundOutcome::Tie => "It's a Tie!",
            RoundOutcome::PlayerWin => "You Win!",
            RoundOutcome::ComputerWin => "Computer Wins!",
        }
    }
}

/// Total over the 3x3 move space.
pub fn resolve(player: MoveChoice, computer: MoveChoice) -> RoundOutcome {
    if player == computer {
        RoundOutcome::Tie
    } else if player.beats(computer) {
        RoundOutcome::PlayerWin
    } else {
        RoundOutcome::ComputerWin
    }
}
