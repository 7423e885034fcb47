//! Gesture classification.
//!
//! Rules are evaluated in a fixed priority order and the first match wins.
//! Some hands satisfy more than one rule, so the order is part of the contract:
//!
//! | priority | gesture  | extended            | curled              |
//! |----------|----------|---------------------|---------------------|
//! | 1        | Paper    | index middle ring pinky | -               |
//! | 2        | Scissors | index middle        | ring pinky          |
//! | 3        | Rock     | -                   | index middle ring pinky |
//! | 4        | ILoveYou | index pinky (thumb above index tip) | middle ring |
//! | 5        | Victory  | index middle        | ring pinky          |
//!
//! Victory carries the same predicate as Scissors and sits below it, so it is
//! never produced. The rule stays in the table to keep the overlap visible.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::landmarks::{Finger, LandmarkSet};

/// Symbolic reading of one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    Rock,
    Paper,
    Scissors,
    Victory,
    ILoveYou,
    /// Hand detected, shape not recognized.
    Unknown,
    /// No hand in the frame.
    #[default]
    None,
}

impl Gesture {
    /// Narrow to a playable move. Only Rock, Paper and Scissors decide rounds.
    pub fn as_move(self) -> Option<MoveChoice> {
        match self {
            Gesture::Rock => Some(MoveChoice::Rock),
            Gesture::Paper => Some(MoveChoice::Paper),
            Gesture::Scissors => Some(MoveChoice::Scissors),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gesture::Rock => "Rock",
            Gesture::Paper => "Paper",
            Gesture::Scissors => "Scissors",
            Gesture::Victory => "Victory",
            Gesture::ILoveYou => "I Love You",
            Gesture::Unknown => "Unknown",
            Gesture::None => "None",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gesture {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "rock" => Ok(Gesture::Rock),
            "paper" => Ok(Gesture::Paper),
            "scissors" => Ok(Gesture::Scissors),
            "victory" => Ok(Gesture::Victory),
            "iloveyou" | "ily" => Ok(Gesture::ILoveYou),
            "unknown" => Ok(Gesture::Unknown),
            "none" => Ok(Gesture::None),
            _ => Err(anyhow!("unrecognized gesture '{}'", s)),
        }
    }
}

/// A legal computer move, and the only legal round-deciding player move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveChoice {
    Rock,
    Paper,
    Scissors,
}

impl MoveChoice {
    pub const ALL: [MoveChoice; 3] = [MoveChoice::Rock, MoveChoice::Paper, MoveChoice::Scissors];

    /// Rock beats Scissors, Paper beats Rock, Scissors beats Paper.
    pub fn beats(self, other: MoveChoice) -> bool {
        matches!(
            (self, other),
            (MoveChoice::Rock, MoveChoice::Scissors)
                | (MoveChoice::Paper, MoveChoice::Rock)
                | (MoveChoice::Scissors, MoveChoice::Paper)
        )
    }
}

impl From<MoveChoice> for Gesture {
    fn from(choice: MoveChoice) -> Self {
        match choice {
            MoveChoice::Rock => Gesture::Rock,
            MoveChoice::Paper => Gesture::Paper,
            MoveChoice::Scissors => Gesture::Scissors,
        }
    }
}

impl fmt::Display for MoveChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Gesture::from(*self).label())
    }
}

impl FromStr for MoveChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let gesture: Gesture = s.parse()?;
        gesture
            .as_move()
            .ok_or_else(|| anyhow!("'{}' is not a playable move", s))
    }
}

/// One entry of the priority table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub gesture: Gesture,
    matches: fn(&LandmarkSet) -> bool,
}

impl Rule {
    pub fn matches(&self, hand: &LandmarkSet) -> bool {
        (self.matches)(hand)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("gesture", &self.gesture).finish()
    }
}

fn all_extended(hand: &LandmarkSet) -> bool {
    Finger::ALL.iter().all(|&finger| hand.is_extended(finger))
}

fn two_finger_v(hand: &LandmarkSet) -> bool {
    hand.is_extended(Finger::Index)
        && hand.is_extended(Finger::Middle)
        && hand.is_curled(Finger::Ring)
        && hand.is_curled(Finger::Pinky)
}

fn all_curled(hand: &LandmarkSet) -> bool {
    Finger::ALL.iter().all(|&finger| hand.is_curled(finger))
}

fn horns_with_thumb(hand: &LandmarkSet) -> bool {
    hand.thumb_above_index()
        && hand.is_extended(Finger::Index)
        && hand.is_extended(Finger::Pinky)
        && hand.is_curled(Finger::Middle)
        && hand.is_curled(Finger::Ring)
}

/// Priority order. First match wins.
pub const RULES: [Rule; 5] = [
    Rule {
        gesture: Gesture::Paper,
        matches: all_extended,
    },
    Rule {
        gesture: Gesture::Scissors,
        matches: two_finger_v,
    },
    Rule {
        gesture: Gesture::Rock,
        matches: all_curled,
    },
    Rule {
        gesture: Gesture::ILoveYou,
        matches: horns_with_thumb,
    },
    // Shadowed by Scissors above.
    Rule {
        gesture: Gesture::Victory,
        matches: two_finger_v,
    },
];

/// Stateless landmark-to-gesture classifier.
#[derive(Clone, Copy, Debug)]
pub struct GestureClassifier {
    rules: &'static [Rule],
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self { rules: &RULES }
    }

    /// Total over well-formed landmark sets: always exactly one gesture.
    pub fn classify(&self, hand: &LandmarkSet) -> Gesture {
        self.rules
            .iter()
            .find(|rule| rule.matches(hand))
            .map(|rule| rule.gesture)
            .unwrap_or(Gesture::Unknown)
    }

    /// Classify the first hand of a frame, or `Gesture::None` when there is none.
    pub fn classify_frame(&self, hand: Option<&LandmarkSet>) -> Gesture {
        hand.map_or(Gesture::None, |hand| self.classify(hand))
    }

    pub fn rules(&self) -> &[Rule] {
        self.rules
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify with the default rule table.
pub fn classify(hand: &LandmarkSet) -> Gesture {
    GestureClassifier::new().classify(hand)
}
