//! Hand-gesture Rock-Paper-Scissors.
//!
//! The player's move is read from hand-pose landmarks supplied by an external
//! detector. This crate covers the symbolic side of that pipeline:
//!
//! 1. `gesture`: landmark set -> gesture label, via an ordered rule table
//! 2. `round`: (player move, computer move) -> outcome and score delta
//! 3. `game`: per-frame gesture stream -> debounced rounds, match scoring,
//!    match reset, and the quit signal
//!
//! # Module Structure
//!
//! - `landmarks`: the 21-point `LandmarkSet` input contract
//! - `source`: landmark sources standing in for camera + detector (recordings, `stub://`)
//! - `config`: play-loop configuration (file + `RPS_*` env)
//! - `ui`: overlay text and terminal rendering of frame reports
//!
//! The core is single-threaded and infallible. The controller owns the only
//! mutable state and hands out immutable snapshots per frame.

pub mod config;
pub mod game;
pub mod gesture;
pub mod landmarks;
pub mod round;
pub mod source;
pub mod ui;

pub use config::PlayConfig;
pub use game::{
    FrameReport, MatchController, MatchState, MoveSource, RandomMoves, RoundReport,
    ScriptedMoves, SessionTally, Side, Signal,
};
pub use gesture::{classify, Gesture, GestureClassifier, MoveChoice};
pub use landmarks::{LandmarkSet, Point, LANDMARK_COUNT};
pub use round::{resolve, RoundOutcome, ScoreDelta};
pub use source::{HandFrame, LandmarkSource};
