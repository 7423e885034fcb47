//! Match controller.
//!
//! Turns a per-frame stream of gestures into rounds and matches:
//!
//! - `ILoveYou` requests a quit and touches nothing.
//! - Frames that carry no playable move (`None`, `Unknown`) only re-render.
//! - A playable move equal to the last accepted gesture is debounced, so a held
//!   hand scores once. The player must change shape to play again.
//! - Any other playable move decides a round against a freshly drawn computer move.
//!
//! After each frame the target score is checked. When either side reaches it the
//! frame reports `MatchWon` with the winning score in its snapshot, and the
//! controller resets both scores before returning.

pub mod moves;

use serde::Serialize;
use std::fmt;

use crate::gesture::{Gesture, MoveChoice};
use crate::round::{resolve, RoundOutcome, ScoreDelta};

pub use moves::{MoveSource, RandomMoves, ScriptedMoves};

/// Points needed to win a match.
pub const DEFAULT_TARGET_SCORE: u32 = 5;

pub const INITIAL_RESULT_TEXT: &str = "Make a gesture!";

/// Renderable game state. Written only by `MatchController`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchState {
    last_gesture: Gesture,
    computer_move: MoveChoice,
    result_text: String,
    player_score: u32,
    computer_score: u32,
}

impl MatchState {
    fn new(computer_move: MoveChoice) -> Self {
        Self {
            last_gesture: Gesture::None,
            computer_move,
            result_text: INITIAL_RESULT_TEXT.to_string(),
            player_score: 0,
            computer_score: 0,
        }
    }

    /// Most recently accepted player gesture (`None` before the first round).
    pub fn last_gesture(&self) -> Gesture {
        self.last_gesture
    }

    pub fn computer_move(&self) -> MoveChoice {
        self.computer_move
    }

    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn computer_score(&self) -> u32 {
        self.computer_score
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Side {
    Player,
    Computer,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.write_str("You"),
            Side::Computer => f.write_str("Computer"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub player: MoveChoice,
    pub computer: MoveChoice,
    pub outcome: RoundOutcome,
    pub delta: ScoreDelta,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Signal {
    RoundDecided(RoundReport),
    MatchWon(Side),
    /// The caller must stop its frame loop.
    QuitRequested,
}

/// Output of one `observe` call. An empty signal list means render-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub gesture: Gesture,
    pub state: MatchState,
    pub signals: Vec<Signal>,
}

impl FrameReport {
    pub fn round(&self) -> Option<&RoundReport> {
        self.signals.iter().find_map(|signal| match signal {
            Signal::RoundDecided(report) => Some(report),
            _ => None,
        })
    }

    pub fn match_winner(&self) -> Option<Side> {
        self.signals.iter().find_map(|signal| match signal {
            Signal::MatchWon(side) => Some(*side),
            _ => None,
        })
    }

    pub fn quit_requested(&self) -> bool {
        self.signals.contains(&Signal::QuitRequested)
    }
}

/// Counters across matches for the end-of-session summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionTally {
    pub frames: u64,
    pub rounds: u64,
    pub player_matches: u32,
    pub computer_matches: u32,
}

pub struct MatchController<M = RandomMoves> {
    state: MatchState,
    moves: M,
    target_score: u32,
    tally: SessionTally,
}

impl<M: MoveSource> MatchController<M> {
    /// Draws the opening computer move from `moves`.
    pub fn new(mut moves: M) -> Self {
        let opening = moves.next_move();
        Self {
            state: MatchState::new(opening),
            moves,
            target_score: DEFAULT_TARGET_SCORE,
            tally: SessionTally::default(),
        }
    }

    /// Zero is raised to one.
    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.target_score = target_score.max(1);
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn tally(&self) -> SessionTally {
        self.tally
    }

    /// Advance by one frame's gesture.
    pub fn observe(&mut self, gesture: Gesture) -> FrameReport {
        self.tally.frames += 1;

        if gesture == Gesture::ILoveYou {
            log::info!(
                "quit gesture at score {}-{}",
                self.state.player_score,
                self.state.computer_score
            );
            return FrameReport {
                gesture,
                state: self.state.clone(),
                signals: vec![Signal::QuitRequested],
            };
        }

        let mut signals = Vec::new();
        match gesture.as_move() {
            None => {}
            Some(_) if gesture == self.state.last_gesture => {}
            Some(player) => {
                let report = self.play_round(gesture, player);
                signals.push(Signal::RoundDecided(report));
            }
        }

        let state = self.state.clone();
        if let Some(winner) = self.match_winner() {
            signals.push(Signal::MatchWon(winner));
            self.finish_match(winner);
        }

        FrameReport {
            gesture,
            state,
            signals,
        }
    }

    fn play_round(&mut self, gesture: Gesture, player: MoveChoice) -> RoundReport {
        let computer = self.moves.next_move();
        let outcome = resolve(player, computer);
        let delta = outcome.delta();

        self.state.last_gesture = gesture;
        self.state.computer_move = computer;
        self.state.result_text = outcome.result_text().to_string();
        self.state.player_score += delta.player;
        self.state.computer_score += delta.computer;
        self.tally.rounds += 1;

        log::debug!(
            "round {}: {} vs {} -> {:?} ({}-{})",
            self.tally.rounds,
            player,
            computer,
            outcome,
            self.state.player_score,
            self.state.computer_score
        );

        RoundReport {
            player,
            computer,
            outcome,
            delta,
        }
    }

    fn match_winner(&self) -> Option<Side> {
        if self.state.player_score >= self.target_score {
            Some(Side::Player)
        } else if self.state.computer_score >= self.target_score {
            Some(Side::Computer)
        } else {
            None
        }
    }

    /// Scores go back to zero; last gesture and computer move carry over.
    fn finish_match(&mut self, winner: Side) {
        log::info!(
            "match won by {} ({}-{})",
            winner,
            self.state.player_score,
            self.state.computer_score
        );
        match winner {
            Side::Player => self.tally.player_matches += 1,
            Side::Computer => self.tally.computer_matches += 1,
        }
        self.state.player_score = 0;
        self.state.computer_score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MoveChoice::{Paper, Rock, Scissors};

    fn controller(moves: &[MoveChoice]) -> MatchController<ScriptedMoves> {
        MatchController::new(ScriptedMoves::new(moves.to_vec()).unwrap())
    }

    fn rounds(report: &FrameReport) -> usize {
        report
            .signals
            .iter()
            .filter(|s| matches!(s, Signal::RoundDecided(_)))
            .count()
    }

    #[test]
    fn starts_with_defaults_and_opening_move() {
        let game = controller(&[Paper]);
        let state = game.state();
        assert_eq!(state.last_gesture(), Gesture::None);
        assert_eq!(state.computer_move(), Paper);
        assert_eq!(state.result_text(), INITIAL_RESULT_TEXT);
        assert_eq!((state.player_score(), state.computer_score()), (0, 0));
    }

    #[test]
    fn held_gesture_scores_once() {
        let mut game = controller(&[Rock, Scissors]);
        let first = game.observe(Gesture::Rock);
        let second = game.observe(Gesture::Rock);
        assert_eq!(rounds(&first), 1);
        assert!(second.signals.is_empty());
        assert_eq!(game.state().player_score(), 1);
        assert_eq!(game.tally().rounds, 1);
    }

    #[test]
    fn changing_gesture_retriggers() {
        let mut game = controller(&[Rock]);
        let total: usize = [Gesture::Rock, Gesture::Paper, Gesture::Rock]
            .into_iter()
            .map(|g| rounds(&game.observe(g)))
            .sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn no_hand_or_unknown_does_not_reset_debounce() {
        let mut game = controller(&[Rock, Scissors]);
        game.observe(Gesture::Rock);
        assert!(game.observe(Gesture::None).signals.is_empty());
        assert!(game.observe(Gesture::Unknown).signals.is_empty());
        assert!(game.observe(Gesture::Rock).signals.is_empty());
        assert_eq!(game.state().last_gesture(), Gesture::Rock);
    }

    #[test]
    fn victory_is_render_only() {
        let mut game = controller(&[Rock]);
        let report = game.observe(Gesture::Victory);
        assert!(report.signals.is_empty());
        assert_eq!(game.state().last_gesture(), Gesture::None);
    }

    #[test]
    fn reaching_target_wins_and_resets() {
        let mut game = controller(&[Rock, Scissors, Rock, Scissors, Rock, Scissors]);
        for gesture in [Gesture::Rock, Gesture::Paper, Gesture::Rock, Gesture::Paper] {
            let report = game.observe(gesture);
            assert_eq!(report.match_winner(), None);
        }
        assert_eq!(game.state().player_score(), 4);

        let report = game.observe(Gesture::Rock);
        assert_eq!(report.round().unwrap().outcome, RoundOutcome::PlayerWin);
        assert_eq!(report.match_winner(), Some(Side::Player));
        assert_eq!(report.state.player_score(), 5);

        assert_eq!(game.state().player_score(), 0);
        assert_eq!(game.state().computer_score(), 0);
        assert_eq!(game.state().last_gesture(), Gesture::Rock);
        assert_eq!(game.state().computer_move(), Scissors);
        assert_eq!(game.tally().player_matches, 1);

        let next = game.observe(Gesture::Rock);
        assert!(next.signals.is_empty());
        assert_eq!(next.state.player_score(), 0);
    }

    #[test]
    fn computer_can_win_the_match() {
        let mut game = controller(&[Rock, Paper, Rock]).with_target_score(2);
        game.observe(Gesture::Rock);
        let report = game.observe(Gesture::Scissors);
        assert_eq!(report.match_winner(), Some(Side::Computer));
        assert_eq!(report.state.computer_score(), 2);
        assert_eq!(game.tally().computer_matches, 1);
    }

    #[test]
    fn quit_gesture_never_mutates() {
        let mut game = controller(&[Rock, Scissors]);
        game.observe(Gesture::Rock);
        let before = game.state().clone();
        let report = game.observe(Gesture::ILoveYou);
        assert_eq!(report.signals, vec![Signal::QuitRequested]);
        assert!(report.quit_requested());
        assert_eq!(game.state(), &before);
        assert_eq!(report.state, before);
    }

    #[test]
    fn zero_target_is_raised_to_one() {
        let game = controller(&[Rock]).with_target_score(0);
        assert_eq!(game.target_score(), 1);
    }
}
