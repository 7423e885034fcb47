//! Computer move sources.

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::gesture::MoveChoice;

/// Supplies the computer's move, called once per accepted round.
pub trait MoveSource {
    fn next_move(&mut self) -> MoveChoice;
}

impl<M: MoveSource + ?Sized> MoveSource for Box<M> {
    fn next_move(&mut self) -> MoveChoice {
        (**self).next_move()
    }
}

/// Uniform draw over Rock, Paper and Scissors.
pub struct RandomMoves<R = StdRng> {
    rng: R,
}

impl RandomMoves<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Seeded when a seed is given, otherwise drawn from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RandomMoves<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSource for RandomMoves<R> {
    fn next_move(&mut self) -> MoveChoice {
        MoveChoice::ALL[self.rng.gen_range(0..MoveChoice::ALL.len())]
    }
}

/// Replays a fixed list of moves, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct ScriptedMoves {
    moves: Vec<MoveChoice>,
    cursor: usize,
}

impl ScriptedMoves {
    pub fn new(moves: Vec<MoveChoice>) -> Result<Self> {
        if moves.is_empty() {
            return Err(anyhow!("scripted move list must not be empty"));
        }
        Ok(Self { moves, cursor: 0 })
    }

    /// Number of moves handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl MoveSource for ScriptedMoves {
    fn next_move(&mut self) -> MoveChoice {
        let choice = self.moves[self.cursor % self.moves.len()];
        self.cursor += 1;
        choice
    }
}
