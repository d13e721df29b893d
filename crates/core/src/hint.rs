//! Hint tracker - cached valid moves and the current hint

use crate::board::Board;
use crate::moves::enumerate_valid_moves;
use crate::rng::SimpleRng;
use crate::types::ValidMove;

/// Result of a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintStatus {
    Available(usize),
    /// Deadlock: the board needs a shuffle
    NoMoves,
    /// Board is in motion; moves are recomputed once it settles
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct HintTracker {
    moves: Vec<ValidMove>,
    current: Option<ValidMove>,
    fresh: bool,
}

impl HintTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the valid moves; drops the current hint
    pub fn refresh(&mut self, board: &Board) -> HintStatus {
        self.moves = enumerate_valid_moves(board);
        self.current = None;
        self.fresh = true;
        self.status()
    }

    pub fn status(&self) -> HintStatus {
        if !self.fresh {
            HintStatus::Stale
        } else if self.moves.is_empty() {
            HintStatus::NoMoves
        } else {
            HintStatus::Available(self.moves.len())
        }
    }

    /// Only a refreshed tracker can report a deadlock
    pub fn is_deadlocked(&self) -> bool {
        self.fresh && self.moves.is_empty()
    }

    pub fn moves(&self) -> &[ValidMove] {
        &self.moves
    }

    /// Pick a random valid move and make it the current hint
    pub fn request_hint(&mut self, rng: &mut SimpleRng) -> Option<ValidMove> {
        if self.moves.is_empty() {
            return None;
        }
        let pick = rng.next_range(self.moves.len() as u32) as usize;
        self.current = self.moves.get(pick).copied();
        self.current
    }

    pub fn current(&self) -> Option<ValidMove> {
        self.current
    }

    /// Cancel the highlighted hint; a new one can be requested any time
    pub fn clear_hint(&mut self) {
        self.current = None;
    }

    /// Forget everything, e.g. while the board is in motion
    pub fn invalidate(&mut self) {
        self.moves.clear();
        self.current = None;
        self.fresh = false;
    }
}
