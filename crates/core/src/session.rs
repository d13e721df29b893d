//! Session module - the score and turn collaborator
//!
//! The engine never decides when a game ends. It reports destroyed tiles,
//! consumed moves and finished turns through [`Session`] and refuses new
//! swaps once the session says it is over.

use crate::types::{INITIAL_MOVES, SCORE_PER_TILE};

/// Callbacks the engine drives during a turn
pub trait Session {
    /// Tiles removed by one cascade round
    fn on_tiles_destroyed(&mut self, count: u32);
    /// An accepted swap produced something to resolve (once per swap)
    fn on_move_consumed(&mut self);
    /// The swap and its cascade are fully resolved
    fn on_turn_finished(&mut self);
    fn is_session_over(&self) -> bool;
}

/// Reference session: a fixed move budget and a running score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveBudgetSession {
    initial_moves: u32,
    moves_left: u32,
    score: u32,
    best_score: u32,
    game_over: bool,
}

impl MoveBudgetSession {
    pub fn new(initial_moves: u32) -> Self {
        Self {
            initial_moves,
            moves_left: initial_moves,
            score: 0,
            best_score: 0,
            game_over: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Start over with a full budget; the best score is kept
    pub fn restart(&mut self) {
        self.moves_left = self.initial_moves;
        self.score = 0;
        self.game_over = false;
    }
}

impl Default for MoveBudgetSession {
    fn default() -> Self {
        Self::new(INITIAL_MOVES)
    }
}

impl Session for MoveBudgetSession {
    fn on_tiles_destroyed(&mut self, count: u32) {
        if self.game_over {
            return;
        }
        self.score = self.score.saturating_add(count.saturating_mul(SCORE_PER_TILE));
    }

    fn on_move_consumed(&mut self) {
        self.moves_left = self.moves_left.saturating_sub(1);
    }

    fn on_turn_finished(&mut self) {
        if self.moves_left == 0 {
            self.game_over = true;
            self.best_score = self.best_score.max(self.score);
        }
    }

    fn is_session_over(&self) -> bool {
        self.game_over
    }
}
