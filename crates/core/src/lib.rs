//! Core rule engine - pure, deterministic, and testable
//!
//! This crate contains every rule of the tile-matching game: match
//! detection, cascade resolution, special tiles, gravity and refill, move
//! enumeration and shuffling. It has no rendering, input or timing code:
//!
//! - **Deterministic**: the same seed produces the same boards and spawns
//! - **Host-driven**: the engine records transitions and waits for the host
//!   to report the board settled before taking the next step
//! - **Read-only queries**: match finding, move simulation and hints never
//!   touch the board
//!
//! # Module Structure
//!
//! - [`board`]: grid of tile handles over a fixed-size tile arena
//! - [`matcher`]: flood-fill detection of same-type groups
//! - [`moves`]: swap simulation and valid move enumeration
//! - [`cascade`]: special activation and promotion for one round
//! - [`refill`]: gravity, spawning and whole-board generation
//! - [`shuffle`]: deadlock recovery that keeps specials
//! - [`hint`]: cached valid moves and the current hint
//! - [`session`]: score and move budget callbacks
//! - [`engine`]: the state machine tying it together
//! - [`snapshot`]: plain-data board view for presentation
//! - [`rng`]: seeded LCG and the active tile types
//! - [`config`]: engine configuration
//!
//! # Game Rules
//!
//! - **Matching**: 3 or more connected ordinary tiles of one type clear
//! - **Specials**: a group of 4 or more leaves behind one line-clear special
//! - **Activation**: swapping a special, or catching it in another special's
//!   line, clears its whole row or column
//! - **Cascades**: after each refill the board is checked again until it
//!   holds no match
//! - **Deadlock**: a board without a valid move is reshuffled
//!
//! # Example
//!
//! ```
//! use gem_cascade_core::{Engine, EngineConfig, MoveBudgetSession};
//!
//! let mut engine = Engine::new(EngineConfig::default().with_seed(12345)).unwrap();
//! let mut session = MoveBudgetSession::default();
//!
//! // Play the first hinted move and resolve the whole cascade
//! let hint = engine.request_hint().unwrap();
//! let report = engine.play_swap(hint.first, hint.second, &mut session).unwrap();
//!
//! assert!(report.rounds >= 1);
//! assert!(session.score() >= 30);
//! assert!(!engine.is_board_processing());
//! ```

pub mod board;
pub mod cascade;
pub mod config;
pub mod engine;
pub mod hint;
pub mod matcher;
pub mod moves;
pub mod refill;
pub mod rng;
pub mod session;
pub mod shuffle;
pub mod snapshot;

pub use gem_cascade_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Tile, TileId, Transition, TransitionKind};
pub use config::EngineConfig;
pub use engine::{Advance, DriveReport, Engine, Phase, RoundReport, ShuffleOutcome, SwapOutcome};
pub use hint::{HintStatus, HintTracker};
pub use matcher::{find_match_groups, find_matches, has_matches};
pub use moves::{enumerate_valid_moves, is_valid_move, would_create_match};
pub use rng::{ActiveTypeSet, SimpleRng};
pub use session::{MoveBudgetSession, Session};
pub use snapshot::BoardSnapshot;
