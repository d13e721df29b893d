//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond parsing and small
//! geometric helpers, so they can be shared by the rule engine, a renderer,
//! or a test harness.
//!
//! # Board Geometry
//!
//! - **Width**: 8 columns (indexed 0-7, left to right)
//! - **Height**: 8 rows (indexed 0-7, bottom to top)
//! - Gravity pulls tiles toward row 0; new tiles enter above the top row.
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ACTIVE_TYPE_COUNT` | 6 | Tile types in play for one session |
//! | `MIN_MATCH` | 3 | Smallest connected group that clears |
//! | `SPECIAL_MATCH` | 4 | Group size that promotes one tile to a special |
//! | `SCORE_PER_TILE` | 10 | Score units per destroyed tile |
//! | `INITIAL_MOVES` | 30 | Move budget of the reference session |
//!
//! # Examples
//!
//! ```
//! use gem_cascade_types::{Coord, SpecialKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let a = Coord::new(3, 4);
//! assert!(a.is_adjacent(Coord::new(3, 5)));
//! assert!(!a.is_adjacent(Coord::new(4, 5)));
//!
//! assert_eq!(SpecialKind::from_str("horizontal"), Some(SpecialKind::HorizontalClear));
//! assert!(!SpecialKind::None.is_special());
//!
//! assert_eq!(BOARD_WIDTH, 8);
//! assert_eq!(BOARD_HEIGHT, 8);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default board width in cells (8 columns)
pub const BOARD_WIDTH: u8 = 8;

/// Default board height in cells (8 rows)
pub const BOARD_HEIGHT: u8 = 8;

/// Smallest accepted board side; a linear run of 3 must fit.
pub const MIN_BOARD_SIDE: u8 = 3;

/// Largest accepted board side. Coordinates are stored as `i8`.
pub const MAX_BOARD_SIDE: u8 = 64;

/// Number of tile types drawn from the master palette for a session
pub const ACTIVE_TYPE_COUNT: u8 = 6;

/// Fewest active types for which matching is geometrically meaningful
pub const MIN_ACTIVE_TYPES: u8 = 3;

/// Most active types; snapshot cell codes keep `1 + type` in 6 bits
pub const MAX_ACTIVE_TYPES: u8 = 63;

/// Smallest connected group of ordinary tiles that is destroyed
pub const MIN_MATCH: usize = 3;

/// Group size at which one member is promoted to a special tile
pub const SPECIAL_MATCH: usize = 4;

/// Score units awarded for every destroyed tile
pub const SCORE_PER_TILE: u32 = 10;

/// Move budget of the reference session tracker
pub const INITIAL_MOVES: u32 = 30;

/// Whole-board regeneration attempts before giving up
pub const MAX_BOARD_ATTEMPTS: u32 = 10_000;

/// Rejection-sampling draws per spawned tile before the deterministic fallback
pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

/// Highest number of rows above the board a refill tile may enter from
pub const SPAWN_OFFSET_MAX: u8 = 3;

/// Default master palette the active type set is drawn from
pub const DEFAULT_PALETTE: [&str; 8] = [
    "pearl", "coral", "kelp", "urchin", "anemone", "abalone", "nautilus", "starfish",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_defaults() {
        assert_eq!(ACTIVE_TYPE_COUNT, 6);
        assert_eq!(MIN_MATCH, 3);
        assert_eq!(SPECIAL_MATCH, 4);
        assert_eq!(SCORE_PER_TILE, 10);
        assert_eq!(INITIAL_MOVES, 30);
        assert!(DEFAULT_PALETTE.len() >= ACTIVE_TYPE_COUNT as usize);
    }

    #[test]
    fn adjacency_is_four_directional() {
        let c = Coord::new(2, 2);
        assert!(c.is_adjacent(Coord::new(1, 2)));
        assert!(c.is_adjacent(Coord::new(3, 2)));
        assert!(c.is_adjacent(Coord::new(2, 1)));
        assert!(c.is_adjacent(Coord::new(2, 3)));
        assert!(!c.is_adjacent(Coord::new(3, 3)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(4, 2)));
    }

    #[test]
    fn special_kind_parse_roundtrip() {
        for kind in [
            SpecialKind::None,
            SpecialKind::HorizontalClear,
            SpecialKind::VerticalClear,
        ] {
            assert_eq!(SpecialKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(SpecialKind::from_str("bomb"), None);
    }

    #[test]
    fn valid_move_involves_both_cells() {
        let mv = ValidMove::new(Coord::new(0, 0), Coord::new(1, 0));
        assert!(mv.involves(Coord::new(0, 0)));
        assert!(mv.involves(Coord::new(1, 0)));
        assert!(!mv.involves(Coord::new(0, 1)));
    }
}

/// A logical grid coordinate
///
/// `x` grows to the right, `y` grows upward. Signed so that neighbor
/// arithmetic can step off the board and be bounds-checked afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by `(dx, dy)`
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// True if `other` shares an edge with this cell
    pub fn is_adjacent(self, other: Coord) -> bool {
        let dx = (self.x as i16 - other.x as i16).abs();
        let dy = (self.y as i16 - other.y as i16).abs();
        dx + dy == 1
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Special ability carried by a tile
///
/// - **None**: ordinary tile, matched by same-type adjacency
/// - **HorizontalClear**: destroys its whole row when activated
/// - **VerticalClear**: destroys its whole column when activated
///
/// Special tiles are never part of an adjacency match; they fire only when
/// swapped or when caught in another special's line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpecialKind {
    #[default]
    None,
    HorizontalClear,
    VerticalClear,
}

impl SpecialKind {
    /// Parse from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "none" | "n",
    /// "horizontal" | "h", "vertical" | "v".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" | "n" => Some(SpecialKind::None),
            "horizontal" | "h" => Some(SpecialKind::HorizontalClear),
            "vertical" | "v" => Some(SpecialKind::VerticalClear),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialKind::None => "none",
            SpecialKind::HorizontalClear => "horizontal",
            SpecialKind::VerticalClear => "vertical",
        }
    }

    pub fn is_special(&self) -> bool {
        !matches!(self, SpecialKind::None)
    }
}

/// A legal swap between two adjacent cells
///
/// Either the swap lines up three or more ordinary tiles, or one of the
/// two tiles is special (always actionable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidMove {
    pub first: Coord,
    pub second: Coord,
}

impl ValidMove {
    pub fn new(first: Coord, second: Coord) -> Self {
        Self { first, second }
    }

    pub fn involves(&self, c: Coord) -> bool {
        self.first == c || self.second == c
    }
}

/// Why a swap request was turned away
///
/// Rejections are silent no-ops for the player; the reason exists for
/// diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    /// Another swap, cascade or shuffle is still running
    Processing,
    /// The surrounding session reported game over
    SessionOver,
    /// The two cells do not share an edge
    NotAdjacent,
    /// A coordinate lies outside the board
    OutOfBounds,
    /// One of the cells holds no tile
    EmptyCell,
}

/// Errors surfaced by engine construction, generation and spawning
///
/// Gameplay itself never fails: rejected requests are no-ops and missing
/// tiles are skipped. These variants cover configuration mistakes and the
/// bounded retry policies running out.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("board {width}x{height} is outside the supported range {min}..={max}")]
    BoardTooSmall {
        width: u8,
        height: u8,
        min: u8,
        max: u8,
    },

    #[error("{count} active tile types configured, at least {min} are required")]
    TooFewTypes { count: u8, min: u8 },

    #[error("{count} active tile types configured, at most {max} are supported")]
    TooManyTypes { count: u8, max: u8 },

    #[error("master palette has {palette} entries, cannot draw {active} active types")]
    PaletteTooSmall { palette: usize, active: u8 },

    #[error("tile type {type_index} has no archetype assigned in the palette")]
    MissingArchetype { type_index: u8 },

    #[error("no playable board found after {attempts} generation attempts")]
    GenerationExhausted { attempts: u32 },

    #[error("invalid board layout at row {row}: {detail}")]
    InvalidLayout { row: usize, detail: String },

    #[error("invalid engine config: {0}")]
    Config(#[from] serde_json::Error),
}
