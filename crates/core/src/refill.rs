//! Refill module - gravity, spawning and whole-board generation
//!
//! After a round destroys tiles, every column is compacted toward y = 0
//! and the holes left at the top are filled with new ordinary tiles. New
//! types are drawn so that a spawned tile never completes a straight run
//! with the two cells to its left or the two cells below it.

use tracing::{debug, error, info};

use crate::board::{Board, TileId, Transition, TransitionKind};
use crate::matcher::has_matches;
use crate::moves::has_valid_move;
use crate::rng::{ActiveTypeSet, SimpleRng};
use crate::types::{Coord, EngineError, SpecialKind, SPAWN_OFFSET_MAX};

/// Result of one refill pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefillReport {
    /// Tiles that slid down
    pub moved: usize,
    pub spawned: usize,
    /// Slots left empty because their type had no archetype
    pub missing: usize,
}

/// Retry bounds for spawning and generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnLimits {
    pub max_spawn_attempts: u32,
    pub max_board_attempts: u32,
}

/// Slide every column's tiles down to fill gaps, keeping their order
pub fn collapse_columns(board: &mut Board, transitions: &mut Vec<Transition>) -> usize {
    let (w, h) = (board.width() as i8, board.height() as i8);
    let mut moved = 0;

    for x in 0..w {
        let mut write_y = 0;
        for y in 0..h {
            let Some(id) = board.tile_id_at(x, y) else {
                continue;
            };
            if y != write_y {
                board.set(x, y, None);
                board.set(x, write_y, Some(id));
                board.mark_moving(id);
                if let Some(t) = board.tile(id) {
                    transitions.push(Transition {
                        tile: id,
                        serial: t.serial,
                        kind: TransitionKind::Moved {
                            from: Coord::new(x, y),
                        },
                        to: Coord::new(x, write_y),
                    });
                }
                moved += 1;
            }
            write_y += 1;
        }
    }
    moved
}

fn same_type(board: &Board, x: i8, y: i8, type_index: u8) -> bool {
    board.get(x, y).is_some_and(|t| t.type_index == type_index)
}

/// True if placing `type_index` at (x, y) would line up with the two cells
/// to the left or the two cells below
///
/// Types are compared regardless of special kind.
pub fn completes_run(board: &Board, x: i8, y: i8, type_index: u8) -> bool {
    let left = same_type(board, x - 1, y, type_index) && same_type(board, x - 2, y, type_index);
    let below = same_type(board, x, y - 1, type_index) && same_type(board, x, y - 2, type_index);
    left || below
}

/// Draw a type for (x, y) by rejection sampling
///
/// After `max_attempts` rejected draws, the first acceptable type scanning
/// up from a random start is used instead.
pub fn pick_spawn_type(
    board: &Board,
    x: i8,
    y: i8,
    type_count: u8,
    rng: &mut SimpleRng,
    max_attempts: u32,
) -> u8 {
    let count = type_count.max(1) as u32;
    for _ in 0..max_attempts {
        let t = rng.next_range(count) as u8;
        if !completes_run(board, x, y, t) {
            return t;
        }
    }

    let start = rng.next_range(count);
    (0..count)
        .map(|i| ((start + i) % count) as u8)
        .find(|&t| !completes_run(board, x, y, t))
        .unwrap_or(start as u8)
}

/// Spawn a tile if its type is backed by an archetype
///
/// A missing archetype is logged and the cell stays empty.
pub fn spawn_checked(
    board: &mut Board,
    types: &ActiveTypeSet,
    c: Coord,
    type_index: u8,
    special: SpecialKind,
) -> Option<TileId> {
    if let Err(e) = types.archetype(type_index) {
        error!(x = c.x, y = c.y, error = %e, "spawn skipped");
        return None;
    }
    board.spawn(c.x, c.y, type_index, special)
}

/// Mark a fresh tile as entering from above and record the transition
pub fn announce_spawn(
    board: &mut Board,
    id: TileId,
    rng: &mut SimpleRng,
    transitions: &mut Vec<Transition>,
) {
    let from_above = rng.next_between(1, SPAWN_OFFSET_MAX as u32) as u8;
    if let Some(t) = board.tile_mut(id) {
        t.moving = true;
        t.spawn_offset = Some(from_above);
        transitions.push(Transition {
            tile: id,
            serial: t.serial,
            kind: TransitionKind::Spawned { from_above },
            to: t.coord(),
        });
    }
}

/// Fill every empty cell, column by column, bottom to top
pub fn fill_empty(
    board: &mut Board,
    types: &ActiveTypeSet,
    rng: &mut SimpleRng,
    max_spawn_attempts: u32,
    transitions: &mut Vec<Transition>,
) -> RefillReport {
    let mut report = RefillReport::default();
    let cells: Vec<Coord> = board.coords().collect();

    for c in cells {
        if board.is_occupied(c.x, c.y) {
            continue;
        }
        let t = pick_spawn_type(board, c.x, c.y, types.len(), rng, max_spawn_attempts);
        match spawn_checked(board, types, c, t, SpecialKind::None) {
            Some(id) => {
                announce_spawn(board, id, rng, transitions);
                report.spawned += 1;
            }
            None => report.missing += 1,
        }
    }
    report
}

/// Gravity followed by spawning
pub fn refill(
    board: &mut Board,
    types: &ActiveTypeSet,
    rng: &mut SimpleRng,
    max_spawn_attempts: u32,
    transitions: &mut Vec<Transition>,
) -> RefillReport {
    let moved = collapse_columns(board, transitions);
    let report = fill_empty(board, types, rng, max_spawn_attempts, transitions);
    RefillReport { moved, ..report }
}

/// Fill the whole board from scratch until it holds no match
///
/// With `require_move`, boards without a valid move are rejected too.
/// Tiles are placed settled and without transitions. Returns the number of
/// attempts used.
pub fn generate_board(
    board: &mut Board,
    types: &ActiveTypeSet,
    rng: &mut SimpleRng,
    limits: SpawnLimits,
    require_move: bool,
) -> Result<u32, EngineError> {
    let cells: Vec<Coord> = board.coords().collect();

    for attempt in 1..=limits.max_board_attempts {
        board.clear();
        for &c in &cells {
            let t = pick_spawn_type(board, c.x, c.y, types.len(), rng, limits.max_spawn_attempts);
            spawn_checked(board, types, c, t, SpecialKind::None);
        }

        if has_matches(board) {
            continue;
        }
        if require_move && !has_valid_move(board) {
            continue;
        }
        debug!(attempt, "board generated");
        return Ok(attempt);
    }

    info!(attempts = limits.max_board_attempts, "board generation gave up");
    Err(EngineError::GenerationExhausted {
        attempts: limits.max_board_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::enumerate_valid_moves;

    fn types(n: u8) -> ActiveTypeSet {
        ActiveTypeSet::from_archetypes((0..n).map(|i| Some(format!("t{}", i))).collect())
    }

    fn limits() -> SpawnLimits {
        SpawnLimits {
            max_spawn_attempts: 64,
            max_board_attempts: 10_000,
        }
    }

    #[test]
    fn test_collapse_keeps_column_order() {
        let mut board = Board::from_rows(&["1 2", ". 3", "4 .", ". 5"]).unwrap();
        let mut transitions = Vec::new();
        let moved = collapse_columns(&mut board, &mut transitions);

        assert_eq!(board.to_rows(), vec![". .", ". 2", "1 3", "4 5"]);
        assert_eq!(moved, 4);
        assert_eq!(transitions.len(), 4);
        assert!(!board.is_settled());
        assert!(transitions
            .iter()
            .all(|t| matches!(t.kind, TransitionKind::Moved { from } if from.y > t.to.y)));
    }

    #[test]
    fn test_completes_run_checks_left_and_below() {
        let board = Board::from_rows(&["2 . .", "2 . .", "3 3 ."]).unwrap();
        assert!(completes_run(&board, 2, 0, 3));
        assert!(!completes_run(&board, 2, 0, 2));
        // Specials still count by type
        let board = Board::from_rows(&["h4 v4 ."]).unwrap();
        assert!(completes_run(&board, 2, 0, 4));
    }

    #[test]
    fn test_pick_spawn_type_avoids_runs() {
        let board = Board::from_rows(&["0 1 1 ."]).unwrap();
        let mut rng = SimpleRng::new(5);
        for _ in 0..100 {
            assert_ne!(pick_spawn_type(&board, 3, 0, 3, &mut rng, 64), 1);
        }
        // With zero draws allowed the fallback still honors the rule
        for _ in 0..50 {
            assert_ne!(pick_spawn_type(&board, 3, 0, 3, &mut rng, 0), 1);
        }
    }

    #[test]
    fn test_fill_marks_spawns_moving() {
        let mut board = Board::from_rows(&[". 1", "0 ."]).unwrap();
        let mut rng = SimpleRng::new(9);
        let mut transitions = Vec::new();
        let report = fill_empty(&mut board, &types(6), &mut rng, 64, &mut transitions);

        assert_eq!(report.spawned, 2);
        assert_eq!(board.len(), 4);
        for t in &transitions {
            let TransitionKind::Spawned { from_above } = t.kind else {
                panic!("expected spawn, got {:?}", t.kind);
            };
            assert!((1..=SPAWN_OFFSET_MAX).contains(&from_above));
            let tile = board.tile(t.tile).unwrap();
            assert!(tile.moving);
            assert_eq!(tile.spawn_offset, Some(from_above));
        }
    }

    #[test]
    fn test_missing_archetype_leaves_slot_empty() {
        let set = ActiveTypeSet::from_archetypes(vec![None, None, None]);
        let mut board = Board::new(3, 3);
        let mut rng = SimpleRng::new(1);
        let mut transitions = Vec::new();
        let report = fill_empty(&mut board, &set, &mut rng, 64, &mut transitions);
        assert_eq!(report.spawned, 0);
        assert_eq!(report.missing, 9);
        assert!(board.is_empty());
    }

    #[test]
    fn test_generated_board_is_playable() {
        for seed in [1, 7, 42, 1234] {
            let mut board = Board::new(8, 8);
            let mut rng = SimpleRng::new(seed);
            generate_board(&mut board, &types(6), &mut rng, limits(), true).unwrap();
            assert_eq!(board.len(), 64);
            assert!(!has_matches(&board), "seed {} generated a match", seed);
            assert!(!enumerate_valid_moves(&board).is_empty());
            assert!(board.is_settled());
        }
    }

    #[test]
    fn test_generation_exhausted_reports_attempts() {
        // No attempts allowed
        let mut board = Board::new(3, 3);
        let mut rng = SimpleRng::new(1);
        let limits = SpawnLimits {
            max_spawn_attempts: 64,
            max_board_attempts: 0,
        };
        let err = generate_board(&mut board, &types(3), &mut rng, limits, true).unwrap_err();
        assert!(matches!(err, EngineError::GenerationExhausted { attempts: 0 }));
    }
}
