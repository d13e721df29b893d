//! Shuffle module - rebuild a deadlocked board
//!
//! The ordinary tiles are regenerated from scratch. Specials survive: their
//! type and kind are kept and they are dropped onto random cells of the new
//! board. Specials never join a match, so placing them cannot create one.

use tracing::info;

use crate::board::{Board, Transition};
use crate::refill::{announce_spawn, generate_board, spawn_checked, SpawnLimits};
use crate::rng::{ActiveTypeSet, SimpleRng};
use crate::types::{Coord, EngineError, SpecialKind};

/// What a shuffle did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShuffleReport {
    /// Specials carried over to the new board
    pub preserved: usize,
    /// Whole-board generation attempts used
    pub attempts: u32,
}

/// Replace the board with a fresh one, keeping every special
///
/// Every tile on the new board is announced as a spawn. When no special
/// is carried over the new board is also guaranteed a valid move; a
/// carried special is itself always a move.
pub fn shuffle_board(
    board: &mut Board,
    types: &ActiveTypeSet,
    rng: &mut SimpleRng,
    limits: SpawnLimits,
    transitions: &mut Vec<Transition>,
) -> Result<ShuffleReport, EngineError> {
    let preserved: Vec<(u8, SpecialKind)> = board
        .coords()
        .filter_map(|c| board.get_at(c))
        .filter(|t| t.is_special())
        .map(|t| (t.type_index, t.special))
        .collect();
    info!(preserved = preserved.len(), "shuffling board");

    let attempts = generate_board(board, types, rng, limits, preserved.is_empty())?;

    let mut cells: Vec<Coord> = board.coords().collect();
    rng.shuffle(&mut cells);
    for (&(type_index, special), &c) in preserved.iter().zip(cells.iter()) {
        board.remove(c.x, c.y);
        spawn_checked(board, types, c, type_index, special);
    }

    let ids: Vec<_> = board.coords().filter_map(|c| board.tile_id_at(c.x, c.y)).collect();
    for id in ids {
        announce_spawn(board, id, rng, transitions);
    }

    Ok(ShuffleReport {
        preserved: preserved.len(),
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TransitionKind;
    use crate::matcher::has_matches;
    use crate::moves::enumerate_valid_moves;

    fn types() -> ActiveTypeSet {
        ActiveTypeSet::from_archetypes((0..6).map(|i| Some(format!("t{}", i))).collect())
    }

    fn limits() -> SpawnLimits {
        SpawnLimits {
            max_spawn_attempts: 64,
            max_board_attempts: 10_000,
        }
    }

    #[test]
    fn test_shuffle_keeps_specials() {
        let mut board = Board::from_rows(&[
            "0 1 2 3 4",
            "h3 4 5 0 1",
            "1 2 v3 4 5",
            "4 5 0 1 2",
            "2 3 4 5 v0",
        ])
        .unwrap();
        let mut rng = SimpleRng::new(11);
        let mut transitions = Vec::new();
        let report = shuffle_board(&mut board, &types(), &mut rng, limits(), &mut transitions).unwrap();

        assert_eq!(report.preserved, 3);
        assert_eq!(board.len(), 25);
        assert!(!has_matches(&board));

        let mut specials: Vec<(u8, SpecialKind)> = board
            .tiles()
            .filter(|t| t.is_special())
            .map(|t| (t.type_index, t.special))
            .collect();
        specials.sort_by_key(|&(t, s)| (t, s.as_str()));
        assert_eq!(
            specials,
            vec![
                (0, SpecialKind::VerticalClear),
                (3, SpecialKind::HorizontalClear),
                (3, SpecialKind::VerticalClear),
            ]
        );
    }

    #[test]
    fn test_shuffle_without_specials_has_moves() {
        let mut board = Board::new(6, 6);
        let mut rng = SimpleRng::new(3);
        let mut transitions = Vec::new();
        let report = shuffle_board(&mut board, &types(), &mut rng, limits(), &mut transitions).unwrap();

        assert_eq!(report.preserved, 0);
        assert!(report.attempts >= 1);
        assert!(!enumerate_valid_moves(&board).is_empty());
        assert_eq!(transitions.len(), 36);
        assert!(transitions
            .iter()
            .all(|t| matches!(t.kind, TransitionKind::Spawned { .. })));
        assert!(!board.is_settled());
    }
}
