//! Move simulator tests

use gem_cascade::core::{
    enumerate_valid_moves, has_matches, is_valid_move, would_create_match, Board, Engine,
    EngineConfig,
};
use gem_cascade::types::{Coord, SpecialKind};

fn deadlocked_board() -> Board {
    let mut board = Board::new(8, 8);
    for x in 0..8 {
        for y in 0..8 {
            board.spawn(x, y, ((x + 3 * y) % 6) as u8, SpecialKind::None);
        }
    }
    board
}

fn adjacent_pairs(board: &Board) -> Vec<(Coord, Coord)> {
    board
        .coords()
        .flat_map(|c| [(c, c.offset(1, 0)), (c, c.offset(0, 1))])
        .filter(|(_, n)| board.contains(*n))
        .collect()
}

#[test]
fn test_would_create_match_is_symmetric() {
    for seed in [2, 9, 31] {
        let engine = Engine::new(EngineConfig::default().with_seed(seed)).unwrap();
        let board = engine.board();
        for (a, b) in adjacent_pairs(board) {
            assert_eq!(
                would_create_match(board, a, b),
                would_create_match(board, b, a),
                "seed {} pair {} {}",
                seed,
                a,
                b
            );
        }
    }
}

#[test]
fn test_enumeration_never_changes_types() {
    let engine = Engine::new(EngineConfig::default().with_seed(17)).unwrap();
    let before = engine.board().to_rows();
    let moves = enumerate_valid_moves(engine.board());
    assert!(!moves.is_empty());
    assert_eq!(engine.board().to_rows(), before);
}

#[test]
fn test_every_hinted_move_really_matches() {
    for seed in [1, 5, 12, 40] {
        let engine = Engine::new(EngineConfig::default().with_seed(seed)).unwrap();
        for mv in enumerate_valid_moves(engine.board()) {
            let mut board = engine.board().clone();
            assert!(board.swap_positions(mv.first, mv.second));
            assert!(has_matches(&board), "seed {} move {:?}", seed, mv);
        }
    }
}

#[test]
fn test_moves_listed_once_in_scan_order() {
    let board = Board::from_rows(&["0 1 0", "2 0 2", "1 2 1"]).unwrap();
    let moves = enumerate_valid_moves(&board);
    for mv in &moves {
        assert!(mv.first.is_adjacent(mv.second));
        assert!(mv.second.x > mv.first.x || mv.second.y > mv.first.y);
    }
    let mut keys: Vec<_> = moves.iter().map(|m| (m.first, m.second)).collect();
    let n = keys.len();
    keys.dedup();
    assert_eq!(keys.len(), n);
    assert!(moves.iter().any(|m| m.first == Coord::new(1, 1) && m.second == Coord::new(1, 2)));
}

#[test]
fn test_deadlocked_board_has_no_moves() {
    let board = deadlocked_board();
    assert!(!has_matches(&board));
    assert!(enumerate_valid_moves(&board).is_empty());
}

#[test]
fn test_special_makes_any_neighbor_valid() {
    let mut board = deadlocked_board();
    board.remove(0, 0);
    board.spawn(0, 0, 0, SpecialKind::VerticalClear);
    let moves = enumerate_valid_moves(&board);
    assert_eq!(moves.len(), 2);
    assert!(is_valid_move(&board, Coord::new(1, 0), Coord::new(0, 0)));
    assert!(!is_valid_move(&board, Coord::new(1, 1), Coord::new(0, 0)));
}
