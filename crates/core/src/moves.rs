//! Move simulator - which swaps are worth making
//!
//! The check is read-only. A swap is evaluated through [`SwappedTypes`], a
//! view of the board with the two cells' type indices exchanged, so the
//! board itself is never touched.
//!
//! Only straight runs are considered here. The match finder also accepts
//! bent shapes, so a few real moves are not reported, but every reported
//! move clears something.

use crate::board::Board;
use crate::types::{Coord, ValidMove, MIN_MATCH};

/// Board view with the type indices of `a` and `b` exchanged
///
/// Special kinds stay at their cells; only the type moves.
struct SwappedTypes<'a> {
    board: &'a Board,
    a: Coord,
    b: Coord,
}

impl SwappedTypes<'_> {
    /// Type of the ordinary tile at `c`, None for empty or special cells
    fn ordinary_type(&self, c: Coord) -> Option<u8> {
        let tile = self.board.get_at(c)?;
        if tile.is_special() {
            return None;
        }
        let source = if c == self.a {
            self.b
        } else if c == self.b {
            self.a
        } else {
            c
        };
        self.board.get_at(source).map(|t| t.type_index)
    }

    fn run_length(&self, c: Coord, dx: i8, dy: i8, type_index: u8) -> usize {
        let mut len = 0;
        let mut p = c.offset(dx, dy);
        while self.ordinary_type(p) == Some(type_index) {
            len += 1;
            p = p.offset(dx, dy);
        }
        len
    }

    /// True if `c` sits in a horizontal or vertical run of MIN_MATCH
    fn in_run(&self, c: Coord) -> bool {
        let Some(t) = self.ordinary_type(c) else {
            return false;
        };
        let horizontal = 1 + self.run_length(c, -1, 0, t) + self.run_length(c, 1, 0, t);
        let vertical = 1 + self.run_length(c, 0, -1, t) + self.run_length(c, 0, 1, t);
        horizontal >= MIN_MATCH || vertical >= MIN_MATCH
    }
}

/// Would exchanging the tiles at `a` and `b` line up a run?
///
/// Symmetric in its arguments. Empty cells never match.
pub fn would_create_match(board: &Board, a: Coord, b: Coord) -> bool {
    if board.get_at(a).is_none() || board.get_at(b).is_none() {
        return false;
    }
    let view = SwappedTypes { board, a, b };
    view.in_run(a) || view.in_run(b)
}

/// Is swapping `a` and `b` a legal move?
///
/// A swap involving a special is always legal. Two ordinary tiles must
/// differ in type and line up a run.
pub fn is_valid_move(board: &Board, a: Coord, b: Coord) -> bool {
    if !a.is_adjacent(b) {
        return false;
    }
    let (Some(ta), Some(tb)) = (board.get_at(a), board.get_at(b)) else {
        return false;
    };
    if ta.is_special() || tb.is_special() {
        return true;
    }
    ta.type_index != tb.type_index && would_create_match(board, a, b)
}

/// All legal moves, each pair listed once
///
/// Cells are scanned column by column, bottom to top, testing the right
/// neighbor before the upper one. An empty result means the board is
/// deadlocked.
pub fn enumerate_valid_moves(board: &Board) -> Vec<ValidMove> {
    let mut moves = Vec::new();
    for c in board.coords() {
        for n in [c.offset(1, 0), c.offset(0, 1)] {
            if is_valid_move(board, c, n) {
                moves.push(ValidMove::new(c, n));
            }
        }
    }
    moves
}

/// Early-exit form of `!enumerate_valid_moves(board).is_empty()`
pub fn has_valid_move(board: &Board) -> bool {
    board
        .coords()
        .any(|c| [c.offset(1, 0), c.offset(0, 1)].into_iter().any(|n| is_valid_move(board, c, n)))
}
