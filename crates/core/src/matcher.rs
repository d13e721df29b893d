//! Match finder - connected groups of same-type ordinary tiles
//!
//! A match is any 4-directionally connected group of at least
//! [`MIN_MATCH`] ordinary tiles sharing a type. Shapes are not restricted:
//! lines, L, T and blocks all count. Special tiles never join a group and
//! break connectivity.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::board::{Board, TileId};
use crate::types::{Coord, MIN_MATCH};

const DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// In-bounds 4-neighbors of a cell
pub fn neighbors(board: &Board, c: Coord) -> ArrayVec<Coord, 4> {
    DIRECTIONS
        .iter()
        .map(|&(dx, dy)| c.offset(dx, dy))
        .filter(|n| board.contains(*n))
        .collect()
}

/// Flood-fill the group containing (x, y)
///
/// Returns an empty group when the cell is empty, special, or already
/// visited. `visited` is indexed by cell (`y * width + x`) and must be
/// `board.cell_count()` long.
pub fn connected_group(board: &Board, x: i8, y: i8, visited: &mut [bool]) -> Vec<TileId> {
    let mut group = Vec::new();
    let (Some(start), Some(seed)) = (board.index(x, y), board.get(x, y)) else {
        return group;
    };
    if visited[start] || seed.is_special() {
        return group;
    }
    let type_index = seed.type_index;

    let mut queue = VecDeque::new();
    visited[start] = true;
    queue.push_back(Coord::new(x, y));

    while let Some(c) = queue.pop_front() {
        let Some(tile) = board.get_at(c) else {
            continue;
        };
        group.push(tile.id);

        for n in neighbors(board, c) {
            let Some(idx) = board.index(n.x, n.y) else {
                continue;
            };
            if visited[idx] {
                continue;
            }
            if let Some(t) = board.get_at(n) {
                if t.is_ordinary() && t.type_index == type_index {
                    visited[idx] = true;
                    queue.push_back(n);
                }
            }
        }
    }
    group
}

/// Every matching group on the board, in discovery order
///
/// Cells are scanned column by column, bottom to top; members of a group
/// are listed in flood order.
pub fn find_match_groups(board: &Board) -> Vec<Vec<TileId>> {
    let mut visited = vec![false; board.cell_count()];
    let mut groups = Vec::new();
    for c in board.coords() {
        let group = connected_group(board, c.x, c.y, &mut visited);
        if group.len() >= MIN_MATCH {
            groups.push(group);
        }
    }
    groups
}

/// Union of all matching groups
pub fn find_matches(board: &Board) -> Vec<TileId> {
    find_match_groups(board).into_iter().flatten().collect()
}

/// True if any matching group exists
pub fn has_matches(board: &Board) -> bool {
    let mut visited = vec![false; board.cell_count()];
    board
        .coords()
        .any(|c| connected_group(board, c.x, c.y, &mut visited).len() >= MIN_MATCH)
}

/// Matching groups reachable from the given tiles
///
/// Seeds that were destroyed, are special, or already belong to an earlier
/// group are skipped.
pub fn groups_from(board: &Board, seeds: &[TileId]) -> Vec<Vec<TileId>> {
    let mut visited = vec![false; board.cell_count()];
    let mut groups = Vec::new();
    for &id in seeds {
        let Some(tile) = board.tile(id) else {
            continue;
        };
        if board.tile_id_at(tile.x, tile.y) != Some(id) {
            continue;
        }
        let group = connected_group(board, tile.x, tile.y, &mut visited);
        if group.len() >= MIN_MATCH {
            groups.push(group);
        }
    }
    groups
}
