//! Cascade planning - what one resolution round destroys and promotes
//!
//! A round starts from a processing set (matched tiles plus any swapped
//! specials). Specials are activated breadth-first; each activation adds
//! its whole row or column to the destruction set, and specials caught in
//! a line are queued in turn. Membership is tracked per tile, so every
//! tile is destroyed at most once and chains always terminate.

use std::collections::VecDeque;

use crate::board::{Board, TileId};
use crate::matcher::groups_from;
use crate::types::{Coord, SpecialKind, SPECIAL_MATCH};

/// Insertion-ordered set of tiles keyed by arena handle
#[derive(Debug, Clone)]
pub struct DestroySet {
    member: Vec<bool>,
    order: Vec<TileId>,
}

impl DestroySet {
    pub fn new(capacity: usize) -> Self {
        Self {
            member: vec![false; capacity],
            order: Vec::new(),
        }
    }

    /// Returns false if the tile was already present
    pub fn insert(&mut self, id: TileId) -> bool {
        match self.member.get_mut(id.index()) {
            Some(m) if !*m => {
                *m = true;
                self.order.push(id);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: TileId) -> bool {
        match self.member.get_mut(id.index()) {
            Some(m) if *m => {
                *m = false;
                self.order.retain(|&o| o != id);
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.member.get(id.index()).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.order.iter().copied()
    }
}

/// Outcome of activation expansion for one round
#[derive(Debug, Clone)]
pub struct RoundPlan {
    pub destroy: DestroySet,
    /// Specials that fired
    pub activated: usize,
}

/// Occupied cells cleared by a special at `c`
pub fn line_of(board: &Board, c: Coord, special: SpecialKind) -> Vec<TileId> {
    let (w, h) = (board.width() as i8, board.height() as i8);
    match special {
        SpecialKind::None => Vec::new(),
        SpecialKind::HorizontalClear => (0..w).filter_map(|x| board.tile_id_at(x, c.y)).collect(),
        SpecialKind::VerticalClear => (0..h).filter_map(|y| board.tile_id_at(c.x, y)).collect(),
    }
}

/// Partition the processing set and drain the activation queue
pub fn plan_round(board: &Board, processing: &[TileId]) -> RoundPlan {
    let mut destroy = DestroySet::new(board.cell_count());
    let mut queued = vec![false; board.cell_count()];
    let mut queue = VecDeque::new();

    for &id in processing {
        let Some(tile) = board.tile(id) else {
            continue;
        };
        if tile.is_ordinary() {
            destroy.insert(id);
        } else if !queued[id.index()] {
            queued[id.index()] = true;
            queue.push_back(id);
        }
    }

    let mut activated = 0;
    while let Some(id) = queue.pop_front() {
        if !destroy.insert(id) {
            continue;
        }
        let Some(tile) = board.tile(id) else {
            continue;
        };
        activated += 1;

        for hit in line_of(board, tile.coord(), tile.special) {
            if destroy.contains(hit) {
                continue;
            }
            let Some(t) = board.tile(hit) else {
                continue;
            };
            if t.is_special() {
                if !queued[hit.index()] {
                    queued[hit.index()] = true;
                    queue.push_back(hit);
                }
            } else {
                destroy.insert(hit);
            }
        }
    }

    RoundPlan { destroy, activated }
}

/// Tile to promote into a special this round, if any
///
/// Groups are rebuilt from the processing tiles. On the first round of a
/// swap the dragged tile wins if it sits in a large enough group; otherwise
/// the first member of the first large group is chosen. The swap partner
/// gets no priority.
pub fn pick_special_candidate(
    board: &Board,
    processing: &[TileId],
    dragged: Option<TileId>,
) -> Option<TileId> {
    let groups: Vec<Vec<TileId>> = groups_from(board, processing)
        .into_iter()
        .filter(|g| g.len() >= SPECIAL_MATCH)
        .collect();

    if let Some(id) = dragged {
        let ordinary = board.tile(id).is_some_and(|t| t.is_ordinary());
        if ordinary && groups.iter().any(|g| g.contains(&id)) {
            return Some(id);
        }
    }

    groups.first().and_then(|g| g.first().copied())
}
