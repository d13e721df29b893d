//! Snapshot module - a plain, hashable copy of the grid
//!
//! A [`BoardSnapshot`] stores one `u8` per cell, row-major from the bottom
//! row: 0 for an empty cell, `1 + type` for a tile, with bit 6 set for a
//! horizontal clear and bit 7 for a vertical clear. The FNV-1a hash of the
//! cells lets a host detect board changes cheaply.

use serde::Serialize;

use crate::board::Board;
use crate::types::SpecialKind;

/// Cell code flag for a horizontal clear special
pub const HORIZONTAL_FLAG: u8 = 0x40;
/// Cell code flag for a vertical clear special
pub const VERTICAL_FLAG: u8 = 0x80;

const TYPE_MASK: u8 = 0x3f;

/// Encode a tile as a cell code: 0 is empty, `1 + type` is ordinary,
/// specials add a flag
///
/// Types past [`MAX_ACTIVE_TYPES`](crate::types::MAX_ACTIVE_TYPES) do not fit and are refused by config
/// validation.
pub fn encode_cell(type_index: u8, special: SpecialKind) -> u8 {
    let code = type_index.saturating_add(1) & TYPE_MASK;
    match special {
        SpecialKind::None => code,
        SpecialKind::HorizontalClear => code | HORIZONTAL_FLAG,
        SpecialKind::VerticalClear => code | VERTICAL_FLAG,
    }
}

pub fn decode_cell(code: u8) -> Option<(u8, SpecialKind)> {
    let type_code = code & TYPE_MASK;
    if type_code == 0 {
        return None;
    }
    let special = if code & HORIZONTAL_FLAG != 0 {
        SpecialKind::HorizontalClear
    } else if code & VERTICAL_FLAG != 0 {
        SpecialKind::VerticalClear
    } else {
        SpecialKind::None
    };
    Some((type_code - 1, special))
}

/// FNV-1a 64-bit
pub fn fnv1a64(bytes: impl Iterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major cell codes, bottom row first
    pub cells: Vec<u8>,
    pub board_hash: u64,
    pub settled: bool,
    pub processing: bool,
}

impl BoardSnapshot {
    pub fn capture(board: &Board) -> Self {
        let mut s = Self::default();
        s.fill_from(board);
        s
    }

    /// Refresh in place, reusing the cell buffer
    pub fn fill_from(&mut self, board: &Board) {
        let (w, h) = board.dimensions();
        self.width = w;
        self.height = h;
        self.cells.clear();
        for y in 0..h as i8 {
            for x in 0..w as i8 {
                self.cells.push(
                    board
                        .get(x, y)
                        .map_or(0, |t| encode_cell(t.type_index, t.special)),
                );
            }
        }
        self.board_hash = fnv1a64(self.cells.iter().copied());
        self.settled = board.is_settled();
    }

    pub fn cell(&self, x: i8, y: i8) -> u8 {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return 0;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(0)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            board_hash: fnv1a64(std::iter::empty()),
            settled: true,
            processing: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_codes() {
        assert_eq!(encode_cell(0, SpecialKind::None), 1);
        assert_eq!(encode_cell(2, SpecialKind::HorizontalClear), 0x43);
        assert_eq!(encode_cell(2, SpecialKind::VerticalClear), 0x83);
        assert_eq!(decode_cell(0), None);
        assert_eq!(decode_cell(0x83), Some((2, SpecialKind::VerticalClear)));
        assert_eq!(decode_cell(6), Some((5, SpecialKind::None)));
    }

    #[test]
    fn test_highest_type_keeps_its_code() {
        let top = crate::types::MAX_ACTIVE_TYPES - 1;
        for special in [
            SpecialKind::None,
            SpecialKind::HorizontalClear,
            SpecialKind::VerticalClear,
        ] {
            assert_eq!(decode_cell(encode_cell(top, special)), Some((top, special)));
        }
        // Out-of-range types never panic
        let _ = encode_cell(u8::MAX, SpecialKind::None);
    }

    #[test]
    fn test_capture_layout() {
        let board = Board::from_rows(&["h1 .", "0 v3"]).unwrap();
        let snap = BoardSnapshot::capture(&board);
        assert_eq!(snap.cells, vec![1, 0x84, 0x42, 0]);
        assert_eq!(snap.cell(0, 1), 0x42);
        assert_eq!(snap.cell(5, 5), 0);
        assert_eq!(snap.board_hash, fnv1a64(snap.cells.iter().copied()));
    }

    #[test]
    fn test_hash_tracks_board_changes() {
        let mut board = Board::from_rows(&["0 1", "2 3"]).unwrap();
        let before = BoardSnapshot::capture(&board).board_hash;
        board.remove(0, 0);
        assert_ne!(BoardSnapshot::capture(&board).board_hash, before);
    }

    #[test]
    fn test_snapshot_serializes() {
        let board = Board::from_rows(&["0 1"]).unwrap();
        let json = BoardSnapshot::capture(&board).to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["width"], 2);
        assert_eq!(v["cells"], serde_json::json!([1, 2]));
    }
}
