//! Board module - manages the game grid and its tiles
//!
//! The board is a `width x height` grid where each cell holds at most one
//! tile. Cells store [`TileId`] handles into a tile arena sized to the grid,
//! so match groups, destruction sets and activation queues can hold plain
//! handles instead of owning tiles.
//!
//! Coordinates: (x, y) where x grows left to right and y grows bottom to
//! top. Gravity pulls tiles toward y = 0.

use std::fmt;

use crate::types::{Coord, EngineError, SpecialKind, MAX_BOARD_SIDE};

/// Stable handle of a live tile (index into the tile arena)
///
/// Handles are recycled after a tile is destroyed; [`Tile::serial`] is the
/// identity that stays unique for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u16);

impl TileId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A tile occupying one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    /// Monotonic spawn counter; never reused within a board's lifetime
    pub serial: u32,
    pub type_index: u8,
    pub special: SpecialKind,
    pub x: i8,
    pub y: i8,
    /// True until the presentation layer reports the tile at its cell
    pub moving: bool,
    /// Rows above the board a freshly spawned tile enters from
    pub spawn_offset: Option<u8>,
}

impl Tile {
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub fn is_special(&self) -> bool {
        self.special.is_special()
    }

    pub fn is_ordinary(&self) -> bool {
        !self.special.is_special()
    }
}

/// What happened to a tile since the presentation layer last looked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// New tile entering from `from_above` rows over the top edge
    Spawned { from_above: u8 },
    /// Existing tile sliding from `from` to its new cell
    Moved { from: Coord },
    /// Tile swapped in place for a different one (special promotion, shuffle)
    Replaced,
}

/// A pending visual change for one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub tile: TileId,
    pub serial: u32,
    pub kind: TransitionKind,
    pub to: Coord,
}

/// The game board using flat array storage
#[derive(Debug, Clone)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Option<TileId>>,
    /// Tile arena, one slot per cell
    tiles: Vec<Option<Tile>>,
    free: Vec<TileId>,
    next_serial: u32,
}

impl Board {
    /// Create a new empty board
    ///
    /// Sides are clamped to [`MAX_BOARD_SIDE`] so every cell has an `i8`
    /// coordinate.
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.min(MAX_BOARD_SIDE);
        let height = height.min(MAX_BOARD_SIDE);
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![None; size],
            tiles: vec![None; size],
            free: (0..size as u16).rev().map(TileId).collect(),
            next_serial: 0,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    pub(crate) fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn dimensions(&self) -> (u8, u8) {
        (self.width, self.height)
    }

    /// Number of cells (also the arena capacity)
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.index(c.x, c.y).is_some()
    }

    /// Get the tile at (x, y)
    /// Returns None if the cell is empty or out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<&Tile> {
        self.tile_id_at(x, y).and_then(|id| self.tile(id))
    }

    pub fn get_at(&self, c: Coord) -> Option<&Tile> {
        self.get(c.x, c.y)
    }

    pub fn tile_id_at(&self, x: i8, y: i8) -> Option<TileId> {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index()).and_then(|t| t.as_ref())
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.index()).and_then(|t| t.as_mut())
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.tile_id_at(x, y).is_some()
    }

    /// Put a tile handle into (x, y), or empty the cell with `None`
    ///
    /// The tile's own coordinate is updated to the cell. The tile's previous
    /// cell is left untouched; callers moving a tile empty it first.
    /// Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, tile: Option<TileId>) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if let Some(id) = tile {
            match self.tile_mut(id) {
                Some(t) => {
                    t.x = x;
                    t.y = y;
                }
                None => return false,
            }
        }
        self.cells[idx] = tile;
        true
    }

    /// Create a tile in an empty cell
    /// Returns None if the cell is occupied or out of bounds
    pub fn spawn(&mut self, x: i8, y: i8, type_index: u8, special: SpecialKind) -> Option<TileId> {
        let idx = self.index(x, y)?;
        if self.cells[idx].is_some() {
            return None;
        }
        let id = self.free.pop()?;
        let serial = self.next_serial;
        self.next_serial = self.next_serial.wrapping_add(1);

        self.tiles[id.index()] = Some(Tile {
            id,
            serial,
            type_index,
            special,
            x,
            y,
            moving: false,
            spawn_offset: None,
        });
        self.cells[idx] = Some(id);
        Some(id)
    }

    /// Remove and return the tile at (x, y); empty cells yield None
    pub fn remove(&mut self, x: i8, y: i8) -> Option<Tile> {
        let idx = self.index(x, y)?;
        let id = self.cells[idx].take()?;
        let tile = self.tiles[id.index()].take();
        self.free.push(id);
        tile
    }

    /// Remove a tile by handle; already-destroyed handles yield None
    pub fn remove_tile(&mut self, id: TileId) -> Option<Tile> {
        let (x, y) = {
            let t = self.tile(id)?;
            (t.x, t.y)
        };
        if self.tile_id_at(x, y) != Some(id) {
            return None;
        }
        self.remove(x, y)
    }

    /// Exchange the tiles of two occupied cells (slots and coordinates)
    pub fn swap_positions(&mut self, a: Coord, b: Coord) -> bool {
        let (Some(ia), Some(ib)) = (self.index(a.x, a.y), self.index(b.x, b.y)) else {
            return false;
        };
        let (Some(ta), Some(tb)) = (self.cells[ia], self.cells[ib]) else {
            return false;
        };
        self.cells.swap(ia, ib);
        if let Some(t) = self.tile_mut(ta) {
            t.x = b.x;
            t.y = b.y;
        }
        if let Some(t) = self.tile_mut(tb) {
            t.x = a.x;
            t.y = a.y;
        }
        true
    }

    /// All cell coordinates, column by column, bottom to top
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let (w, h) = (self.width as i8, self.height as i8);
        (0..w).flat_map(move |x| (0..h).map(move |y| Coord::new(x, y)))
    }

    /// All live tiles, in arena order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }

    /// Number of live tiles
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// True when no tile is in transit
    pub fn is_settled(&self) -> bool {
        self.tiles().all(|t| !t.moving)
    }

    /// Mark a tile as arrived at its cell
    pub fn settle(&mut self, id: TileId) -> bool {
        match self.tile_mut(id) {
            Some(t) => {
                t.moving = false;
                t.spawn_offset = None;
                true
            }
            None => false,
        }
    }

    pub fn settle_all(&mut self) {
        for t in self.tiles.iter_mut().flatten() {
            t.moving = false;
            t.spawn_offset = None;
        }
    }

    pub(crate) fn mark_moving(&mut self, id: TileId) {
        if let Some(t) = self.tile_mut(id) {
            t.moving = true;
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
        for tile in &mut self.tiles {
            *tile = None;
        }
        self.free = (0..self.cells.len() as u16).rev().map(TileId).collect();
    }

    /// Build a board from text rows, top row first
    ///
    /// Tokens are separated by whitespace: `.` is an empty cell, `N` an
    /// ordinary tile of type N, `hN` / `vN` a horizontal / vertical clear
    /// special of type N.
    ///
    /// ```
    /// use gem_cascade_core::Board;
    ///
    /// let board = Board::from_rows(&[
    ///     "0 1 h2",
    ///     "3 . v4",
    /// ])
    /// .unwrap();
    /// assert_eq!(board.dimensions(), (3, 2));
    /// assert_eq!(board.get(0, 1).unwrap().type_index, 0);
    /// assert!(board.get(1, 0).is_none());
    /// assert!(board.get(2, 1).unwrap().is_special());
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, EngineError> {
        let parsed: Vec<Vec<&str>> = rows.iter().map(|r| r.split_whitespace().collect()).collect();
        let height = parsed.len();
        let width = parsed.first().map_or(0, |r| r.len());

        if height == 0 || width == 0 {
            return Err(EngineError::InvalidLayout {
                row: 0,
                detail: "layout is empty".to_string(),
            });
        }
        if width > MAX_BOARD_SIDE as usize || height > MAX_BOARD_SIDE as usize {
            return Err(EngineError::InvalidLayout {
                row: 0,
                detail: format!("layout {}x{} exceeds {}", width, height, MAX_BOARD_SIDE),
            });
        }

        let mut board = Board::new(width as u8, height as u8);
        for (row, tokens) in parsed.iter().enumerate() {
            if tokens.len() != width {
                return Err(EngineError::InvalidLayout {
                    row,
                    detail: format!("expected {} cells, found {}", width, tokens.len()),
                });
            }
            let y = (height - 1 - row) as i8;
            for (x, token) in tokens.iter().enumerate() {
                if *token == "." {
                    continue;
                }
                let (special, digits) = match token.as_bytes()[0] {
                    b'h' | b'H' => (SpecialKind::HorizontalClear, &token[1..]),
                    b'v' | b'V' => (SpecialKind::VerticalClear, &token[1..]),
                    _ => (SpecialKind::None, *token),
                };
                let type_index: u8 = digits.parse().map_err(|_| EngineError::InvalidLayout {
                    row,
                    detail: format!("bad cell token {:?}", token),
                })?;
                board.spawn(x as i8, y, type_index, special);
            }
        }
        Ok(board)
    }

    /// Render to text rows (top row first) in the `from_rows` format
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height as i8)
            .rev()
            .map(|y| {
                (0..self.width as i8)
                    .map(|x| match self.get(x, y) {
                        None => ".".to_string(),
                        Some(t) => match t.special {
                            SpecialKind::None => t.type_index.to_string(),
                            SpecialKind::HorizontalClear => format!("h{}", t.type_index),
                            SpecialKind::VerticalClear => format!("v{}", t.type_index),
                        },
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::BOARD_WIDTH, crate::types::BOARD_HEIGHT)
    }
}
