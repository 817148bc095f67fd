//! Grid module - manages the token matrix
//!
//! The grid is a fixed-size `columns x rows` matrix of tiles stored in a flat
//! vector, column-major (column * rows + row). A tile is either a token or the
//! empty sentinel (`None`), plus a transient fall distance used by the shift
//! animation. Coordinates: (column, row) with column 0 at the left and row 0
//! at the top.
//!
//! The grid is a pure state container: bounds-checked accessors, an in-place
//! token swap, and nothing else. Adjacency rules, matching, and refill live
//! in the caller modules.

use crate::types::{Cell, GameError, Tile, TilePos};

/// The game board - a runtime-sized matrix of tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: u8,
    rows: u8,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create a new grid with every cell empty.
    pub fn new(columns: u8, rows: u8) -> Self {
        let len = columns as usize * rows as usize;
        Self {
            columns,
            rows,
            tiles: vec![Tile::default(); len],
        }
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// True when `pos` names a cell of this grid.
    pub fn contains(&self, pos: TilePos) -> bool {
        pos.column < self.columns && pos.row < self.rows
    }

    /// Calculate the flat index for (column, row), column-major.
    #[inline(always)]
    fn index(&self, column: u8, row: u8) -> Option<usize> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(column as usize * self.rows as usize + row as usize)
    }

    fn bounds_error(&self, pos: TilePos) -> GameError {
        GameError::OutOfBounds {
            column: pos.column,
            row: pos.row,
            columns: self.columns,
            rows: self.rows,
        }
    }

    /// Get the token at `pos`.
    pub fn get(&self, pos: TilePos) -> Result<Cell, GameError> {
        match self.index(pos.column, pos.row) {
            Some(idx) => Ok(self.tiles[idx].token),
            None => Err(self.bounds_error(pos)),
        }
    }

    /// Set the token at `pos`.
    pub fn set(&mut self, pos: TilePos, token: Cell) -> Result<(), GameError> {
        match self.index(pos.column, pos.row) {
            Some(idx) => {
                self.tiles[idx].token = token;
                Ok(())
            }
            None => Err(self.bounds_error(pos)),
        }
    }

    /// True iff the cell holds the empty sentinel.
    pub fn is_empty(&self, pos: TilePos) -> Result<bool, GameError> {
        Ok(self.get(pos)?.is_none())
    }

    /// Exchange the tokens at two cells.
    ///
    /// No adjacency requirement at this layer; callers enforce it. Fall
    /// distances stay with their slots.
    pub fn swap(&mut self, a: TilePos, b: TilePos) -> Result<(), GameError> {
        let ia = self.index(a.column, a.row).ok_or(self.bounds_error(a))?;
        let ib = self.index(b.column, b.row).ok_or(self.bounds_error(b))?;
        let tmp = self.tiles[ia].token;
        self.tiles[ia].token = self.tiles[ib].token;
        self.tiles[ib].token = tmp;
        Ok(())
    }

    /// Unchecked token read for the scan paths. Out-of-range coordinates are
    /// a programmer error.
    #[inline(always)]
    pub(crate) fn token(&self, column: u8, row: u8) -> Cell {
        debug_assert!(column < self.columns && row < self.rows);
        self.tiles[column as usize * self.rows as usize + row as usize].token
    }

    #[inline(always)]
    pub(crate) fn set_token(&mut self, column: u8, row: u8, token: Cell) {
        debug_assert!(column < self.columns && row < self.rows);
        self.tiles[column as usize * self.rows as usize + row as usize].token = token;
    }

    /// Unchecked in-place token swap used by trial swaps and the shift step.
    #[inline(always)]
    pub(crate) fn swap_tokens(&mut self, a: TilePos, b: TilePos) {
        debug_assert!(self.contains(a) && self.contains(b));
        let ia = a.column as usize * self.rows as usize + a.row as usize;
        let ib = b.column as usize * self.rows as usize + b.row as usize;
        let tmp = self.tiles[ia].token;
        self.tiles[ia].token = self.tiles[ib].token;
        self.tiles[ib].token = tmp;
    }

    /// Fall distance of the tile at (column, row).
    pub fn shift(&self, column: u8, row: u8) -> u8 {
        debug_assert!(column < self.columns && row < self.rows);
        self.tiles[column as usize * self.rows as usize + row as usize].shift
    }

    pub(crate) fn set_shift(&mut self, column: u8, row: u8, shift: u8) {
        debug_assert!(column < self.columns && row < self.rows);
        self.tiles[column as usize * self.rows as usize + row as usize].shift = shift;
    }

    /// Iterate every tile with its position, column-major.
    pub fn tiles(&self) -> impl Iterator<Item = (TilePos, Tile)> + '_ {
        let rows = self.rows as usize;
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            let column = (i / rows) as u8;
            let row = (i % rows) as u8;
            (TilePos::new(column, row), *tile)
        })
    }

    /// Repopulate every cell via `f` and reset all fall distances.
    ///
    /// Used by board generation; the allocation is reused.
    pub(crate) fn fill_with(&mut self, mut f: impl FnMut() -> Cell) {
        for tile in &mut self.tiles {
            tile.token = f();
            tile.shift = 0;
        }
    }
}
