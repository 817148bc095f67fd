//! Core types shared across the application
//! This module contains pure data types with no dependencies beyond the error derive

use thiserror::Error;

/// Default board dimensions
pub const DEFAULT_COLUMNS: u8 = 5;
pub const DEFAULT_ROWS: u8 = 5;

/// Default token palette size (distinct colors on the board)
pub const DEFAULT_TOKEN_KINDS: u8 = 4;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const PHASE_MS: u32 = 300;

/// Minimum run length that counts as a cluster
pub const MIN_CLUSTER_LEN: u8 = 3;

/// Points awarded per cleared cluster: `100 * (length - 2)`
pub const CLUSTER_POINT_BASE: u32 = 100;

/// Board generation gives up after this many attempts
pub const MAX_GENERATION_ATTEMPTS: u32 = 10_000;

/// One token color out of the configured palette.
///
/// Tokens carry no identity beyond their kind; two tokens of the same kind
/// are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(pub u8);

/// Cell on the board (None = vacated, awaiting refill)
pub type Cell = Option<Token>;

/// A board coordinate (column, row), both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub column: u8,
    pub row: u8,
}

impl TilePos {
    pub const fn new(column: u8, row: u8) -> Self {
        Self { column, row }
    }

    /// True when `other` is a direct 4-way neighbor.
    pub fn is_adjacent(self, other: TilePos) -> bool {
        let dc = (self.column as i16 - other.column as i16).abs();
        let dr = (self.row as i16 - other.row as i16).abs();
        dc + dr == 1
    }
}

/// One grid slot: its token plus the transient fall distance (in rows) it
/// travels during the current shift animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub token: Cell,
    pub shift: u8,
}

/// Run direction of a detected cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A detected run of >= 3 identical tokens, anchored at its left/top end.
///
/// L/T-shaped matches are two clusters sharing a cell; clearing is
/// idempotent but each record scores on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    pub origin: TilePos,
    pub length: u8,
    pub orientation: Orientation,
}

impl Cluster {
    /// Positions of every member tile, origin first.
    pub fn tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        let origin = self.origin;
        let orientation = self.orientation;
        (0..self.length).map(move |i| match orientation {
            Orientation::Horizontal => TilePos::new(origin.column + i, origin.row),
            Orientation::Vertical => TilePos::new(origin.column, origin.row + i),
        })
    }
}

/// An adjacent pair whose swap produces at least one cluster.
///
/// Also carried by the swap/rewind animation phases as the pending swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapMove {
    pub a: TilePos,
    pub b: TilePos,
}

impl SwapMove {
    pub const fn new(a: TilePos, b: TilePos) -> Self {
        Self { a, b }
    }
}

/// Discrete presentation-to-engine events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameIntent {
    Swap(TilePos, TilePos),
    NewGame,
    ToggleAssist,
    ToggleMovesHint,
}

/// Construction-time configuration. Not mutable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub columns: u8,
    pub rows: u8,
    /// Palette size; refill draws uniformly from `0..token_kinds`.
    pub token_kinds: u8,
    /// Duration of each animation phase in milliseconds.
    pub phase_ms: u32,
    /// Retry bound for board generation.
    pub generation_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            token_kinds: DEFAULT_TOKEN_KINDS,
            phase_ms: PHASE_MS,
            generation_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }
}

/// Engine error kinds.
///
/// Rejected swap intents are not errors; they return `false` from
/// `request_swap` with no state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("position ({column}, {row}) is outside the {columns}x{rows} grid")]
    OutOfBounds {
        column: u8,
        row: u8,
        columns: u8,
        rows: u8,
    },
    #[error("no playable board found after {attempts} attempts; token palette too small?")]
    GenerationExhausted { attempts: u32 },
}
