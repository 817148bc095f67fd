//! Legal-move enumeration via trial swaps
//!
//! A move is an adjacent pair whose swap would create at least one cluster.
//! Enumeration swaps each pair in place, asks the detector, and swaps back,
//! so it needs `&mut Grid` but leaves it exactly as found.
//!
//! Each trial detection scans the whole grid, so a full enumeration is
//! O((columns * rows)^2). Fine for the small boards this game plays on, but
//! not for a per-frame path: the engine re-runs it only when the grid
//! actually changes.

use crate::core::clusters::has_clusters;
use crate::core::Grid;
use crate::types::{SwapMove, TilePos};

/// Enumerate every legal move, horizontal pairs first.
pub fn find_moves(grid: &mut Grid) -> Vec<SwapMove> {
    let mut moves = Vec::new();

    // Horizontal neighbor swaps.
    for row in 0..grid.rows() {
        for column in 0..grid.columns().saturating_sub(1) {
            let a = TilePos::new(column, row);
            let b = TilePos::new(column + 1, row);
            if trial_swap_matches(grid, a, b) {
                moves.push(SwapMove::new(a, b));
            }
        }
    }

    // Vertical neighbor swaps.
    for column in 0..grid.columns() {
        for row in 0..grid.rows().saturating_sub(1) {
            let a = TilePos::new(column, row);
            let b = TilePos::new(column, row + 1);
            if trial_swap_matches(grid, a, b) {
                moves.push(SwapMove::new(a, b));
            }
        }
    }

    moves
}

/// Swap, detect, swap back.
fn trial_swap_matches(grid: &mut Grid, a: TilePos, b: TilePos) -> bool {
    grid.swap_tokens(a, b);
    let hit = has_clusters(grid);
    grid.swap_tokens(a, b);
    hit
}
