//! Resolver - clearing, gravity, refill, and board generation
//!
//! The resolver owns the clear -> shift -> re-detect cycle. In-game the
//! engine drives the two halves separately so each step gets its animation
//! window; board generation runs the whole loop to a fixed point before the
//! player ever sees the grid.

use log::{debug, trace};

use crate::core::clusters::find_clusters;
use crate::core::moves::find_moves;
use crate::core::{Grid, SimpleRng};
use crate::types::{Cluster, GameError, TilePos};

/// Mark every cluster cell empty and assign fall distances.
///
/// Clearing is idempotent per cell, so overlapping clusters vacate their
/// shared cell once. Afterwards each surviving tile's `shift` equals the
/// number of empty cells below it in its column; vacated cells carry 0.
pub fn remove_clusters(grid: &mut Grid, clusters: &[Cluster]) {
    for cluster in clusters {
        for pos in cluster.tiles() {
            grid.set_token(pos.column, pos.row, None);
        }
    }

    // Walk each column bottom to top, counting the holes passed so far.
    for column in 0..grid.columns() {
        let mut holes: u8 = 0;
        for row in (0..grid.rows()).rev() {
            if grid.token(column, row).is_none() {
                holes += 1;
                grid.set_shift(column, row, 0);
            } else {
                grid.set_shift(column, row, holes);
            }
        }
    }
}

/// Apply the pending fall distances and refill every empty cell.
///
/// Bottom-to-top per column: an empty cell takes a fresh random token, a
/// tile with a pending shift swaps downward into the hole it falls into.
/// Swapping (rather than overwriting) floats the freshly generated token up
/// to the vacated slot, so one pass settles the whole column. All shifts are
/// reset on the way.
pub fn shift_tiles(grid: &mut Grid, rng: &mut SimpleRng, token_kinds: u8) {
    for column in 0..grid.columns() {
        for row in (0..grid.rows()).rev() {
            if grid.token(column, row).is_none() {
                grid.set_token(column, row, Some(rng.next_token(token_kinds)));
            } else {
                let shift = grid.shift(column, row);
                if shift > 0 {
                    grid.swap_tokens(
                        TilePos::new(column, row),
                        TilePos::new(column, row + shift),
                    );
                }
            }
            grid.set_shift(column, row, 0);
        }
    }
}

/// Upper bound on resolution passes for one grid.
///
/// Degenerate palettes (one color) re-cluster on every refill and would
/// otherwise never stabilize; the bound turns that into a failed generation
/// attempt instead of a hang.
pub fn max_resolve_passes(grid: &Grid) -> u32 {
    (grid.columns() as u32 * grid.rows() as u32).max(8)
}

/// Clear and refill until the grid has no clusters, or the pass bound hits.
///
/// Returns the number of clear/shift passes performed.
pub fn resolve_all(grid: &mut Grid, rng: &mut SimpleRng, token_kinds: u8) -> u32 {
    let bound = max_resolve_passes(grid);
    let mut passes = 0;

    while passes < bound {
        let clusters = find_clusters(grid);
        if clusters.is_empty() {
            break;
        }
        remove_clusters(grid, &clusters);
        shift_tiles(grid, rng, token_kinds);
        passes += 1;
    }

    trace!("resolve_all settled after {passes} pass(es)");
    passes
}

/// Generate a playable board in place.
///
/// Fills the grid with uniform random tokens, resolves accidental starting
/// clusters, and accepts the result only if it is cluster-free with at least
/// one legal move. Retries up to `max_attempts` times before reporting the
/// palette as unplayable. Returns the number of attempts used.
pub fn generate(
    grid: &mut Grid,
    rng: &mut SimpleRng,
    token_kinds: u8,
    max_attempts: u32,
) -> Result<u32, GameError> {
    if token_kinds == 0 {
        return Err(GameError::GenerationExhausted { attempts: 0 });
    }

    for attempt in 1..=max_attempts {
        grid.fill_with(|| Some(rng.next_token(token_kinds)));
        resolve_all(grid, rng, token_kinds);

        if find_clusters(grid).is_empty() && !find_moves(grid).is_empty() {
            debug!("board generated on attempt {attempt}");
            return Ok(attempt);
        }
    }

    Err(GameError::GenerationExhausted {
        attempts: max_attempts,
    })
}
