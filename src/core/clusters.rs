//! Cluster detection - run-length scans over rows and columns
//!
//! A cluster is a run of at least [`MIN_CLUSTER_LEN`] identical, non-empty
//! tokens in one row or column. Output order is fixed: all horizontal
//! clusters row-by-row, then all vertical clusters column-by-column. The
//! order only matters for deterministic comparison; consumers treat the
//! result as a set.

use crate::core::Grid;
use crate::types::{Cluster, Orientation, TilePos, MIN_CLUSTER_LEN};

/// Find every cluster on the grid.
///
/// An L/T-shaped match comes back as two records sharing a cell.
pub fn find_clusters(grid: &Grid) -> Vec<Cluster> {
    let mut clusters = Vec::new();

    // Horizontal runs, row by row.
    for row in 0..grid.rows() {
        let mut run: u8 = 1;
        for column in 0..grid.columns() {
            let at_row_end = column == grid.columns() - 1;
            let extends = !at_row_end
                && grid.token(column, row).is_some()
                && grid.token(column, row) == grid.token(column + 1, row);

            if extends {
                run += 1;
                continue;
            }
            if run >= MIN_CLUSTER_LEN {
                clusters.push(Cluster {
                    origin: TilePos::new(column + 1 - run, row),
                    length: run,
                    orientation: Orientation::Horizontal,
                });
            }
            run = 1;
        }
    }

    // Vertical runs, column by column.
    for column in 0..grid.columns() {
        let mut run: u8 = 1;
        for row in 0..grid.rows() {
            let at_column_end = row == grid.rows() - 1;
            let extends = !at_column_end
                && grid.token(column, row).is_some()
                && grid.token(column, row) == grid.token(column, row + 1);

            if extends {
                run += 1;
                continue;
            }
            if run >= MIN_CLUSTER_LEN {
                clusters.push(Cluster {
                    origin: TilePos::new(column, row + 1 - run),
                    length: run,
                    orientation: Orientation::Vertical,
                });
            }
            run = 1;
        }
    }

    clusters
}

/// Early-exit variant used by trial swaps: is there at least one cluster?
pub fn has_clusters(grid: &Grid) -> bool {
    for row in 0..grid.rows() {
        let mut run: u8 = 1;
        for column in 0..grid.columns().saturating_sub(1) {
            if grid.token(column, row).is_some()
                && grid.token(column, row) == grid.token(column + 1, row)
            {
                run += 1;
                if run >= MIN_CLUSTER_LEN {
                    return true;
                }
            } else {
                run = 1;
            }
        }
    }

    for column in 0..grid.columns() {
        let mut run: u8 = 1;
        for row in 0..grid.rows().saturating_sub(1) {
            if grid.token(column, row).is_some()
                && grid.token(column, row) == grid.token(column, row + 1)
            {
                run += 1;
                if run >= MIN_CLUSTER_LEN {
                    return true;
                }
            } else {
                run = 1;
            }
        }
    }

    false
}
