//! Scoring module - cluster point values
//!
//! Longer runs earn more: `100 * (length - 2)`, so a minimal triple pays 100
//! and each extra token in the run adds another 100. Score is awarded per
//! cluster record: an L/T match that detects as two overlapping clusters pays
//! for both, even though the shared cell is cleared only once.

use crate::types::{Cluster, CLUSTER_POINT_BASE, MIN_CLUSTER_LEN};

/// Points for a single cleared cluster.
pub fn cluster_points(length: u8) -> u32 {
    debug_assert!(length >= MIN_CLUSTER_LEN);
    CLUSTER_POINT_BASE * (length as u32 - 2)
}

/// Total points for one clear step.
pub fn total_points(clusters: &[Cluster]) -> u32 {
    clusters
        .iter()
        .map(|c| cluster_points(c.length))
        .sum()
}
