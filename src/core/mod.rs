//! Core module - pure game logic with no terminal dependencies
//!
//! Everything here is deterministic given a seed: the grid, cluster
//! detection, move enumeration, the resolver, and the turn state machine.
//! It performs no I/O, so it runs identically in the terminal binary, in
//! tests, and in benchmarks.
//!
//! # Module Structure
//!
//! - [`grid`]: the column-major tile matrix with bounds-checked access
//! - [`clusters`]: run-length match detection over rows and columns
//! - [`moves`]: legal-swap enumeration by trial swap
//! - [`resolve`]: clear/gravity/refill steps and board generation
//! - [`scoring`]: cluster point values
//! - [`engine`]: the tick-driven turn state machine and intent API
//! - [`rng`]: seedable LCG for token refill and the assist bot

pub mod clusters;
pub mod engine;
pub mod grid;
pub mod moves;
pub mod resolve;
pub mod rng;
pub mod scoring;

// Re-export commonly used types
pub use clusters::{find_clusters, has_clusters};
pub use engine::{GameState, Phase};
pub use grid::Grid;
pub use moves::find_moves;
pub use resolve::{generate, remove_clusters, resolve_all, shift_tiles};
pub use rng::SimpleRng;
pub use scoring::{cluster_points, total_points};
