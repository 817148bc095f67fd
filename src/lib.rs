//! Terminal match-3.
//!
//! A single-player tile-matching game split the usual way: a pure,
//! deterministic simulation core (`core`), thin crossterm presentation
//! (`term`), pointer/keyboard intent mapping (`input`), and the shared data
//! types (`types`). The binary in `main.rs` wires them into a frame loop.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
