//! Input module - maps terminal events to game intents.

pub mod handler;

pub use handler::{handle_key_event, should_quit, InputHandler};
