//! Terminal rendering module.
//!
//! A small game-oriented rendering layer: the view draws into a plain
//! framebuffer of styled characters, and the renderer flushes it to the
//! terminal with diffed updates. No widget toolkit; cell sizes are chosen
//! directly so board tiles stay roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, FrameBuffer, Rgb, Style};
pub use game_view::{GameView, Layout, Viewport};
pub use renderer::TerminalRenderer;
