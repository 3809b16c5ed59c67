//! Terminal front end: framebuffer, board view, and renderer.
//!
//! The split mirrors the rest of the workspace: `board_view` is pure and
//! testable, `renderer` owns the crossterm plumbing, and `fb` is the styled
//! character buffer both of them share.

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use tui_crush_core as core;
pub use tui_crush_types as types;

pub use board_view::{BoardView, Viewport};
pub use fb::{CellStyle, FrameBuffer, Rgb};
pub use renderer::TerminalRenderer;
