//! TUI Crush (workspace facade crate).
//!
//! This package keeps the `tui_crush::{core,term,input,types}` public API
//! stable while the implementation lives in dedicated crates under `crates/`.

pub use tui_crush_core as core;
pub use tui_crush_input as input;
pub use tui_crush_term as term;
pub use tui_crush_types as types;
