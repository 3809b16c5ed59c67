//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 8x8 tile grid with generation, gravity compaction, and refill
//! - [`matcher`]: run detection and special-tile promotion
//! - [`cascade`]: stepwise chain-reaction resolution with a hard step cap
//! - [`session`]: the complete game state machine across all modes
//! - [`scoring`]: match scores, combo bonuses, and chain time bonuses
//! - [`specials`]: blast footprints for activated special tiles
//! - [`puzzle`]: hand-authored levels with fixed layouts and win targets
//! - [`rng`]: seeded LCG driving every random decision
//!
//! # Game Rules
//!
//! - **Swap matching**: swap two adjacent tiles; runs of three or more of a
//!   color clear. A swap that makes no match reverts for free.
//! - **Cascades**: cleared tiles fall, the top refills, and new runs chain
//!   until the board is stable (capped at 20 steps).
//! - **Specials**: a run of four earns a row or column clearer, five a bomb,
//!   and a run through a rainbow re-earns the rainbow. Clicking a special
//!   detonates it.
//! - **States**: locked tiles need one match to unlock, frozen tiles lose a
//!   layer per match and clear at zero.
//! - **Modes**: classic, time, endless, puzzle, chain storm, special
//!   challenge, and gravity flip, each with its own move/time/target budget.
//!
//! # Example
//!
//! ```
//! use tui_crush_core::GameSession;
//! use tui_crush_types::{Difficulty, GameMode, GamePhase};
//!
//! let mut game = GameSession::new(GameMode::Classic, Difficulty::Normal, 12345);
//! game.start();
//! assert_eq!(game.phase(), GamePhase::Playing);
//!
//! // Take the first available move
//! if let Some((a, b)) = game.hint() {
//!     game.select_cell(a.row, a.col);
//!     game.select_cell(b.row, b.col);
//!     game.fast_forward();
//! }
//! ```
//!
//! # Timing
//!
//! The session uses a fixed timestep: call [`GameSession::tick`] every frame
//! with elapsed milliseconds. Cascade steps advance every 600ms while the
//! session is animating, and timed modes count down one second per 1000ms.

pub mod board;
pub mod cascade;
pub mod matcher;
pub mod puzzle;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod specials;

pub use tui_crush_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use cascade::{CascadeConfig, CascadeEngine, CascadeStep};
pub use matcher::{find_matches, is_matchable, MatchScan, Promotion};
pub use puzzle::{PuzzleLevel, PuzzleTarget};
pub use rng::SimpleRng;
pub use scoring::{chain_time_bonus, match_score, special_score, MatchScore};
pub use session::{GameSession, PowerUpEffect, SelectOutcome};
pub use snapshot::SessionSnapshot;
pub use specials::blast_pattern;
