//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules, the session state and the frame-driven loop
//! controller. It has no dependency on a terminal, a clock or an event source:
//! those are injected through the traits in [`controller`], so a whole game can
//! be replayed in a unit test with a fake scheduler and fake timestamps.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shape matrices and in-place 90 degree rotation
//! - [`board`]: the grid with collision, merge and row sweep
//! - [`rng`]: seeded uniform piece selection
//! - [`game_state`]: one session (player mechanics, score, drop timer, run state)
//! - [`controller`]: loop driver wired to scheduler, observer and drawing surface
//!
//! # Game Rules
//!
//! - 12x20 grid, pieces spawn centred on the top row
//! - A forced descent happens once more than 1000 ms have accumulated
//! - Rotation tries sideways nudges of +1, -2, +3, ... before giving up
//! - Rows cleared in one sweep score 10, 20, 40, 80, ...
//! - A spawn that collides ends the game; restart is only possible from there
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, RunState};
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.run_state(), RunState::Running);
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod controller;
pub mod game_state;
pub mod pieces;
pub mod rng;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, SweepOutcome};
pub use controller::{draw, Controller, GameObserver, PendingTick, Scheduler, Surface};
pub use game_state::{GameEvent, GameState};
pub use pieces::{create_piece, Player, Shape};
pub use rng::SimpleRng;
