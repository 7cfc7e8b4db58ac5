//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. Whether an
//! action is allowed in the current run state is decided by the game, not here.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};
