//! Terminal presentation for the falling-block game.
//!
//! The game draws into a [`PlayfieldCanvas`] (board cell units) and reports
//! score and banner changes to a [`HudState`]. [`GameView`] composes both into
//! a [`FrameBuffer`] of styled characters, and [`TerminalRenderer`] flushes
//! that buffer to the terminal, writing only the cells that changed.
//!
//! Board cells are drawn 2 columns wide by default to compensate for the
//! typical terminal glyph aspect ratio.

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod hud;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use canvas::PlayfieldCanvas;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, Viewport};
pub use hud::HudState;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
