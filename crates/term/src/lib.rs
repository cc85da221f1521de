//! Terminal rendering crate.
//!
//! A small game-oriented rendering layer: the grid is drawn into a
//! framebuffer of styled glyphs, which is then flushed to the terminal as a
//! diff against the previous frame.

pub mod fb;
pub mod grid_view;
pub mod renderer;

pub use tui_diamonds_core as core;
pub use tui_diamonds_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use grid_view::GridView;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
