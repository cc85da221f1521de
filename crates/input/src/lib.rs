//! Terminal input crate.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and feeds them
//! to the simulation through [`KeyboardReactor`], an implementation of the
//! core's [`InputReactor`](tui_diamonds_core::InputReactor) with DAS/ARR
//! auto-repeat suitable for terminals without key-release events.

pub mod map;
pub mod reactor;

pub use tui_diamonds_types as types;

pub use map::{handle_key_event, should_quit};
pub use reactor::KeyboardReactor;
