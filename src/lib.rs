//! TUI Diamonds (workspace facade crate).
//!
//! Re-exports `tui_diamonds::{core,input,term,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use tui_diamonds_core as core;
pub use tui_diamonds_input as input;
pub use tui_diamonds_term as term;
pub use tui_diamonds_types as types;
