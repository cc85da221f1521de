//! Snapshot module - read-only view of a session for frontends
//!
//! A [`GridSnapshot`] holds everything a renderer needs and nothing it could
//! use to change the game. Frontends keep one snapshot alive and refill it
//! every frame through [`crate::GameSession::snapshot_into`], so the piece
//! buffer is allocated once.

use crate::droppable::{Droppable, DroppableKind};
use crate::gem_queue::PairKinds;
use crate::types::{GemColor, Region};

/// One droppable as drawn on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceSnapshot {
    pub kind: DroppableKind,
    pub region: Region,
    /// Sprite top in grid-local pixels.
    pub y: f32,
    pub falling: bool,
    pub animation_frame: u8,
    /// Part of the pair the player steers.
    pub controlled: bool,
}

impl From<&Droppable> for PieceSnapshot {
    fn from(value: &Droppable) -> Self {
        Self {
            kind: value.kind(),
            region: value.region(),
            y: value.position_y(),
            falling: value.is_falling(),
            animation_frame: value.animation_frame(),
            controlled: false,
        }
    }
}

/// Full session state for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub rows: u16,
    pub columns: u16,
    pub pieces: Vec<PieceSnapshot>,
    /// Kinds of the pair that spawns next, pivot first.
    pub next_pair: PairKinds,
    /// Name of the controller state.
    pub state: &'static str,
    pub score: u64,
    pub chain: u32,
    pub best_chain: u32,
    /// Stones queued to drop at the end of the current turn.
    pub pending_stones: u32,
    /// Stones earned but not yet queued.
    pub stones_to_send: u32,
    pub game_over: bool,
}

impl Default for GridSnapshot {
    fn default() -> Self {
        let placeholder = DroppableKind::Gem(GemColor::Diamond);
        Self {
            rows: 0,
            columns: 0,
            pieces: Vec::new(),
            next_pair: (placeholder, placeholder),
            state: "",
            score: 0,
            chain: 0,
            best_chain: 0,
            pending_stones: 0,
            stones_to_send: 0,
            game_over: false,
        }
    }
}

impl GridSnapshot {
    /// Reset every field, keeping the piece buffer's allocation.
    pub fn clear(&mut self) {
        let pieces = std::mem::take(&mut self.pieces);
        *self = Self {
            pieces,
            ..Self::default()
        };
        self.pieces.clear();
    }
}
