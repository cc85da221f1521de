//! Input capability consumed by controller states.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::types::GameAction;

/// Maximum number of actions a reactor reports in one poll.
pub const MAX_ACTIONS_PER_POLL: usize = 16;

pub type ActionBatch = ArrayVec<GameAction, MAX_ACTIONS_PER_POLL>;

/// Turns whatever input device is in use into game actions.
pub trait InputReactor {
    /// Actions due at `now_ms`, in the order they happened.
    fn react_to_input(&mut self, now_ms: u64) -> ActionBatch;
}

/// Reactor fed programmatically; each poll drains what was pushed.
#[derive(Debug, Clone, Default)]
pub struct QueuedReactor {
    pending: VecDeque<GameAction>,
    polls: u32,
}

impl QueuedReactor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: GameAction) {
        self.pending.push_back(action);
    }

    /// Number of times a state polled this reactor.
    pub fn polls(&self) -> u32 {
        self.polls
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl InputReactor for QueuedReactor {
    fn react_to_input(&mut self, _now_ms: u64) -> ActionBatch {
        self.polls += 1;
        let mut batch = ActionBatch::new();
        while !batch.is_full() {
            match self.pending.pop_front() {
                Some(action) => batch.push(action),
                None => break,
            }
        }
        batch
    }
}
