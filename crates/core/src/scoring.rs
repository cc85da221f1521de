//! Score and stone bookkeeping fed by the crush engine.

use crate::types::STONE_DIVISOR;

/// Receives points while crushes happen; `close_crush` ends one crush batch.
pub trait ScoreAccumulator {
    fn add_score(&mut self, points: u32);
    fn close_crush(&mut self);
}

/// Receives the number of gems destroyed by each crush event.
pub trait StoneAccumulator {
    fn on_crush(&mut self, crushed_gems: u32);
}

/// Chain-aware score keeper.
///
/// Points added during a batch are held back until `close_crush`. A non-empty
/// batch extends the chain and is paid out multiplied by the chain length; an
/// empty batch breaks the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreCalculator {
    score: u64,
    pending: u32,
    chain: u32,
    best_chain: u32,
}

impl ScoreCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Length of the chain currently running (0 once it broke).
    pub fn chain(&self) -> u32 {
        self.chain
    }

    pub fn best_chain(&self) -> u32 {
        self.best_chain
    }

    /// Points not yet paid out.
    pub fn pending(&self) -> u32 {
        self.pending
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ScoreAccumulator for ScoreCalculator {
    fn add_score(&mut self, points: u32) {
        self.pending = self.pending.saturating_add(points);
    }

    fn close_crush(&mut self) {
        if self.pending == 0 {
            self.chain = 0;
            return;
        }
        self.chain += 1;
        self.best_chain = self.best_chain.max(self.chain);
        self.score += u64::from(self.pending) * u64::from(self.chain);
        self.pending = 0;
    }
}

/// Counts crushed gems and turns them into stones for an opponent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoneCalculator {
    crushed_gems: u32,
    crush_events: u32,
}

impl StoneCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn crushed_gems(&self) -> u32 {
        self.crushed_gems
    }

    pub fn crush_events(&self) -> u32 {
        self.crush_events
    }

    /// One stone per `STONE_DIVISOR` crushed gems.
    pub fn stones_to_send(&self) -> u32 {
        self.crushed_gems / STONE_DIVISOR
    }

    /// Hand out the stones earned so far, keeping the remainder.
    pub fn take_stones(&mut self) -> u32 {
        let stones = self.stones_to_send();
        self.crushed_gems -= stones * STONE_DIVISOR;
        stones
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl StoneAccumulator for StoneCalculator {
    fn on_crush(&mut self, crushed_gems: u32) {
        self.crushed_gems = self.crushed_gems.saturating_add(crushed_gems);
        self.crush_events += 1;
    }
}
