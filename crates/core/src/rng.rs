//! RNG module - random sources for gem generation
//!
//! [`SimpleRng`] is a small LCG so that a seed replays the same game;
//! [`SequenceRng`] returns scripted values for tests.

use std::fmt;

/// Source of random numbers for the gem queue.
pub trait RandomGenerator: fmt::Debug {
    fn next_u32(&mut self) -> u32;

    /// Value in `[0, max)`; `max == 0` yields 0.
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }
}

/// Linear congruential generator (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // a zero state would repeat the increment forever
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomGenerator for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            index: 0,
        }
    }
}

impl RandomGenerator for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        let Some(&value) = self.values.get(self.index % self.values.len().max(1)) else {
            return 0;
        };
        self.index += 1;
        value
    }
}
