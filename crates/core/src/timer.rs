//! Monotonic time sources, in milliseconds.

use std::time::Instant;

pub trait Timer {
    fn now_ms(&self) -> u64;
}

/// Time that only moves when told to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualTimer {
    now_ms: u64,
}

impl ManualTimer {
    pub fn new(start_ms: u64) -> Self {
        Self { now_ms: start_ms }
    }

    pub fn set(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    pub fn advance(&mut self, delta_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
    }
}

impl Timer for ManualTimer {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Milliseconds since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimer {
    start: Instant,
}

impl SystemTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for SystemTimer {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
