//! Keyboard reactor with DAS/ARR auto-repeat.
//!
//! Key events are pushed as they arrive; the controller state polls the
//! reactor once per tick with the current time. Terminals that never report
//! key releases are handled with a release timeout.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use tui_diamonds_core::reactor::{ActionBatch, InputReactor};

use crate::map::handle_key_event;
use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

// Without key-release events, a tap must not turn into a held key.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Right,
    None,
}

#[derive(Debug, Clone)]
pub struct KeyboardReactor {
    pending: ActionBatch,
    horizontal: Horizontal,
    soft_drop_held: bool,
    last_key_ms: u64,
    last_poll_ms: Option<u64>,
    das_timer: u64,
    arr_accumulator: u64,
    das_delay: u64,
    arr_rate: u64,
    key_release_timeout_ms: u64,
}

impl KeyboardReactor {
    pub fn new() -> Self {
        Self::with_config(u64::from(DEFAULT_DAS_MS), u64::from(DEFAULT_ARR_MS))
    }

    pub fn with_config(das_delay: u64, arr_rate: u64) -> Self {
        Self {
            pending: ActionBatch::new(),
            horizontal: Horizontal::None,
            soft_drop_held: false,
            last_key_ms: 0,
            last_poll_ms: None,
            das_timer: 0,
            arr_accumulator: 0,
            das_delay,
            arr_rate: arr_rate.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Record a terminal key event received at `now_ms`.
    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64) {
        if key.kind == KeyEventKind::Release {
            self.handle_key_release(key.code);
            return;
        }
        let Some(action) = handle_key_event(key) else {
            return;
        };
        match action {
            GameAction::MoveLeft => self.press_horizontal(Horizontal::Left, action, now_ms),
            GameAction::MoveRight => self.press_horizontal(Horizontal::Right, action, now_ms),
            GameAction::SoftDrop => {
                self.last_key_ms = now_ms;
                self.soft_drop_held = true;
            }
            GameAction::RotateCw | GameAction::RotateCcw | GameAction::Restart => {
                let _ = self.pending.try_push(action);
            }
        }
    }

    fn press_horizontal(&mut self, direction: Horizontal, action: GameAction, now_ms: u64) {
        self.last_key_ms = now_ms;
        if self.horizontal == direction {
            return;
        }
        self.horizontal = direction;
        self.das_timer = 0;
        self.arr_accumulator = 0;
        let _ = self.pending.try_push(action);
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match handle_key_event(KeyEvent::from(code)) {
            Some(GameAction::MoveLeft) if self.horizontal == Horizontal::Left => self.release_horizontal(),
            Some(GameAction::MoveRight) if self.horizontal == Horizontal::Right => self.release_horizontal(),
            Some(GameAction::SoftDrop) => self.soft_drop_held = false,
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = Horizontal::None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Whether the restart key was pressed since the last poll.
    pub fn restart_requested(&self) -> bool {
        self.pending.contains(&GameAction::Restart)
    }

    pub fn reset(&mut self) {
        let das_delay = self.das_delay;
        let arr_rate = self.arr_rate;
        let timeout = self.key_release_timeout_ms;
        *self = Self::with_config(das_delay, arr_rate).with_key_release_timeout_ms(timeout);
    }
}

impl Default for KeyboardReactor {
    fn default() -> Self {
        Self::new()
    }
}

impl InputReactor for KeyboardReactor {
    fn react_to_input(&mut self, now_ms: u64) -> ActionBatch {
        let elapsed = self
            .last_poll_ms
            .map_or(0, |last| now_ms.saturating_sub(last));
        self.last_poll_ms = Some(now_ms);

        let mut actions = std::mem::take(&mut self.pending);

        if now_ms.saturating_sub(self.last_key_ms) > self.key_release_timeout_ms {
            if self.horizontal != Horizontal::None {
                self.release_horizontal();
            }
            self.soft_drop_held = false;
        }

        let repeat = match self.horizontal {
            Horizontal::Left => Some(GameAction::MoveLeft),
            Horizontal::Right => Some(GameAction::MoveRight),
            Horizontal::None => None,
        };
        if let Some(repeat) = repeat {
            let previous = self.das_timer;
            self.das_timer += elapsed;
            if self.das_timer >= self.das_delay {
                let excess = if previous < self.das_delay {
                    self.das_timer - self.das_delay
                } else {
                    elapsed
                };
                self.arr_accumulator += excess;
                while self.arr_accumulator >= self.arr_rate {
                    let _ = actions.try_push(repeat);
                    self.arr_accumulator -= self.arr_rate;
                }
            }
        }

        // soft drop is a level, reported on every poll while held
        if self.soft_drop_held {
            let _ = actions.try_push(GameAction::SoftDrop);
        }
        actions
    }
}
