//! Controller state machine.
//!
//! A state is consumed by `update` and the returned value is the next state;
//! there is no other way to change state. Time always comes from the caller.
//!
//! ```text
//! WaitBeforeNewPair --delay elapsed, spawn free--> PairOnControl
//!        |                                              |
//!        +--delay elapsed, spawn blocked--> GameOver    | pair landed
//!        ^                                              v
//!        +-------------- nothing falls or crushes --- Settling
//! ```

use arrayvec::ArrayVec;

use crate::controller::GridController;
use crate::reactor::{InputReactor, MAX_ACTIONS_PER_POLL};
use crate::scoring::{ScoreAccumulator, StoneAccumulator};
use crate::types::GameAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    WaitBeforeNewPair(WaitBeforeNewPair),
    PairOnControl(PairOnControl),
    Settling,
    GameOver,
}

/// Pause between two pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitBeforeNewPair {
    entered_at_ms: u64,
    delay_ms: u64,
}

impl WaitBeforeNewPair {
    pub fn entered_at(&self) -> u64 {
        self.entered_at_ms
    }

    pub fn delay(&self) -> u64 {
        self.delay_ms
    }
}

/// The player steers the current pair; actions are buffered until `update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairOnControl {
    actions: ArrayVec<GameAction, MAX_ACTIONS_PER_POLL>,
}

impl PairOnControl {
    pub fn pending_actions(&self) -> &[GameAction] {
        &self.actions
    }
}

impl ControllerState {
    /// Waiting state entered at `now_ms`.
    pub fn wait(now_ms: u64, delay_ms: u64) -> Self {
        ControllerState::WaitBeforeNewPair(WaitBeforeNewPair {
            entered_at_ms: now_ms,
            delay_ms,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ControllerState::WaitBeforeNewPair(_) => "WaitBeforeNewPair",
            ControllerState::PairOnControl(_) => "PairOnControl",
            ControllerState::Settling => "Settling",
            ControllerState::GameOver => "GameOver",
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, ControllerState::GameOver)
    }

    /// Advance one tick and return the next state.
    pub fn update(
        self,
        now_ms: u64,
        controller: &mut GridController,
        score: &mut dyn ScoreAccumulator,
        stones: &mut dyn StoneAccumulator,
    ) -> ControllerState {
        match self {
            ControllerState::WaitBeforeNewPair(wait) => wait.update(now_ms, controller),
            ControllerState::PairOnControl(control) => control.update(now_ms, controller, score, stones),
            ControllerState::Settling => settle(now_ms, controller, score, stones),
            ControllerState::GameOver => ControllerState::GameOver,
        }
    }

    /// Poll `reactor`. Only the pair state keeps what it reports.
    pub fn react_to_input(&mut self, reactor: &mut dyn InputReactor, now_ms: u64) {
        match self {
            ControllerState::GameOver => {}
            ControllerState::PairOnControl(control) => {
                for action in reactor.react_to_input(now_ms) {
                    if control.actions.try_push(action).is_err() {
                        break;
                    }
                }
            }
            ControllerState::WaitBeforeNewPair(_) | ControllerState::Settling => {
                reactor.react_to_input(now_ms);
            }
        }
    }
}

impl WaitBeforeNewPair {
    fn update(self, now_ms: u64, controller: &mut GridController) -> ControllerState {
        if now_ms.saturating_sub(self.entered_at_ms) < self.delay_ms {
            return ControllerState::WaitBeforeNewPair(self);
        }

        controller.grid_mut().set_normal_gravity();
        if controller.is_spawn_blocked() {
            return ControllerState::GameOver;
        }
        controller.grid_mut().update_stones();
        match controller.insert_new_gems_pair() {
            Ok(()) => ControllerState::PairOnControl(PairOnControl::default()),
            Err(_) => ControllerState::GameOver,
        }
    }
}

impl PairOnControl {
    fn update(
        self,
        _now_ms: u64,
        controller: &mut GridController,
        score: &mut dyn ScoreAccumulator,
        stones: &mut dyn StoneAccumulator,
    ) -> ControllerState {
        if !self.actions.contains(&GameAction::SoftDrop) {
            controller.grid_mut().set_normal_gravity();
        }
        for action in &self.actions {
            controller.apply_action(*action);
        }

        controller.grid_mut().update_falls();
        if !controller.gems_pair().is_landed(controller.grid()) {
            return ControllerState::PairOnControl(PairOnControl::default());
        }

        controller.gems_pair_mut().clear();
        controller.grid_mut().set_strongest_gravity();
        controller.settle(score, stones);
        ControllerState::Settling
    }
}

/// Let everything fall, then resolve big gems and crushes; repeat while
/// crushes open new gaps, drop queued stones, then wait for the next pair.
fn settle(
    now_ms: u64,
    controller: &mut GridController,
    score: &mut dyn ScoreAccumulator,
    stones: &mut dyn StoneAccumulator,
) -> ControllerState {
    controller.grid_mut().update_falls();
    if controller.grid().is_anything_falling() {
        return ControllerState::Settling;
    }
    if controller.settle(score, stones) > 0 {
        return ControllerState::Settling;
    }
    if controller.pending_stones() > 0 && controller.insert_stones() > 0 {
        return ControllerState::Settling;
    }
    ControllerState::wait(now_ms, controller.new_gem_delay())
}
