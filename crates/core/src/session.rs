//! Game session - controller, state and accumulators bundled for a frontend.
//!
//! A session is a single-player game: stones earned by crushing gems come
//! back onto the player's own grid. When a turn ends (settling finishes and
//! the next pair is awaited) the earned stones are queued, and they drop at
//! the end of the following turn.

use crate::config::GameConfig;
use crate::controller::GridController;
use crate::reactor::InputReactor;
use crate::rng::RandomGenerator;
use crate::scoring::{ScoreCalculator, StoneCalculator};
use crate::snapshot::{GridSnapshot, PieceSnapshot};
use crate::state::ControllerState;

#[derive(Debug)]
pub struct GameSession {
    controller: GridController,
    state: ControllerState,
    score: ScoreCalculator,
    stones: StoneCalculator,
}

impl GameSession {
    /// New session whose first pair arrives one delay after `now_ms`.
    pub fn new(config: GameConfig, rng: Box<dyn RandomGenerator>, now_ms: u64) -> Self {
        let delay = config.new_gem_delay_ms;
        Self {
            controller: GridController::new(config, rng),
            state: ControllerState::wait(now_ms, delay),
            score: ScoreCalculator::new(),
            stones: StoneCalculator::new(),
        }
    }

    pub fn controller(&self) -> &GridController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GridController {
        &mut self.controller
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn score(&self) -> &ScoreCalculator {
        &self.score
    }

    pub fn stones(&self) -> &StoneCalculator {
        &self.stones
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn react_to_input(&mut self, reactor: &mut dyn InputReactor, now_ms: u64) {
        self.state.react_to_input(reactor, now_ms);
    }

    /// One simulation tick at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        self.controller.grid_mut().update_droppable_animations(now_ms);
        let state = std::mem::replace(&mut self.state, ControllerState::GameOver);
        let was_settling = matches!(state, ControllerState::Settling);
        self.state = state.update(now_ms, &mut self.controller, &mut self.score, &mut self.stones);

        if was_settling && matches!(self.state, ControllerState::WaitBeforeNewPair(_)) {
            let earned = self.stones.take_stones();
            self.controller.queue_stones(earned);
        }
    }

    /// Start over on an empty grid.
    pub fn restart(&mut self, now_ms: u64) {
        self.controller.reset();
        self.score.reset();
        self.stones.reset();
        self.state = ControllerState::wait(now_ms, self.controller.new_gem_delay());
    }

    /// Fill `out` with the current state, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.clear();
        let grid = self.controller.grid();
        let pair = self.controller.gems_pair();
        out.rows = grid.get_number_of_rows();
        out.columns = grid.get_number_of_columns();
        out.pieces.extend(grid.droppables().iter().map(|droppable| {
            let mut piece = PieceSnapshot::from(droppable);
            piece.controlled = Some(droppable.id()) == pair.pivot() || Some(droppable.id()) == pair.slave();
            piece
        }));
        out.next_pair = self.controller.queue().peek();
        out.state = self.state.name();
        out.score = self.score.score();
        out.chain = self.score.chain();
        out.best_chain = self.score.best_chain();
        out.pending_stones = self.controller.pending_stones();
        out.stones_to_send = self.stones.stones_to_send();
        out.game_over = self.state.is_game_over();
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut snapshot = GridSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}
