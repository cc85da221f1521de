//! Grid controller - the grid plus everything needed to play on it
//!
//! States drive the controller; the controller owns the grid, the gem queue,
//! the pair under control and the stones waiting to be dropped.

use crate::config::GameConfig;
use crate::droppable::Droppable;
use crate::error::GridError;
use crate::gem_queue::GemQueue;
use crate::gems_pair::GemsPair;
use crate::grid::Grid;
use crate::rng::RandomGenerator;
use crate::scoring::{ScoreAccumulator, StoneAccumulator};
use crate::types::{Cell, GameAction, Region};

#[derive(Debug)]
pub struct GridController {
    config: GameConfig,
    grid: Grid,
    queue: GemQueue,
    pair: GemsPair,
    pending_stones: u32,
}

impl GridController {
    pub fn new(config: GameConfig, rng: Box<dyn RandomGenerator>) -> Self {
        Self {
            grid: Grid::new(&config),
            queue: GemQueue::new(&config, rng),
            pair: GemsPair::new(),
            pending_stones: 0,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn gems_pair(&self) -> &GemsPair {
        &self.pair
    }

    pub fn gems_pair_mut(&mut self) -> &mut GemsPair {
        &mut self.pair
    }

    pub fn queue(&self) -> &GemQueue {
        &self.queue
    }

    pub fn new_gem_delay(&self) -> u64 {
        self.config.new_gem_delay_ms
    }

    /// Spawn cells of the next pair: (pivot, slave).
    pub fn spawn_cells(&self) -> (Cell, Cell) {
        let column = self.config.spawn_column;
        (Cell::new(1, column), Cell::new(0, column))
    }

    pub fn is_spawn_blocked(&self) -> bool {
        let (pivot, slave) = self.spawn_cells();
        !self.grid.is_cell_free(pivot) || !self.grid.is_cell_free(slave)
    }

    /// Insert the next pair from the queue, both gems falling, and take control of it.
    pub fn insert_new_gems_pair(&mut self) -> Result<(), GridError> {
        let (pivot_cell, slave_cell) = self.spawn_cells();
        let (pivot_kind, slave_kind) = self.queue.draw();

        let pivot = self
            .grid
            .insert_droppable(Droppable::new(pivot_kind, Region::single(pivot_cell)).falling())?;
        let slave = match self
            .grid
            .insert_droppable(Droppable::new(slave_kind, Region::single(slave_cell)).falling())
        {
            Ok(slave) => slave,
            Err(err) => {
                self.grid.remove_droppable(pivot);
                return Err(err);
            }
        };
        self.pair.set(pivot, slave);
        Ok(())
    }

    /// Apply one player action to the pair under control.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.pair.move_left(&mut self.grid),
            GameAction::MoveRight => self.pair.move_right(&mut self.grid),
            GameAction::RotateCw => self.pair.rotate_cw(&mut self.grid),
            GameAction::RotateCcw => self.pair.rotate_ccw(&mut self.grid),
            GameAction::SoftDrop => {
                self.grid.set_stronger_gravity();
                true
            }
            GameAction::Restart => false,
        }
    }

    /// Resolve big gems then crushes once. Returns the number of crushed droppables.
    pub fn settle(&mut self, score: &mut dyn ScoreAccumulator, stones: &mut dyn StoneAccumulator) -> usize {
        self.grid.update_big_gems();
        self.grid.update_crushes(score, stones)
    }

    /// Queue stones sent by an opponent; they drop after the next settle.
    pub fn queue_stones(&mut self, count: u32) {
        self.pending_stones = self.pending_stones.saturating_add(count);
    }

    pub fn pending_stones(&self) -> u32 {
        self.pending_stones
    }

    /// Drop up to `pending_stones` falling stones into the free cells of the
    /// top row, left to right. Returns how many were placed.
    pub fn insert_stones(&mut self) -> u32 {
        let mut placed = 0;
        for column in 0..self.grid.get_number_of_columns() {
            if placed == self.pending_stones {
                break;
            }
            let cell = Cell::new(0, column);
            if !self.grid.is_cell_free(cell) {
                continue;
            }
            let color = self.queue.random_color();
            let stone = Droppable::stone(color, self.config.stone_turns, cell).falling();
            if self.grid.insert_droppable(stone).is_ok() {
                placed += 1;
            }
        }
        self.pending_stones -= placed;
        placed
    }

    /// Fresh grid for a new game; the queue keeps its random stream.
    pub fn reset(&mut self) {
        self.grid = Grid::new(&self.config);
        self.pair.clear();
        self.pending_stones = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    fn controller() -> GridController {
        GridController::new(GameConfig::default(), Box::new(SimpleRng::new(1)))
    }

    #[test]
    fn new_pair_spawns_falling_in_spawn_column() {
        let mut controller = controller();
        controller.insert_new_gems_pair().unwrap();

        let pair = *controller.gems_pair();
        let grid = controller.grid();
        let pivot = grid.droppable(pair.pivot().unwrap()).unwrap();
        let slave = grid.droppable(pair.slave().unwrap()).unwrap();
        assert_eq!(pivot.region().origin(), Cell::new(1, 4));
        assert_eq!(slave.region().origin(), Cell::new(0, 4));
        assert!(pivot.is_falling() && slave.is_falling());
        assert!(controller.is_spawn_blocked());
    }

    #[test]
    fn stones_fill_free_top_cells_only() {
        let mut controller = controller();
        controller
            .grid_mut()
            .insert_droppable(Droppable::gem(crate::types::GemColor::Ruby, Cell::new(0, 0)))
            .unwrap();
        controller.queue_stones(20);
        let columns = u32::from(controller.grid().get_number_of_columns());
        assert_eq!(controller.insert_stones(), columns - 1);
        assert_eq!(controller.pending_stones(), 20 - (columns - 1));
    }
}
