//! The pair of gems under player control.
//!
//! The pivot stays where the player moves it; the slave orbits it. The
//! orientation is the direction from the pivot to the slave.

use crate::droppable::DroppableId;
use crate::grid::Grid;
use crate::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GemsPair {
    pivot: Option<DroppableId>,
    slave: Option<DroppableId>,
    orientation: Direction,
}

impl Default for GemsPair {
    fn default() -> Self {
        Self {
            pivot: None,
            slave: None,
            orientation: Direction::Up,
        }
    }
}

impl GemsPair {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take control of a freshly spawned pair, slave above pivot.
    pub fn set(&mut self, pivot: DroppableId, slave: DroppableId) {
        self.pivot = Some(pivot);
        self.slave = Some(slave);
        self.orientation = Direction::Up;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn pivot(&self) -> Option<DroppableId> {
        self.pivot
    }

    pub fn slave(&self) -> Option<DroppableId> {
        self.slave
    }

    pub fn orientation(&self) -> Direction {
        self.orientation
    }

    pub fn is_empty(&self) -> bool {
        self.pivot.is_none()
    }

    pub fn move_left(&mut self, grid: &mut Grid) -> bool {
        self.shift(grid, Direction::Left)
    }

    pub fn move_right(&mut self, grid: &mut Grid) -> bool {
        self.shift(grid, Direction::Right)
    }

    pub fn rotate_cw(&mut self, grid: &mut Grid) -> bool {
        self.rotate_to(grid, self.orientation.rotate_cw())
    }

    pub fn rotate_ccw(&mut self, grid: &mut Grid) -> bool {
        self.rotate_to(grid, self.orientation.rotate_ccw())
    }

    /// Control ends as soon as either gem stops falling or leaves the grid.
    pub fn is_landed(&self, grid: &Grid) -> bool {
        let falling = |id: Option<DroppableId>| {
            id.and_then(|id| grid.droppable(id))
                .is_some_and(|droppable| droppable.is_falling())
        };
        !(falling(self.pivot) && falling(self.slave))
    }

    /// Move both gems one column; all or nothing.
    fn shift(&mut self, grid: &mut Grid, direction: Direction) -> bool {
        let (Some(pivot), Some(slave)) = (self.pivot, self.slave) else {
            return false;
        };
        if self.is_landed(grid) {
            return false;
        }
        let (leader, follower) = if self.orientation == direction {
            (slave, pivot)
        } else {
            (pivot, slave)
        };

        if !grid.droppable_can_move(leader, direction) {
            return false;
        }
        if grid.translate_droppable(leader, direction).is_err() {
            return false;
        }
        if grid.droppable_can_move(follower, direction)
            && grid.translate_droppable(follower, direction).is_ok()
        {
            return true;
        }

        // follower is blocked: put the leader back where it was
        let _ = grid.translate_droppable(leader, opposite(direction));
        false
    }

    fn rotate_to(&mut self, grid: &mut Grid, orientation: Direction) -> bool {
        let (Some(pivot), Some(slave)) = (self.pivot, self.slave) else {
            return false;
        };
        if self.is_landed(grid) {
            return false;
        }
        let Some(target) = grid
            .droppable(pivot)
            .and_then(|pivot| pivot.region().origin().shifted(orientation))
        else {
            return false;
        };
        if !grid.is_cell_free(target) {
            return false;
        }
        if grid.move_droppable_to_cell(slave, target).is_err() {
            return false;
        }
        self.orientation = orientation;
        true
    }
}

fn opposite(direction: Direction) -> Direction {
    direction.rotate_cw().rotate_cw()
}
