//! Grid module - spatial store of droppables
//!
//! The grid owns every live droppable and is the only place that moves them,
//! so no two droppables ever share a cell. Queries never fail: an invalid or
//! blocked target simply reports "not free". Mutations only fail on contract
//! violations (unknown droppable, occupied or out-of-bounds insertion); a
//! blocked move is a silent no-op because moves are polled every tick.
//!
//! Coordinates: rows grow downwards from the top (row 0), columns grow to
//! the right from column 0.

use crate::config::GameConfig;
use crate::crush::{self, CRUSH_PRIORITIES};
use crate::droppable::{Droppable, DroppableId, DroppableKind};
use crate::droppable_list::DroppableList;
use crate::error::GridError;
use crate::iteration::{CreateNewBigGems, DroppableIteration, ExtendIteration, MergeBigGemsIteration};
use crate::scoring::{ScoreAccumulator, StoneAccumulator};
use crate::types::{Cell, Direction, Region, CELL_SIZE_IN_PIXELS};

#[derive(Debug, Clone)]
pub struct Grid {
    droppables: DroppableList,
    rows: u16,
    columns: u16,
    actual_gravity: u16,
    normal_gravity: u16,
    gravity_multiplier: u16,
    strongest_gravity_multiplier: u16,
    next_id: u32,
}

impl Grid {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            droppables: DroppableList::new(),
            rows: config.rows,
            columns: config.columns,
            actual_gravity: config.normal_gravity,
            normal_gravity: config.normal_gravity,
            gravity_multiplier: config.gravity_multiplier,
            strongest_gravity_multiplier: config.strongest_gravity_multiplier,
            next_id: 0,
        }
    }

    pub fn set_strongest_gravity(&mut self) {
        self.actual_gravity = self.normal_gravity.saturating_mul(self.strongest_gravity_multiplier);
    }

    pub fn set_stronger_gravity(&mut self) {
        self.actual_gravity = self.normal_gravity.saturating_mul(self.gravity_multiplier);
    }

    pub fn set_normal_gravity(&mut self) {
        self.actual_gravity = self.normal_gravity;
    }

    /// Override the gravity with an arbitrary value (pixels per tick).
    pub fn set_gravity(&mut self, gravity: u16) {
        self.actual_gravity = gravity;
    }

    pub fn get_actual_gravity(&self) -> u16 {
        self.actual_gravity
    }

    pub fn get_number_of_rows(&self) -> u16 {
        self.rows
    }

    pub fn get_number_of_columns(&self) -> u16 {
        self.columns
    }

    /// Grid height in pixels.
    pub fn get_height(&self) -> u32 {
        u32::from(CELL_SIZE_IN_PIXELS) * u32::from(self.rows)
    }

    /// Pixel position of the top edge of `row`.
    pub fn get_row_upper_bound(&self, row: u16) -> f32 {
        f32::from(row) * f32::from(CELL_SIZE_IN_PIXELS)
    }

    /// Bounds check.
    ///
    /// Columns are checked against the width; rows only against the height.
    /// Coordinates are unsigned, so the lower bounds hold by construction.
    pub fn is_valid_cell(&self, cell: Cell) -> bool {
        if cell.column >= self.columns {
            return false;
        }
        cell.row < self.rows
    }

    pub fn is_cell_free(&self, cell: Cell) -> bool {
        if !self.is_valid_cell(cell) {
            return false;
        }
        self.get_droppable_at(cell).is_none()
    }

    /// First droppable in list order whose region contains `cell`.
    pub fn get_droppable_at(&self, cell: Cell) -> Option<&Droppable> {
        self.droppables
            .iter()
            .find(|droppable| droppable.region().contains_cell(cell))
    }

    /// Distinct droppables touching `region`, in scan order (each column top to bottom).
    pub fn get_droppables_in_area(&self, region: &Region) -> Vec<DroppableId> {
        let mut found = Vec::new();
        for cell in region.cells() {
            if let Some(droppable) = self.get_droppable_at(cell) {
                if !found.contains(&droppable.id()) {
                    found.push(droppable.id());
                }
            }
        }
        found
    }

    pub fn droppable(&self, id: DroppableId) -> Option<&Droppable> {
        self.droppables.get(id)
    }

    pub fn contains(&self, id: DroppableId) -> bool {
        self.droppables.contains(id)
    }

    pub fn droppables(&self) -> &DroppableList {
        &self.droppables
    }

    pub fn get_number_of_droppables(&self) -> usize {
        self.droppables.len()
    }

    /// Insert `droppable` at the origin of its region.
    ///
    /// Fails if the origin cell is out of bounds or occupied, or if any other
    /// cell of the region is.
    pub fn insert_droppable(&mut self, mut droppable: Droppable) -> Result<DroppableId, GridError> {
        let region = droppable.region();
        let origin = region.origin();
        if !self.is_valid_cell(origin) {
            return Err(GridError::OutOfBounds(region));
        }
        if !self.is_cell_free(origin) {
            return Err(GridError::CellOccupied(origin));
        }
        for cell in region.cells() {
            if !self.is_valid_cell(cell) {
                return Err(GridError::OutOfBounds(region));
            }
            if !self.is_cell_free(cell) {
                return Err(GridError::CellOccupied(cell));
            }
        }

        self.next_id += 1;
        let id = DroppableId::new(self.next_id);
        droppable.bind(id);
        droppable.move_to_cell(origin);
        self.droppables.add(droppable);
        Ok(id)
    }

    pub fn remove_droppable(&mut self, id: DroppableId) -> Option<Droppable> {
        self.droppables.remove(id)
    }

    /// Whether `region` could hold droppable `id`: in bounds, and every cell
    /// free or already owned by `id`.
    pub fn is_region_free_for(&self, region: &Region, id: DroppableId) -> bool {
        region.cells().all(|cell| {
            self.is_valid_cell(cell)
                && self
                    .get_droppable_at(cell)
                    .map_or(true, |occupant| occupant.id() == id)
        })
    }

    pub fn droppable_can_move(&self, id: DroppableId, direction: Direction) -> bool {
        let Some(droppable) = self.droppables.get(id) else {
            return false;
        };
        droppable
            .region()
            .shifted(direction)
            .is_some_and(|destination| self.is_region_free_for(&destination, id))
    }

    /// Shift `id` one cell; a blocked shift is a no-op.
    pub fn translate_droppable(&mut self, id: DroppableId, direction: Direction) -> Result<(), GridError> {
        let droppable = self
            .droppables
            .get(id)
            .ok_or(GridError::UnknownDroppable(id))?;
        match droppable.region().origin().shifted(direction) {
            Some(cell) => self.move_droppable_to_cell(id, cell),
            None => Ok(()),
        }
    }

    /// Move `id` so its origin is `cell`, keeping its offset inside the row.
    ///
    /// A blocked destination is a no-op.
    pub fn move_droppable_to_cell(&mut self, id: DroppableId, cell: Cell) -> Result<(), GridError> {
        let droppable = self
            .droppables
            .get(id)
            .ok_or(GridError::UnknownDroppable(id))?;
        let region = droppable.region();
        if !self.is_region_free_for(&region.moved_to(cell), id) {
            return Ok(());
        }

        let height_in_cell = droppable.position_y() - self.get_row_upper_bound(region.top_row());
        let droppable = self
            .droppables
            .get_mut(id)
            .ok_or(GridError::UnknownDroppable(id))?;
        droppable.move_to_cell(cell);
        let relative_height = droppable.position_y();
        droppable.set_position_y(relative_height + height_in_cell);
        Ok(())
    }

    /// Advance `id` one fall step, only if it is currently falling.
    pub fn update_droppable(&mut self, id: DroppableId) {
        if self.droppables.get(id).is_some_and(Droppable::is_falling) {
            self.apply_fall_step(id);
        }
    }

    /// One fall step for every droppable, in list order.
    ///
    /// Walks the live list: later droppables see the positions earlier ones
    /// reached in this same pass. Falls never insert or remove droppables.
    pub fn update_falls(&mut self) {
        let mut index = 0;
        while let Some(id) = self.droppables.id_at(index) {
            self.apply_fall_step(id);
            index += 1;
        }
    }

    fn apply_fall_step(&mut self, id: DroppableId) {
        let Some(droppable) = self.droppables.get(id) else {
            return;
        };
        let step = droppable.fall_step(self);
        let row_top = self.get_row_upper_bound(droppable.region().top_row());

        let mut y = step.y;
        if step.rows_down > 0 {
            let moved = self.droppable_can_move(id, Direction::Down)
                && self.translate_droppable(id, Direction::Down).is_ok();
            if !moved {
                y = row_top;
            }
        }
        if let Some(droppable) = self.droppables.get_mut(id) {
            droppable.set_position_y(y);
            droppable.set_falling(step.falling);
        }
    }

    pub fn is_anything_falling(&self) -> bool {
        self.droppables.iter().any(Droppable::is_falling)
    }

    pub fn update_droppable_animations(&mut self, now_ms: u64) {
        for droppable in self.droppables.iter_mut() {
            droppable.update(now_ms);
        }
    }

    /// The top cell of `column` holds a settled droppable.
    pub fn is_column_full(&self, column: u16) -> bool {
        let cell = Cell::new(0, column);
        if self.is_cell_free(cell) {
            return false;
        }
        self.get_droppable_at(cell)
            .is_some_and(|droppable| !droppable.is_falling())
    }

    /// `rows - row` of the topmost settled droppable in `column`, or 0.
    ///
    /// Measures from the first settled piece met scanning down, not the
    /// height of a contiguous stack.
    pub fn get_height_of_column(&self, column: u16) -> u16 {
        for row in 0..self.rows {
            let cell = Cell::new(row, column);
            if self
                .get_droppable_at(cell)
                .is_some_and(|droppable| !droppable.is_falling())
                && self.is_valid_cell(cell)
            {
                return self.rows - row;
            }
        }
        0
    }

    /// Create big gems, extend them, then merge until nothing merges.
    ///
    /// Every merge removes one big gem, so there can be no more merging
    /// passes than big gems.
    pub fn update_big_gems(&mut self) {
        self.run_iteration(&mut CreateNewBigGems);
        self.run_iteration(&mut ExtendIteration);

        let max_passes = self.count_big_gems() + 1;
        for _ in 0..max_passes {
            if !self.update_merge_all_big_gems() {
                break;
            }
        }
    }

    /// One merge pass; true if anything merged.
    pub fn update_merge_all_big_gems(&mut self) -> bool {
        let mut merge = MergeBigGemsIteration::default();
        self.run_iteration(&mut merge);
        merge.has_not_yet_finished_merging()
    }

    fn count_big_gems(&self) -> usize {
        self.droppables
            .iter()
            .filter(|droppable| matches!(droppable.kind(), DroppableKind::BigGem(_)))
            .count()
    }

    /// Start crushes by priority, then close the crush batch once.
    ///
    /// Returns the number of droppables removed.
    pub fn update_crushes(
        &mut self,
        score: &mut dyn ScoreAccumulator,
        stones: &mut dyn StoneAccumulator,
    ) -> usize {
        let mut crushed = 0;
        for priority in CRUSH_PRIORITIES {
            for id in self.droppables.snapshot() {
                if self.contains(id) {
                    crushed += crush::start_crush(self, id, priority, score, stones);
                }
            }
        }
        score.close_crush();
        crushed
    }

    /// Per-turn stone bookkeeping; regions are untouched.
    pub fn update_stones(&mut self) {
        for droppable in self.droppables.iter_mut() {
            droppable.update_transformation();
        }
    }

    /// Apply `iteration` to a snapshot of the live list.
    ///
    /// Entries removed earlier in the same pass are skipped.
    pub fn run_iteration(&mut self, iteration: &mut dyn DroppableIteration) {
        for id in self.droppables.snapshot() {
            if self.contains(id) {
                iteration.execute_on(self, id);
            }
        }
    }

    /// Replace `members` with one new settled droppable covering `region`.
    ///
    /// Every cell of `region` must be free or owned by a member; otherwise
    /// nothing changes and `None` is returned.
    pub(crate) fn fuse(
        &mut self,
        members: &[DroppableId],
        kind: DroppableKind,
        region: Region,
    ) -> Option<DroppableId> {
        let fits = region.cells().all(|cell| {
            self.is_valid_cell(cell)
                && self
                    .get_droppable_at(cell)
                    .map_or(true, |occupant| members.contains(&occupant.id()))
        });
        if !fits || !members.iter().all(|id| self.contains(*id)) {
            return None;
        }

        for id in members {
            self.droppables.remove(*id);
        }
        self.insert_droppable(Droppable::new(kind, region)).ok()
    }
}
