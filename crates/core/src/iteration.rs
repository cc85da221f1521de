//! Single-pass visitors run by [`Grid::run_iteration`].
//!
//! Each pass sees a snapshot of the droppable list and may restructure the
//! live grid; every structural change goes through [`Grid::fuse`] so a pass
//! can never leave two pieces on one cell.

use crate::droppable::{Droppable, DroppableId, DroppableKind};
use crate::grid::Grid;
use crate::types::{Cell, Direction, GemColor, Region};

/// One operation applied to each droppable of a snapshot, in list order.
pub trait DroppableIteration {
    fn execute_on(&mut self, grid: &mut Grid, id: DroppableId);
}

/// Turns a 2x2 block of settled same-color gems into a big gem.
///
/// The visited gem has to be the top-left corner of the block.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateNewBigGems;

impl DroppableIteration for CreateNewBigGems {
    fn execute_on(&mut self, grid: &mut Grid, id: DroppableId) {
        let Some(gem) = grid.droppable(id) else {
            return;
        };
        let DroppableKind::Gem(color) = gem.kind() else {
            return;
        };
        if gem.is_falling() {
            return;
        }

        let origin = gem.region().origin();
        let block = Region::new(origin.row, origin.column, 2, 2);
        let Some(members) = settled_gems_covering(grid, &block, color) else {
            return;
        };
        grid.fuse(&members, DroppableKind::BigGem(color), block);
    }
}

/// Grows a big gem over full adjacent rows or columns of settled gems of its color.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendIteration;

impl DroppableIteration for ExtendIteration {
    fn execute_on(&mut self, grid: &mut Grid, id: DroppableId) {
        let mut current = id;
        'grow: loop {
            let Some(big) = grid.droppable(current) else {
                return;
            };
            let DroppableKind::BigGem(color) = big.kind() else {
                return;
            };
            if big.is_falling() {
                return;
            }

            let region = big.region();
            for direction in Direction::ALL {
                let Some(border) = region.border(direction) else {
                    continue;
                };
                let Some(mut members) = settled_gems_covering(grid, &border, color) else {
                    continue;
                };
                members.push(current);
                if let Some(grown) = grid.fuse(&members, DroppableKind::BigGem(color), region.union(&border)) {
                    current = grown;
                    continue 'grow;
                }
            }
            return;
        }
    }
}

/// Fuses pairs of adjacent big gems; remembers whether anything merged.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeBigGemsIteration {
    merged: bool,
}

impl MergeBigGemsIteration {
    /// True if this pass merged at least one pair, so another pass may be needed.
    pub fn has_not_yet_finished_merging(&self) -> bool {
        self.merged
    }
}

impl DroppableIteration for MergeBigGemsIteration {
    fn execute_on(&mut self, grid: &mut Grid, id: DroppableId) {
        let Some(big) = grid.droppable(id) else {
            return;
        };
        let DroppableKind::BigGem(color) = big.kind() else {
            return;
        };

        let region = big.region();
        let partner = Direction::ALL
            .iter()
            .filter_map(|direction| region.border(*direction))
            .flat_map(|border| grid.get_droppables_in_area(&border))
            .find(|other| {
                grid.droppable(*other)
                    .is_some_and(|other| big.can_merge_with(other))
            });
        let Some(partner) = partner else {
            return;
        };
        let Some(partner_region) = grid.droppable(partner).map(Droppable::region) else {
            return;
        };

        let fused = grid.fuse(
            &[id, partner],
            DroppableKind::BigGem(color),
            region.union(&partner_region),
        );
        self.merged |= fused.is_some();
    }
}

/// Ids of the settled single gems of `color` filling every cell of `region`,
/// or `None` if any cell is empty, out of bounds or holds something else.
fn settled_gems_covering(grid: &Grid, region: &Region, color: GemColor) -> Option<Vec<DroppableId>> {
    region
        .cells()
        .map(|cell: Cell| {
            grid.get_droppable_at(cell)
                .filter(|d| d.is_settled_gem_of(color))
                .map(Droppable::id)
        })
        .collect()
}
