//! Crush engine.
//!
//! Crushes start from special pieces only: a landed flash wipes out the color
//! it sits on, a landed chest destroys the connected group of its color it
//! touches. The grid runs every piece through [`start_crush`] once per
//! priority, absolute first.

use crate::droppable::{Droppable, DroppableId, DroppableKind};
use crate::grid::Grid;
use crate::scoring::{ScoreAccumulator, StoneAccumulator};
use crate::types::{Direction, GemColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrushPriority {
    Absolute,
    Normal,
}

/// Order in which priorities are resolved within one `update_crushes`.
pub const CRUSH_PRIORITIES: [CrushPriority; 2] = [CrushPriority::Absolute, CrushPriority::Normal];

/// Start a crush from `id` if it crushes with `priority` and has landed.
///
/// Returns the number of droppables removed from the grid.
pub(crate) fn start_crush(
    grid: &mut Grid,
    id: DroppableId,
    priority: CrushPriority,
    score: &mut dyn ScoreAccumulator,
    stones: &mut dyn StoneAccumulator,
) -> usize {
    let Some(droppable) = grid.droppable(id) else {
        return 0;
    };
    if droppable.is_falling() || droppable.crush_priority() != Some(priority) {
        return 0;
    }

    let victims = match droppable.kind() {
        DroppableKind::Flash => flash_victims(grid, droppable),
        DroppableKind::Chest(color) => chest_victims(grid, droppable, color),
        _ => Vec::new(),
    };
    if victims.is_empty() {
        return 0;
    }
    remove_victims(grid, &victims, score, stones)
}

/// The flash itself plus every settled piece of the color below it.
fn flash_victims(grid: &Grid, flash: &Droppable) -> Vec<DroppableId> {
    let target = flash
        .region()
        .border(Direction::Down)
        .and_then(|below| {
            below
                .cells()
                .find_map(|cell| grid.get_droppable_at(cell).and_then(Droppable::color))
        });

    let mut victims = vec![flash.id()];
    if let Some(color) = target {
        victims.extend(
            grid.droppables()
                .iter()
                .filter(|d| !d.is_falling() && d.color() == Some(color))
                .map(Droppable::id),
        );
    }
    victims
}

/// Connected settled group of `color` reachable from the chest, plus the
/// settled stones bordering it. Empty when the chest touches nothing of its color.
fn chest_victims(grid: &Grid, chest: &Droppable, color: GemColor) -> Vec<DroppableId> {
    let joins = |d: &Droppable| !d.is_falling() && d.kind().is_gem_like() && d.color() == Some(color);

    let mut group = vec![chest.id()];
    let mut index = 0;
    while let Some(&current) = group.get(index) {
        index += 1;
        for neighbour in neighbours(grid, current) {
            if !group.contains(&neighbour) && grid.droppable(neighbour).is_some_and(joins) {
                group.push(neighbour);
            }
        }
    }
    if group.len() == 1 {
        return Vec::new();
    }

    let mut stones = Vec::new();
    for member in &group {
        for neighbour in neighbours(grid, *member) {
            let is_stone = grid.droppable(neighbour).is_some_and(|d| {
                !d.is_falling() && matches!(d.kind(), DroppableKind::Stone { .. })
            });
            if is_stone && !stones.contains(&neighbour) {
                stones.push(neighbour);
            }
        }
    }
    group.extend(stones);
    group
}

fn neighbours(grid: &Grid, id: DroppableId) -> Vec<DroppableId> {
    let Some(droppable) = grid.droppable(id) else {
        return Vec::new();
    };
    let region = droppable.region();
    let mut found = Vec::new();
    for direction in Direction::ALL {
        if let Some(border) = region.border(direction) {
            for other in grid.get_droppables_in_area(&border) {
                if !found.contains(&other) {
                    found.push(other);
                }
            }
        }
    }
    found
}

fn remove_victims(
    grid: &mut Grid,
    victims: &[DroppableId],
    score: &mut dyn ScoreAccumulator,
    stones: &mut dyn StoneAccumulator,
) -> usize {
    let mut removed = 0;
    let mut crushed_gems = 0;
    for id in victims {
        let Some(victim) = grid.remove_droppable(*id) else {
            continue;
        };
        removed += 1;
        if victim.kind().is_gem_like() {
            crushed_gems += victim.region().cell_count();
            score.add_score(victim.score());
        }
    }
    stones.on_crush(crushed_gems);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::scoring::{ScoreCalculator, StoneCalculator};
    use crate::types::Cell;

    fn grid() -> Grid {
        Grid::new(&GameConfig {
            rows: 6,
            columns: 4,
            ..GameConfig::default()
        })
    }

    #[test]
    fn lonely_chest_does_nothing() {
        let mut grid = grid();
        let chest = grid
            .insert_droppable(Droppable::chest(GemColor::Ruby, Cell::new(5, 0)))
            .unwrap();
        grid.insert_droppable(Droppable::gem(GemColor::Topaz, Cell::new(5, 1)))
            .unwrap();

        let (mut score, mut stones) = (ScoreCalculator::new(), StoneCalculator::new());
        let removed = start_crush(&mut grid, chest, CrushPriority::Normal, &mut score, &mut stones);
        assert_eq!(removed, 0);
        assert_eq!(stones.crush_events(), 0);
    }

    #[test]
    fn chest_only_crushes_with_normal_priority() {
        let mut grid = grid();
        let chest = grid
            .insert_droppable(Droppable::chest(GemColor::Ruby, Cell::new(5, 0)))
            .unwrap();
        grid.insert_droppable(Droppable::gem(GemColor::Ruby, Cell::new(5, 1)))
            .unwrap();

        let (mut score, mut stones) = (ScoreCalculator::new(), StoneCalculator::new());
        let removed = start_crush(&mut grid, chest, CrushPriority::Absolute, &mut score, &mut stones);
        assert_eq!(removed, 0);
        let removed = start_crush(&mut grid, chest, CrushPriority::Normal, &mut score, &mut stones);
        assert_eq!(removed, 2);
        assert_eq!(score.pending(), 2 * GemColor::Ruby.score());
    }
}
