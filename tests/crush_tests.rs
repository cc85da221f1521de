//! Crush tests - chests, flashes, priorities and chain scoring

use tui_diamonds::core::{
    Droppable, DroppableKind, GameConfig, Grid, ScoreAccumulator, ScoreCalculator, StoneAccumulator,
    StoneCalculator,
};
use tui_diamonds::types::{Cell, GemColor, Region};

/// Records every score accumulator call.
#[derive(Default)]
struct Recorder {
    added: Vec<u32>,
    closes: u32,
}

impl ScoreAccumulator for Recorder {
    fn add_score(&mut self, points: u32) {
        self.added.push(points);
    }

    fn close_crush(&mut self) {
        self.closes += 1;
    }
}

#[derive(Default)]
struct StoneRecorder {
    crushes: Vec<u32>,
}

impl StoneAccumulator for StoneRecorder {
    fn on_crush(&mut self, crushed_gems: u32) {
        self.crushes.push(crushed_gems);
    }
}

fn grid() -> Grid {
    Grid::new(&GameConfig {
        rows: 6,
        columns: 5,
        ..GameConfig::default()
    })
}

fn insert(grid: &mut Grid, droppable: Droppable) {
    grid.insert_droppable(droppable).unwrap();
}

#[test]
fn test_nothing_to_crush_still_closes_once() {
    let mut grid = grid();
    insert(&mut grid, Droppable::gem(GemColor::Ruby, Cell::new(5, 0)));

    let mut score = Recorder::default();
    let mut stones = StoneRecorder::default();
    assert_eq!(grid.update_crushes(&mut score, &mut stones), 0);
    assert_eq!(score.closes, 1);
    assert!(score.added.is_empty());
    assert!(stones.crushes.is_empty());
}

#[test]
fn test_chest_crushes_connected_group_of_its_color() {
    let mut grid = grid();
    insert(&mut grid, Droppable::chest(GemColor::Ruby, Cell::new(5, 0)));
    insert(&mut grid, Droppable::gem(GemColor::Ruby, Cell::new(5, 1)));
    insert(&mut grid, Droppable::gem(GemColor::Ruby, Cell::new(4, 1)));
    insert(&mut grid, Droppable::big_gem(GemColor::Ruby, Region::new(2, 1, 2, 2)));
    // same color but not connected
    insert(&mut grid, Droppable::gem(GemColor::Ruby, Cell::new(5, 4)));
    insert(&mut grid, Droppable::gem(GemColor::Topaz, Cell::new(5, 2)));

    let mut score = ScoreCalculator::new();
    let mut stones = StoneCalculator::new();
    let crushed = grid.update_crushes(&mut score, &mut stones);

    assert_eq!(crushed, 4);
    assert_eq!(grid.get_number_of_droppables(), 2);
    assert!(!grid.is_cell_free(Cell::new(5, 4)));
    assert!(!grid.is_cell_free(Cell::new(5, 2)));
    // chest + 2 gems + 4-cell big gem
    assert_eq!(score.score(), u64::from(GemColor::Ruby.score() * 7));
    assert_eq!(stones.crushed_gems(), 7);
    assert_eq!(stones.crush_events(), 1);
}

#[test]
fn test_chest_breaks_adjacent_stones() {
    let mut grid = grid();
    insert(&mut grid, Droppable::chest(GemColor::Emerald, Cell::new(5, 0)));
    insert(&mut grid, Droppable::gem(GemColor::Emerald, Cell::new(5, 1)));
    insert(&mut grid, Droppable::stone(GemColor::Ruby, 3, Cell::new(5, 2)));
    insert(&mut grid, Droppable::stone(GemColor::Ruby, 3, Cell::new(5, 3)));

    let mut score = ScoreCalculator::new();
    let mut stones = StoneCalculator::new();
    assert_eq!(grid.update_crushes(&mut score, &mut stones), 3);
    assert!(grid.is_cell_free(Cell::new(5, 2)));
    assert!(!grid.is_cell_free(Cell::new(5, 3)));
    assert_eq!(stones.crushed_gems(), 2);
}

#[test]
fn test_falling_chest_waits_until_it_lands() {
    let mut grid = grid();
    insert(&mut grid, Droppable::chest(GemColor::Ruby, Cell::new(4, 0)).falling());
    insert(&mut grid, Droppable::gem(GemColor::Ruby, Cell::new(5, 0)));

    let mut score = ScoreCalculator::new();
    let mut stones = StoneCalculator::new();
    assert_eq!(grid.update_crushes(&mut score, &mut stones), 0);
    assert_eq!(grid.get_number_of_droppables(), 2);
}

#[test]
fn test_flash_crushes_every_piece_of_the_color_below() {
    let mut grid = grid();
    insert(&mut grid, Droppable::gem(GemColor::Sapphire, Cell::new(5, 0)));
    insert(&mut grid, Droppable::flash(Cell::new(4, 0)));
    insert(&mut grid, Droppable::gem(GemColor::Sapphire, Cell::new(5, 3)));
    insert(&mut grid, Droppable::stone(GemColor::Sapphire, 2, Cell::new(5, 4)));
    insert(&mut grid, Droppable::gem(GemColor::Diamond, Cell::new(5, 1)));

    let mut score = ScoreCalculator::new();
    let mut stones = StoneCalculator::new();
    assert_eq!(grid.update_crushes(&mut score, &mut stones), 4);
    assert_eq!(grid.get_number_of_droppables(), 1);
    assert_eq!(
        grid.get_droppable_at(Cell::new(5, 1)).map(|d| d.kind()),
        Some(DroppableKind::Gem(GemColor::Diamond))
    );
    assert_eq!(score.score(), u64::from(GemColor::Sapphire.score() * 2));
}

#[test]
fn test_flash_on_floor_only_removes_itself() {
    let mut grid = grid();
    insert(&mut grid, Droppable::flash(Cell::new(5, 2)));
    insert(&mut grid, Droppable::gem(GemColor::Topaz, Cell::new(5, 3)));

    let mut score = Recorder::default();
    let mut stones = StoneRecorder::default();
    assert_eq!(grid.update_crushes(&mut score, &mut stones), 1);
    assert_eq!(grid.get_number_of_droppables(), 1);
    assert_eq!(stones.crushes, vec![0]);
}

#[test]
fn test_absolute_priority_crushes_before_normal() {
    let mut grid = grid();
    // the chest comes first in list order, but the flash resolves first
    insert(&mut grid, Droppable::chest(GemColor::Ruby, Cell::new(5, 0)));
    insert(&mut grid, Droppable::gem(GemColor::Ruby, Cell::new(5, 1)));
    insert(&mut grid, Droppable::flash(Cell::new(4, 1)));

    let mut score = Recorder::default();
    let mut stones = StoneRecorder::default();
    let crushed = grid.update_crushes(&mut score, &mut stones);

    assert_eq!(crushed, 3);
    assert_eq!(grid.get_number_of_droppables(), 0);
    // one crush event: the flash took the chest and the gem
    assert_eq!(stones.crushes, vec![2]);
    assert_eq!(score.closes, 1);
    assert_eq!(score.added.len(), 2);
}

#[test]
fn test_close_crush_once_per_call() {
    let mut grid = grid();
    insert(&mut grid, Droppable::chest(GemColor::Topaz, Cell::new(5, 0)));
    insert(&mut grid, Droppable::gem(GemColor::Topaz, Cell::new(5, 1)));
    insert(&mut grid, Droppable::chest(GemColor::Emerald, Cell::new(5, 3)));
    insert(&mut grid, Droppable::gem(GemColor::Emerald, Cell::new(5, 4)));

    let mut score = Recorder::default();
    let mut stones = StoneRecorder::default();
    assert_eq!(grid.update_crushes(&mut score, &mut stones), 4);
    assert_eq!(stones.crushes, vec![2, 2]);
    assert_eq!(score.closes, 1);

    grid.update_crushes(&mut score, &mut stones);
    assert_eq!(score.closes, 2);
}

#[test]
fn test_chain_grows_over_consecutive_crush_batches() {
    let mut grid = grid();
    let mut score = ScoreCalculator::new();
    let mut stones = StoneCalculator::new();

    insert(&mut grid, Droppable::chest(GemColor::Topaz, Cell::new(5, 0)));
    insert(&mut grid, Droppable::gem(GemColor::Topaz, Cell::new(5, 1)));
    grid.update_crushes(&mut score, &mut stones);
    let first = u64::from(GemColor::Topaz.score() * 2);
    assert_eq!(score.score(), first);

    insert(&mut grid, Droppable::chest(GemColor::Topaz, Cell::new(5, 0)));
    insert(&mut grid, Droppable::gem(GemColor::Topaz, Cell::new(5, 1)));
    grid.update_crushes(&mut score, &mut stones);
    assert_eq!(score.chain(), 2);
    assert_eq!(score.score(), first + first * 2);

    grid.update_crushes(&mut score, &mut stones);
    assert_eq!(score.chain(), 0);
    assert_eq!(score.best_chain(), 2);
}
