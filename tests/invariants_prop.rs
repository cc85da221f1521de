//! Property tests for grid invariants.
//!
//! Invariants covered:
//! - No two live droppables share a cell, whatever gets inserted, moved,
//!   dropped, merged or crushed.
//! - Every live droppable lies inside the grid.
//! - Cells outside the grid are never free.
//! - After `update_big_gems` a further merge pass finds nothing to merge.

use proptest::prelude::*;
use tui_diamonds::core::{
    Droppable, DroppableKind, GameConfig, GameSession, Grid, QueuedReactor, ScoreCalculator, SimpleRng,
    StoneCalculator,
};
use tui_diamonds::types::{Cell, Direction, GameAction, GemColor, Region};

fn assert_no_overlap(grid: &Grid) {
    let regions: Vec<Region> = grid.droppables().iter().map(|d| d.region()).collect();
    for (i, a) in regions.iter().enumerate() {
        for b in &regions[i + 1..] {
            assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
        }
    }
}

fn assert_inside(grid: &Grid) {
    for droppable in grid.droppables() {
        for cell in droppable.region().cells() {
            assert!(grid.is_valid_cell(cell), "{cell:?} of {} is outside", droppable.id());
        }
    }
}

fn kind_strategy() -> impl Strategy<Value = DroppableKind> {
    let color = (0u32..5).prop_map(GemColor::from_index);
    prop_oneof![
        6 => color.clone().prop_map(DroppableKind::Gem),
        1 => color.clone().prop_map(DroppableKind::Chest),
        1 => Just(DroppableKind::Flash),
        1 => color.prop_map(|color| DroppableKind::Stone { color, turns_left: 2 }),
    ]
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

proptest! {
    #[test]
    fn cells_outside_are_never_free(
        rows in 2u16..20,
        columns in 1u16..12,
        row in 0u16..64,
        column in 0u16..64,
    ) {
        let grid = Grid::new(&GameConfig { rows, columns, ..GameConfig::default() });
        let cell = Cell::new(row, column);
        if row >= rows || column >= columns {
            prop_assert!(!grid.is_valid_cell(cell));
            prop_assert!(!grid.is_cell_free(cell));
        } else {
            prop_assert!(grid.is_cell_free(cell));
        }
    }

    #[test]
    fn random_inserts_moves_and_settling_never_overlap(
        pieces in prop::collection::vec((0u16..12, 0u16..6, kind_strategy(), any::<bool>()), 1..60),
        moves in prop::collection::vec((0usize..60, direction_strategy()), 0..80),
        ticks in 0usize..200,
    ) {
        let mut grid = Grid::new(&GameConfig {
            rows: 12,
            columns: 6,
            normal_gravity: 5,
            ..GameConfig::default()
        });
        let mut ids = Vec::new();
        for (row, column, kind, falling) in pieces {
            let mut droppable = Droppable::new(kind, Region::single(Cell::new(row, column)));
            if falling {
                droppable = droppable.falling();
            }
            if let Ok(id) = grid.insert_droppable(droppable) {
                ids.push(id);
            }
        }
        assert_no_overlap(&grid);

        for (index, direction) in moves {
            if let Some(id) = ids.get(index % ids.len().max(1)) {
                if grid.contains(*id) {
                    prop_assert!(grid.translate_droppable(*id, direction).is_ok());
                }
            }
        }
        assert_no_overlap(&grid);
        assert_inside(&grid);

        let (mut score, mut stones) = (ScoreCalculator::new(), StoneCalculator::new());
        for _ in 0..ticks {
            grid.update_falls();
            assert_no_overlap(&grid);
            if !grid.is_anything_falling() {
                grid.update_big_gems();
                prop_assert!(!grid.update_merge_all_big_gems());
                grid.update_crushes(&mut score, &mut stones);
                assert_no_overlap(&grid);
            }
        }
        assert_inside(&grid);
    }

    #[test]
    fn fusing_gem_rectangles_keeps_every_cell_covered(
        top in 0u16..6,
        left in 0u16..3,
        height in 2u16..6,
        width in 2u16..4,
    ) {
        let mut grid = Grid::new(&GameConfig { rows: 12, columns: 6, ..GameConfig::default() });
        let region = Region::new(top, left, height, width);
        for cell in region.cells() {
            grid.insert_droppable(Droppable::gem(GemColor::Emerald, cell)).unwrap();
        }
        grid.update_big_gems();

        prop_assert!(!grid.update_merge_all_big_gems());
        assert_no_overlap(&grid);
        let covered: u32 = grid.droppables().iter().map(|d| d.region().cell_count()).sum();
        prop_assert_eq!(covered, region.cell_count());
    }

    #[test]
    fn session_rollout_keeps_grid_consistent(
        seed in any::<u32>(),
        actions in prop::collection::vec(0u8..5, 1..400),
    ) {
        let config = GameConfig { rows: 12, columns: 6, ..GameConfig::default() };
        let mut session = GameSession::new(config, Box::new(SimpleRng::new(seed)), 0);
        let mut reactor = QueuedReactor::new();
        let mut now = 0;
        let mut last_score = 0;

        for action in actions {
            now += 16;
            reactor.push(match action {
                0 => GameAction::MoveLeft,
                1 => GameAction::MoveRight,
                2 => GameAction::RotateCw,
                3 => GameAction::RotateCcw,
                _ => GameAction::SoftDrop,
            });
            session.react_to_input(&mut reactor, now);
            session.tick(now);

            let grid = session.controller().grid();
            assert_no_overlap(grid);
            assert_inside(grid);
            prop_assert!(session.score().score() >= last_score);
            last_score = session.score().score();
            if session.is_game_over() {
                break;
            }
        }
    }
}

fn valid_gravity_strategy() -> impl Strategy<Value = (u16, u16, u16)> {
    (1u16..=32).prop_flat_map(|normal| {
        let max_multiplier = 32 / normal;
        (Just(normal), 1..=max_multiplier, 1..=max_multiplier)
    })
}

proptest! {
    #[test]
    fn gravity_levels_follow_the_config(
        (normal, multiplier, strongest) in valid_gravity_strategy(),
        override_gravity in 1u16..=32,
    ) {
        let config = GameConfig {
            normal_gravity: normal,
            gravity_multiplier: multiplier,
            strongest_gravity_multiplier: strongest,
            ..GameConfig::default()
        };
        prop_assert!(config.validate().is_ok());
        let mut grid = Grid::new(&config);
        prop_assert_eq!(grid.get_actual_gravity(), normal);

        grid.set_stronger_gravity();
        prop_assert_eq!(grid.get_actual_gravity(), normal * multiplier);
        grid.set_strongest_gravity();
        prop_assert_eq!(grid.get_actual_gravity(), normal * strongest);
        grid.set_gravity(override_gravity);
        prop_assert_eq!(grid.get_actual_gravity(), override_gravity);
        grid.set_normal_gravity();
        prop_assert_eq!(grid.get_actual_gravity(), normal);
    }
}
