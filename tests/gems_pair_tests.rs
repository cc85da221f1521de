//! Gems pair tests - moving and rotating the pair under control

use tui_diamonds::core::{Droppable, GameConfig, GridController, SimpleRng};
use tui_diamonds::types::{Cell, Direction, GameAction, GemColor};

fn spawned(columns: u16, spawn_column: u16) -> GridController {
    let config = GameConfig {
        rows: 12,
        columns,
        spawn_column,
        ..GameConfig::default()
    };
    let mut controller = GridController::new(config, Box::new(SimpleRng::new(5)));
    controller.insert_new_gems_pair().unwrap();
    controller
}

fn origins(controller: &GridController) -> (Cell, Cell) {
    let pair = controller.gems_pair();
    let grid = controller.grid();
    let pivot = grid.droppable(pair.pivot().unwrap()).unwrap().region().origin();
    let slave = grid.droppable(pair.slave().unwrap()).unwrap().region().origin();
    (pivot, slave)
}

#[test]
fn test_slave_orbits_pivot_clockwise() {
    let mut controller = spawned(6, 2);
    let expected = [
        (Direction::Right, Cell::new(1, 3)),
        (Direction::Down, Cell::new(2, 2)),
        (Direction::Left, Cell::new(1, 1)),
        (Direction::Up, Cell::new(0, 2)),
    ];
    for (orientation, slave) in expected {
        assert!(controller.apply_action(GameAction::RotateCw));
        assert_eq!(controller.gems_pair().orientation(), orientation);
        assert_eq!(origins(&controller), (Cell::new(1, 2), slave));
    }
}

#[test]
fn test_counter_clockwise_is_the_inverse() {
    let mut controller = spawned(6, 2);
    controller.apply_action(GameAction::RotateCcw);
    assert_eq!(controller.gems_pair().orientation(), Direction::Left);
    controller.apply_action(GameAction::RotateCw);
    assert_eq!(origins(&controller), (Cell::new(1, 2), Cell::new(0, 2)));
}

#[test]
fn test_rotation_blocked_by_wall() {
    let mut controller = spawned(6, 0);
    assert!(!controller.apply_action(GameAction::RotateCcw));
    assert_eq!(controller.gems_pair().orientation(), Direction::Up);
    assert_eq!(origins(&controller), (Cell::new(1, 0), Cell::new(0, 0)));
}

#[test]
fn test_rotation_blocked_by_gem() {
    let mut controller = spawned(6, 2);
    controller
        .grid_mut()
        .insert_droppable(Droppable::gem(GemColor::Ruby, Cell::new(1, 3)))
        .unwrap();
    assert!(!controller.apply_action(GameAction::RotateCw));
    assert_eq!(controller.gems_pair().orientation(), Direction::Up);
}

#[test]
fn test_move_stops_at_walls() {
    let mut controller = spawned(4, 1);
    assert!(controller.apply_action(GameAction::MoveLeft));
    assert!(!controller.apply_action(GameAction::MoveLeft));
    assert_eq!(origins(&controller), (Cell::new(1, 0), Cell::new(0, 0)));

    for _ in 0..3 {
        controller.apply_action(GameAction::MoveRight);
    }
    assert!(!controller.apply_action(GameAction::MoveRight));
    assert_eq!(origins(&controller), (Cell::new(1, 3), Cell::new(0, 3)));
}

#[test]
fn test_horizontal_pair_moves_as_one() {
    let mut controller = spawned(6, 2);
    controller.apply_action(GameAction::RotateCcw);
    assert!(controller.apply_action(GameAction::MoveLeft));
    assert_eq!(origins(&controller), (Cell::new(1, 1), Cell::new(1, 0)));
    assert!(!controller.apply_action(GameAction::MoveLeft));
    assert!(controller.apply_action(GameAction::MoveRight));
    assert_eq!(origins(&controller), (Cell::new(1, 2), Cell::new(1, 1)));
}

#[test]
fn test_landed_pair_ignores_actions() {
    let mut controller = spawned(6, 2);
    controller.grid_mut().set_gravity(32);
    while !controller.gems_pair().is_landed(controller.grid()) {
        controller.grid_mut().update_falls();
    }
    let before = origins(&controller);
    assert!(!controller.apply_action(GameAction::MoveLeft));
    assert!(!controller.apply_action(GameAction::RotateCw));
    assert_eq!(origins(&controller), before);
}

#[test]
fn test_clear_releases_control() {
    let mut controller = spawned(6, 2);
    controller.gems_pair_mut().clear();
    assert!(controller.gems_pair().is_empty());
    assert!(!controller.apply_action(GameAction::MoveLeft));
}
