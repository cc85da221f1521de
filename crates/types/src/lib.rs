//! Core types module - shared value types and constants
//!
//! This crate defines the fundamental value types used throughout the game.
//! All types are plain data with no external dependencies, so they can be
//! used by the simulation core, the input layer and the terminal renderer alike.
//!
//! # Coordinates
//!
//! - **Rows** grow downwards: row 0 is the top of the grid
//! - **Columns** grow to the right: column 0 is the left edge
//! - Coordinates are unsigned; a shift past the top or left edge yields no cell
//!
//! # Pixel Space
//!
//! Every cell is `CELL_SIZE_IN_PIXELS` pixels tall. Droppables keep a vertical
//! pixel position in grid-local space so falls can be animated smoothly while
//! their [`Region`] stays snapped to whole cells.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `DEFAULT_NEW_GEM_DELAY_MS` | 500 | Wait before a new gem pair appears |
//! | `DEFAULT_DAS_MS` | 170 | Delay before horizontal auto-repeat |
//! | `DEFAULT_ARR_MS` | 60 | Interval between horizontal repeats |
//!
//! # Examples
//!
//! ```
//! use tui_diamonds_types::{Cell, Direction, Region};
//!
//! let cell = Cell::new(3, 2);
//! assert_eq!(cell.shifted(Direction::Down), Some(Cell::new(4, 2)));
//! assert_eq!(Cell::new(0, 0).shifted(Direction::Up), None);
//!
//! let region = Region::new(3, 2, 2, 2);
//! assert!(region.contains_cell(Cell::new(4, 3)));
//! assert_eq!(region.origin(), cell);
//! ```

/// Height of one grid cell in pixels
pub const CELL_SIZE_IN_PIXELS: u16 = 32;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default number of grid rows
pub const DEFAULT_ROWS: u16 = 14;

/// Default number of grid columns
pub const DEFAULT_COLUMNS: u16 = 8;

/// Largest grid accepted from a settings file, in rows and in columns
pub const MAX_GRID_SIZE: u16 = 1024;

/// Default fall speed in pixels per tick
pub const DEFAULT_NORMAL_GRAVITY: u16 = 2;

/// Default multiplier applied while the player pushes the pair down
pub const DEFAULT_GRAVITY_MULTIPLIER: u16 = 4;

/// Default multiplier applied once the player lost control of the pair
pub const DEFAULT_STRONGEST_GRAVITY_MULTIPLIER: u16 = 16;

/// Default wait between two gem pairs in milliseconds
pub const DEFAULT_NEW_GEM_DELAY_MS: u64 = 500;

/// Default column where new pairs appear
pub const DEFAULT_SPAWN_COLUMN: u16 = 4;

/// Default number of turns a stone stays a stone
pub const DEFAULT_STONE_TURNS: u8 = 3;

/// Default chance (percent) for a pair member to be a chest
pub const DEFAULT_CHEST_PROBABILITY: u8 = 15;

/// Default chance (percent) for a pair member to be a flashing gem
pub const DEFAULT_FLASH_PROBABILITY: u8 = 2;

/// DAS (Delayed Auto Shift) delay in milliseconds
pub const DEFAULT_DAS_MS: u32 = 170;

/// ARR (Auto Repeat Rate) in milliseconds
pub const DEFAULT_ARR_MS: u32 = 60;

/// Number of crushed gems converted into one stone for the opponent
pub const STONE_DIVISOR: u32 = 4;


/// A grid coordinate
///
/// Cells are immutable value types compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: u16,
    pub column: u16,
}

impl Cell {
    pub const fn new(row: u16, column: u16) -> Self {
        Self { row, column }
    }

    /// The neighbouring cell in `direction`, or `None` past the top/left edge.
    pub fn shifted(self, direction: Direction) -> Option<Self> {
        let row = self.row.checked_add_signed(direction.row_delta())?;
        let column = self.column.checked_add_signed(direction.column_delta())?;
        Some(Self::new(row, column))
    }
}

/// Axis-aligned rectangle of cells (bounds inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    top_row: u16,
    left_column: u16,
    bottom_row: u16,
    right_column: u16,
}

impl Region {
    /// Create a region from its top-left cell and its size in cells.
    ///
    /// Zero sizes are raised to one: a region always covers at least one cell.
    /// A region reaching past `u16::MAX` is cut at the coordinate limit.
    pub fn new(top_row: u16, left_column: u16, height: u16, width: u16) -> Self {
        Self {
            top_row,
            left_column,
            bottom_row: top_row.saturating_add(height.max(1) - 1),
            right_column: left_column.saturating_add(width.max(1) - 1),
        }
    }

    /// One-cell region.
    pub fn single(cell: Cell) -> Self {
        Self::new(cell.row, cell.column, 1, 1)
    }

    pub fn top_row(&self) -> u16 {
        self.top_row
    }

    pub fn bottom_row(&self) -> u16 {
        self.bottom_row
    }

    pub fn left_column(&self) -> u16 {
        self.left_column
    }

    pub fn right_column(&self) -> u16 {
        self.right_column
    }

    /// Top-left cell.
    pub fn origin(&self) -> Cell {
        Cell::new(self.top_row, self.left_column)
    }

    pub fn height(&self) -> u16 {
        self.bottom_row - self.top_row + 1
    }

    pub fn width(&self) -> u16 {
        self.right_column - self.left_column + 1
    }

    pub fn cell_count(&self) -> u32 {
        u32::from(self.height()) * u32::from(self.width())
    }

    pub fn contains_cell(&self, cell: Cell) -> bool {
        (self.top_row..=self.bottom_row).contains(&cell.row)
            && (self.left_column..=self.right_column).contains(&cell.column)
    }

    pub fn intersects(&self, other: &Region) -> bool {
        self.top_row <= other.bottom_row
            && other.top_row <= self.bottom_row
            && self.left_column <= other.right_column
            && other.left_column <= self.right_column
    }

    /// Same size, origin moved to `cell`.
    pub fn moved_to(&self, cell: Cell) -> Self {
        Self::new(cell.row, cell.column, self.height(), self.width())
    }

    /// Same size, shifted one cell in `direction`.
    pub fn shifted(&self, direction: Direction) -> Option<Self> {
        self.origin()
            .shifted(direction)
            .map(|origin| self.moved_to(origin))
    }

    /// Smallest region covering both `self` and `other`.
    pub fn union(&self, other: &Region) -> Self {
        Self {
            top_row: self.top_row.min(other.top_row),
            left_column: self.left_column.min(other.left_column),
            bottom_row: self.bottom_row.max(other.bottom_row),
            right_column: self.right_column.max(other.right_column),
        }
    }

    /// The strip of cells touching this region on the `direction` side.
    pub fn border(&self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => self
                .top_row
                .checked_sub(1)
                .map(|row| Self::new(row, self.left_column, 1, self.width())),
            Direction::Down => self
                .bottom_row
                .checked_add(1)
                .map(|row| Self::new(row, self.left_column, 1, self.width())),
            Direction::Left => self
                .left_column
                .checked_sub(1)
                .map(|column| Self::new(self.top_row, column, self.height(), 1)),
            Direction::Right => self
                .right_column
                .checked_add(1)
                .map(|column| Self::new(self.top_row, column, self.height(), 1)),
        }
    }

    /// All cells, column by column, each column scanned top to bottom.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let rows = self.top_row..=self.bottom_row;
        (self.left_column..=self.right_column)
            .flat_map(move |column| rows.clone().map(move |row| Cell::new(row, column)))
    }
}

/// Movement direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn row_delta(&self) -> i16 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
            Direction::Left | Direction::Right => 0,
        }
    }

    pub fn column_delta(&self) -> i16 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Up | Direction::Down => 0,
        }
    }

    /// Next direction clockwise (Up → Right → Down → Left → Up).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_diamonds_types::Direction;
    ///
    /// assert_eq!(Direction::Up.rotate_cw(), Direction::Right);
    /// assert_eq!(Direction::Left.rotate_cw(), Direction::Up);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// Next direction counter-clockwise.
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }
}

/// The five gem colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GemColor {
    Diamond,
    Ruby,
    Sapphire,
    Emerald,
    Topaz,
}

impl GemColor {
    pub const ALL: [GemColor; 5] = [
        GemColor::Diamond,
        GemColor::Ruby,
        GemColor::Sapphire,
        GemColor::Emerald,
        GemColor::Topaz,
    ];

    /// Color for a random index (wraps around).
    pub fn from_index(index: u32) -> Self {
        Self::ALL[index as usize % Self::ALL.len()]
    }

    /// Points for crushing one cell of this color.
    pub fn score(&self) -> u32 {
        match self {
            GemColor::Diamond => 50,
            GemColor::Ruby => 20,
            GemColor::Sapphire => 20,
            GemColor::Emerald => 15,
            GemColor::Topaz => 10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GemColor::Diamond => "diamond",
            GemColor::Ruby => "ruby",
            GemColor::Sapphire => "sapphire",
            GemColor::Emerald => "emerald",
            GemColor::Topaz => "topaz",
        }
    }
}

/// Player actions on the gem pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift the pair one column left
    MoveLeft,
    /// Shift the pair one column right
    MoveRight,
    /// Push the pair down with stronger gravity
    SoftDrop,
    /// Orbit the slave gem clockwise around the pivot
    RotateCw,
    /// Orbit the slave gem counter-clockwise around the pivot
    RotateCcw,
    /// Start a new game
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_diamonds_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Restart => "restart",
        }
    }
}
