//! Droppable module - the pieces that live on the grid
//!
//! A droppable occupies a [`Region`] of whole cells and keeps a vertical pixel
//! position in grid-local space so falls can be animated. The region and the
//! position are only changed through [`Grid`] movement calls, which keeps the
//! one-piece-per-cell invariant in a single place.
//!
//! Variants are modelled as a [`DroppableKind`] tag; capabilities (falling,
//! merging, crushing, transforming) dispatch on that tag.

use std::fmt;

use crate::crush::CrushPriority;
use crate::grid::Grid;
use crate::types::{Cell, Direction, GemColor, Region, CELL_SIZE_IN_PIXELS};

/// Animation frames advance every 100ms.
const ANIMATION_FRAME_MS: u64 = 100;

/// Identity of a droppable, assigned by the grid on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DroppableId(u32);

impl DroppableId {
    /// Identity of a droppable that was never inserted.
    pub const UNBOUND: Self = Self(0);

    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DroppableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a droppable is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DroppableKind {
    /// Plain single-cell gem
    Gem(GemColor),
    /// Compound gem covering a rectangle of at least 2x2 cells
    BigGem(GemColor),
    /// Crushes the connected group of its color it touches
    Chest(GemColor),
    /// Crushes every piece of the color it lands on
    Flash,
    /// Inert piece; turns into a gem after `turns_left` turns
    Stone { color: GemColor, turns_left: u8 },
}

impl DroppableKind {
    pub fn color(&self) -> Option<GemColor> {
        match *self {
            DroppableKind::Gem(color)
            | DroppableKind::BigGem(color)
            | DroppableKind::Chest(color)
            | DroppableKind::Stone { color, .. } => Some(color),
            DroppableKind::Flash => None,
        }
    }

    /// Which crush pass this piece starts a crush in, if any.
    pub fn crush_priority(&self) -> Option<CrushPriority> {
        match self {
            DroppableKind::Flash => Some(CrushPriority::Absolute),
            DroppableKind::Chest(_) => Some(CrushPriority::Normal),
            _ => None,
        }
    }

    /// Gems, big gems and chests join a chest crush of their color.
    pub fn is_gem_like(&self) -> bool {
        matches!(
            self,
            DroppableKind::Gem(_) | DroppableKind::BigGem(_) | DroppableKind::Chest(_)
        )
    }

    fn animation_frames(&self) -> u64 {
        match self {
            DroppableKind::Flash => 2,
            DroppableKind::Chest(_) => 4,
            _ => 1,
        }
    }
}

/// Outcome of one fall step, computed by the droppable and applied by the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallStep {
    /// New vertical pixel position in grid-local space.
    pub y: f32,
    /// Rows the region has to move down (0 or 1).
    pub rows_down: u16,
    pub falling: bool,
}

/// A grid-resident game piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Droppable {
    id: DroppableId,
    kind: DroppableKind,
    region: Region,
    y: f32,
    falling: bool,
    animation_frame: u8,
}

impl Droppable {
    pub fn new(kind: DroppableKind, region: Region) -> Self {
        Self {
            id: DroppableId::UNBOUND,
            kind,
            region,
            y: f32::from(region.top_row()) * f32::from(CELL_SIZE_IN_PIXELS),
            falling: false,
            animation_frame: 0,
        }
    }

    pub fn gem(color: GemColor, cell: Cell) -> Self {
        Self::new(DroppableKind::Gem(color), Region::single(cell))
    }

    pub fn chest(color: GemColor, cell: Cell) -> Self {
        Self::new(DroppableKind::Chest(color), Region::single(cell))
    }

    pub fn flash(cell: Cell) -> Self {
        Self::new(DroppableKind::Flash, Region::single(cell))
    }

    pub fn stone(color: GemColor, turns_left: u8, cell: Cell) -> Self {
        Self::new(
            DroppableKind::Stone { color, turns_left },
            Region::single(cell),
        )
    }

    pub fn big_gem(color: GemColor, region: Region) -> Self {
        Self::new(DroppableKind::BigGem(color), region)
    }

    /// Builder used by spawn logic: the piece enters the grid already falling.
    pub fn falling(mut self) -> Self {
        self.falling = true;
        self
    }

    pub fn id(&self) -> DroppableId {
        self.id
    }

    pub fn kind(&self) -> DroppableKind {
        self.kind
    }

    pub fn color(&self) -> Option<GemColor> {
        self.kind.color()
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Vertical position of the sprite top in grid-local pixels.
    pub fn position_y(&self) -> f32 {
        self.y
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    pub fn animation_frame(&self) -> u8 {
        self.animation_frame
    }

    pub fn crush_priority(&self) -> Option<CrushPriority> {
        self.kind.crush_priority()
    }

    /// Points for crushing this piece: color value per covered cell.
    pub fn score(&self) -> u32 {
        match self.kind {
            DroppableKind::Gem(color) | DroppableKind::BigGem(color) | DroppableKind::Chest(color) => {
                color.score() * self.region.cell_count()
            }
            DroppableKind::Flash | DroppableKind::Stone { .. } => 0,
        }
    }

    /// Settled single gem of `color`: the raw material of big gems.
    pub fn is_settled_gem_of(&self, color: GemColor) -> bool {
        !self.falling && self.kind == DroppableKind::Gem(color)
    }

    /// Two settled big gems of the same color fuse when they share a full edge.
    pub fn can_merge_with(&self, other: &Droppable) -> bool {
        if self.id == other.id || self.falling || other.falling {
            return false;
        }
        let (DroppableKind::BigGem(a), DroppableKind::BigGem(b)) = (self.kind, other.kind) else {
            return false;
        };
        if a != b {
            return false;
        }

        let (r, o) = (self.region, other.region);
        let stacked = r.left_column() == o.left_column()
            && r.right_column() == o.right_column()
            && (r.bottom_row() + 1 == o.top_row() || o.bottom_row() + 1 == r.top_row());
        let side_by_side = r.top_row() == o.top_row()
            && r.bottom_row() == o.bottom_row()
            && (r.right_column() + 1 == o.left_column() || o.right_column() + 1 == r.left_column());
        stacked || side_by_side
    }

    /// Compute one fall step against the current grid.
    ///
    /// The sprite advances by the grid gravity (at most one cell), limited by
    /// the floor and settled pieces below (aligned with the current row) and by
    /// falling pieces below (touching their sprite). A settled limit lands the
    /// piece; being held by a falling piece keeps it falling.
    pub fn fall_step(&self, grid: &Grid) -> FallStep {
        let cell_px = f32::from(CELL_SIZE_IN_PIXELS);
        let row_top = grid.get_row_upper_bound(self.region.top_row());
        let height_px = f32::from(self.region.height()) * cell_px;
        let gravity = f32::from(grid.get_actual_gravity().min(CELL_SIZE_IN_PIXELS));

        // no row below the coordinate limit: that is a floor too
        let Some(below) = self.region.border(Direction::Down) else {
            return self.landed_at(row_top);
        };
        let mut limit = row_top + cell_px;
        for cell in below.cells() {
            if !grid.is_valid_cell(cell) {
                return self.landed_at(row_top);
            }
            match grid.get_droppable_at(cell) {
                None => {}
                Some(other) if other.is_falling() => {
                    limit = limit.min(other.position_y() - height_px);
                }
                Some(_) => return self.landed_at(row_top),
            }
        }

        let y = (self.y + gravity).min(limit).max(self.y);
        let rows_down = if y >= row_top + cell_px { 1 } else { 0 };
        FallStep {
            y,
            rows_down,
            falling: true,
        }
    }

    fn landed_at(&self, row_top: f32) -> FallStep {
        FallStep {
            y: row_top,
            rows_down: 0,
            falling: false,
        }
    }

    /// Per-tick visual bookkeeping; never touches the region.
    pub(crate) fn update(&mut self, now_ms: u64) {
        let frames = self.kind.animation_frames();
        self.animation_frame = ((now_ms / ANIMATION_FRAME_MS) % frames) as u8;
    }

    /// Age a stone by one turn; a stone with no turns left becomes a gem.
    pub(crate) fn update_transformation(&mut self) {
        if let DroppableKind::Stone { color, turns_left } = self.kind {
            self.kind = match turns_left {
                0 | 1 => DroppableKind::Gem(color),
                n => DroppableKind::Stone {
                    color,
                    turns_left: n - 1,
                },
            };
        }
    }

    pub(crate) fn bind(&mut self, id: DroppableId) {
        self.id = id;
    }

    /// Snap region and sprite onto `cell`.
    pub(crate) fn move_to_cell(&mut self, cell: Cell) {
        self.region = self.region.moved_to(cell);
        self.y = f32::from(cell.row) * f32::from(CELL_SIZE_IN_PIXELS);
    }

    pub(crate) fn set_position_y(&mut self, y: f32) {
        self.y = y;
    }

    pub(crate) fn set_falling(&mut self, falling: bool) {
        self.falling = falling;
    }
}
