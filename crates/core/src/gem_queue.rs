//! Gem queue - draws the kinds of the next gem pairs
//!
//! Each pair member is rolled independently: a flash with
//! `FlashProbability` percent, a chest with `ChestProbability` percent,
//! otherwise a plain gem. Colors are uniform. One pair is kept as preview.

use crate::config::GameConfig;
use crate::droppable::DroppableKind;
use crate::rng::RandomGenerator;
use crate::types::GemColor;

/// Kinds of one gem pair: (pivot, slave).
pub type PairKinds = (DroppableKind, DroppableKind);

#[derive(Debug)]
pub struct GemQueue {
    rng: Box<dyn RandomGenerator>,
    chest_probability: u32,
    flash_probability: u32,
    next: PairKinds,
}

impl GemQueue {
    pub fn new(config: &GameConfig, rng: Box<dyn RandomGenerator>) -> Self {
        let mut queue = Self {
            rng,
            chest_probability: u32::from(config.chest_probability),
            flash_probability: u32::from(config.flash_probability),
            next: (
                DroppableKind::Gem(GemColor::Diamond),
                DroppableKind::Gem(GemColor::Diamond),
            ),
        };
        queue.next = queue.roll_pair();
        queue
    }

    /// Preview of the pair the next `draw` returns.
    pub fn peek(&self) -> PairKinds {
        self.next
    }

    pub fn draw(&mut self) -> PairKinds {
        let upcoming = self.roll_pair();
        std::mem::replace(&mut self.next, upcoming)
    }

    /// A uniformly drawn color, used for stones too.
    pub fn random_color(&mut self) -> GemColor {
        GemColor::from_index(self.rng.next_range(GemColor::ALL.len() as u32))
    }

    fn roll_pair(&mut self) -> PairKinds {
        (self.roll_kind(), self.roll_kind())
    }

    fn roll_kind(&mut self) -> DroppableKind {
        let roll = self.rng.next_range(100);
        if roll < self.flash_probability {
            return DroppableKind::Flash;
        }
        let color = self.random_color();
        if roll < self.flash_probability + self.chest_probability {
            DroppableKind::Chest(color)
        } else {
            DroppableKind::Gem(color)
        }
    }
}
