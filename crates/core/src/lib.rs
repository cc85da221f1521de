//! Core simulation - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-gem puzzle. It has **no
//! dependencies** on terminal, input devices or wall-clock time: every call
//! receives the current time from its caller, so a game replays identically
//! from the same seed and the same inputs.
//!
//! # Module Structure
//!
//! - [`grid`]: spatial store owning every droppable, with movement and gravity
//! - [`droppable`] / [`droppable_list`]: the pieces and their ordered container
//! - [`iteration`]: big gem creation, extension and merge passes
//! - [`crush`]: priority-ordered crush resolution
//! - [`scoring`]: chain-aware score and stone accumulators
//! - [`controller`] / [`state`]: the pair spawn/control/settle state machine
//! - [`session`]: everything a frontend needs behind `tick` and `snapshot`
//!
//! # Game Rules
//!
//! - Pairs of gems spawn at the top of the spawn column and fall under gravity
//! - A 2x2 block of same-colored gems fuses into a big gem, which grows over
//!   full rows and columns and merges with neighbouring big gems
//! - A chest destroys the connected group of its color; a flash destroys
//!   every piece of the color it lands on
//! - Consecutive crush batches form a chain that multiplies the score
//! - The game ends when a pair cannot spawn
//!
//! # Example
//!
//! ```
//! use tui_diamonds_core::{GameConfig, GameSession, SimpleRng};
//!
//! let config = GameConfig::default();
//! let delay = config.new_gem_delay_ms;
//! let mut session = GameSession::new(config, Box::new(SimpleRng::new(7)), 0);
//!
//! session.tick(delay);
//! assert_eq!(session.snapshot().pieces.len(), 2);
//! ```
//!
//! # Timing
//!
//! The frontend calls [`GameSession::tick`] every 16ms. Gravity is expressed
//! in pixels per tick on a 32-pixel cell.

pub mod config;
pub mod controller;
pub mod crush;
pub mod droppable;
pub mod droppable_list;
pub mod error;
pub mod gem_queue;
pub mod gems_pair;
pub mod grid;
pub mod iteration;
pub mod reactor;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod timer;

pub use tui_diamonds_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use controller::GridController;
pub use crush::{CrushPriority, CRUSH_PRIORITIES};
pub use droppable::{Droppable, DroppableId, DroppableKind};
pub use droppable_list::DroppableList;
pub use error::{ConfigError, GridError};
pub use gem_queue::GemQueue;
pub use gems_pair::GemsPair;
pub use grid::Grid;
pub use iteration::{CreateNewBigGems, DroppableIteration, ExtendIteration, MergeBigGemsIteration};
pub use reactor::{ActionBatch, InputReactor, QueuedReactor};
pub use rng::{RandomGenerator, SequenceRng, SimpleRng};
pub use scoring::{ScoreAccumulator, ScoreCalculator, StoneAccumulator, StoneCalculator};
pub use session::GameSession;
pub use snapshot::{GridSnapshot, PieceSnapshot};
pub use state::ControllerState;
pub use timer::{ManualTimer, SystemTimer, Timer};
