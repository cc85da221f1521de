//! Error types for the simulation core.
//!
//! Only contract violations are errors. A blocked move or a blocked spawn is
//! ordinary control flow and is reported through `bool`/`Option` results instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::droppable::DroppableId;
use crate::types::{Cell, Region};

/// Contract violations on grid mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("droppable {0} is not on the grid")]
    UnknownDroppable(DroppableId),
    #[error("cell ({}, {}) is already occupied", .0.row, .0.column)]
    CellOccupied(Cell),
    #[error(
        "region ({}, {})..=({}, {}) lies outside the grid",
        .0.top_row(), .0.left_column(), .0.bottom_row(), .0.right_column()
    )]
    OutOfBounds(Region),
}

/// Failures while loading or validating a [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
