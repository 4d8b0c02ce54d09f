//! Minefield Index -- Column-keyed spatial index of submerged mines.
//!
//! This crate provides the spatial index at the heart of the minefield
//! evaluator. Mines live at integer `(x, y, z)` positions with at most one mine
//! per `(x, y)` column. The index answers column lookups in constant time,
//! tracks per-axis occupancy for extreme-distance queries, and keeps mines in
//! ascending depth order so that "how many mines are at or above this depth"
//! can stop at the first deeper mine.
//!
//! Construction is split into two types: a [`MineIndexBuilder`] that stages
//! positions, and the [`MineIndex`] it is consumed into. Once built, the only
//! mutation is [`MineIndex::remove_at`].
//!
//! # Quick Start
//!
//! ```
//! use minefield_index::prelude::*;
//!
//! let mut builder = MineIndexBuilder::new();
//! builder.add_mine(Position::new(0, 0, 3)).unwrap();
//! builder.add_mine(Position::new(4, 1, 1)).unwrap();
//! let mut index = builder.build();
//!
//! assert_eq!(index.count(), 2);
//! assert_eq!(index.mine_at(Position::at_column(4, 1)), Some(Position::new(4, 1, 1)));
//! assert_eq!(index.count_at_or_above(1), 1);
//! assert_eq!(index.max_x_distance(Position::at_column(2, 0)), 2);
//!
//! index.remove_at(Position::at_column(4, 1));
//! assert_eq!(index.count(), 1);
//! ```

#![deny(unsafe_code)]

pub mod index;
pub mod occupancy;
pub mod position;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while staging mines into a [`MineIndexBuilder`].
///
/// [`MineIndexBuilder`]: index::MineIndexBuilder
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// A mine was already staged in the same `(x, y)` column.
    #[error("column ({x}, {y}) already holds a mine at depth {existing_z}, refusing a second one at depth {rejected_z}")]
    DuplicateColumn {
        x: i32,
        y: i32,
        existing_z: i32,
        rejected_z: i32,
    },

    /// The mine's depth lies outside the supported range.
    #[error("mine at ({x}, {y}) has depth {z}, expected {min}..={max}")]
    DepthOutOfRange {
        x: i32,
        y: i32,
        z: i32,
        min: i32,
        max: i32,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::index::{MineIndex, MineIndexBuilder};
    pub use crate::occupancy::AxisOccupancy;
    pub use crate::position::{Column, Position, MAX_MINE_DEPTH, MIN_MINE_DEPTH};
    pub use crate::IndexError;
}

// ---------------------------------------------------------------------------
// Integration Tests
// ---------------------------------------------------------------------------
