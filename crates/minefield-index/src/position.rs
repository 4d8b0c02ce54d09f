//! Integer positions and the column keys used to index them.
//!
//! A [`Position`] is a full `(x, y, z)` triple. The index, however, only ever
//! keys on the `(x, y)` pair: exactly one mine may occupy a column, so two
//! positions that differ only in depth name the same slot. That projection is
//! the [`Column`] type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shallowest depth a mine may be placed at.
pub const MIN_MINE_DEPTH: i32 = 1;

/// Deepest depth a mine may be placed at.
pub const MAX_MINE_DEPTH: i32 = 52;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A point in the field. `z` grows downwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// A position on the surface plane (`z = 0`), used for column queries.
    #[inline]
    pub const fn at_column(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }

    /// The `(x, y)` column this position belongs to.
    #[inline]
    pub const fn column(self) -> Column {
        Column {
            x: self.x,
            y: self.y,
        }
    }

    /// Translate in place. Each coordinate saturates at the `i32` bounds.
    #[inline]
    pub fn translate(&mut self, dx: i32, dy: i32, dz: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
        self.z = self.z.saturating_add(dz);
    }

    /// A copy of this position shifted by `(dx, dy)` on the horizontal plane.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z,
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// The `(x, y)` projection of a [`Position`]; the index key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Column {
    pub x: i32,
    pub y: i32,
}

impl Column {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn of(position: Position) -> Self {
        position.column()
    }
}

impl From<Position> for Column {
    fn from(position: Position) -> Self {
        position.column()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
