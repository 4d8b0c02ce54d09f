//! The column-keyed mine index and its builder.
//!
//! Mines are staged into a [`MineIndexBuilder`] in any order and then consumed
//! into a [`MineIndex`]. Building sorts the staged mines by depth once; after
//! that the index keeps three structures in step:
//!
//! 1. A `HashMap<Column, Position>` for constant-time column lookup and removal.
//! 2. A `Vec<Column>` in ascending depth order. Removal leaves a tombstone (a
//!    column no longer present in the map) instead of shifting the vector, so
//!    survivors never change relative order. Tombstones are compacted away once
//!    they make up more than half of the vector.
//! 3. One [`AxisOccupancy`] per horizontal axis for extreme-distance queries.
//!
//! Because the builder is consumed, a built index can never receive new mines
//! and an unbuilt one can never be queried.

use std::collections::HashMap;

use crate::occupancy::AxisOccupancy;
use crate::position::{Column, Position, MAX_MINE_DEPTH, MIN_MINE_DEPTH};
use crate::IndexError;

// ---------------------------------------------------------------------------
// MineIndexBuilder
// ---------------------------------------------------------------------------

/// Staging area for mines before the index is built.
#[derive(Debug, Default)]
pub struct MineIndexBuilder {
    /// Mines in the order they were added.
    staged: Vec<Position>,
    /// Depth of the mine staged in each column, for duplicate detection.
    staged_columns: HashMap<Column, i32>,
}

impl MineIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a mine.
    ///
    /// Rejects a second mine in an already staged column and any depth outside
    /// [`MIN_MINE_DEPTH`]`..=`[`MAX_MINE_DEPTH`].
    pub fn add_mine(&mut self, position: Position) -> Result<(), IndexError> {
        if !(MIN_MINE_DEPTH..=MAX_MINE_DEPTH).contains(&position.z) {
            return Err(IndexError::DepthOutOfRange {
                x: position.x,
                y: position.y,
                z: position.z,
                min: MIN_MINE_DEPTH,
                max: MAX_MINE_DEPTH,
            });
        }
        if let Some(&existing_z) = self.staged_columns.get(&position.column()) {
            return Err(IndexError::DuplicateColumn {
                x: position.x,
                y: position.y,
                existing_z,
                rejected_z: position.z,
            });
        }

        let _ = self.staged_columns.insert(position.column(), position.z);
        self.staged.push(position);
        Ok(())
    }

    /// Number of mines staged so far.
    pub fn staged(&self) -> usize {
        self.staged.len()
    }

    /// Consume the builder and produce a queryable index.
    ///
    /// Mines are ordered by ascending depth with a stable sort, so mines that
    /// share a depth keep the order in which they were added.
    pub fn build(self) -> MineIndex {
        let mut staged = self.staged;
        staged.sort_by_key(|mine| mine.z);

        let mut mines = HashMap::with_capacity(staged.len());
        let mut depth_order = Vec::with_capacity(staged.len());
        let mut x_occupancy = AxisOccupancy::new();
        let mut y_occupancy = AxisOccupancy::new();

        for mine in staged {
            let column = mine.column();
            // Columns are unique by construction; see `add_mine`.
            let _ = mines.insert(column, mine);
            depth_order.push(column);
            x_occupancy.increment(mine.x);
            y_occupancy.increment(mine.y);
        }

        let index = MineIndex {
            mines,
            depth_order,
            tombstones: 0,
            x_occupancy,
            y_occupancy,
        };

        tracing::debug!(
            mines = index.count(),
            x_extent = ?index.x_extent(),
            y_extent = ?index.y_extent(),
            "built mine index"
        );

        index
    }
}

// ---------------------------------------------------------------------------
// MineIndex
// ---------------------------------------------------------------------------

/// A built, queryable set of mines with at most one mine per column.
#[derive(Debug, Clone)]
pub struct MineIndex {
    /// Live mines keyed by column.
    mines: HashMap<Column, Position>,
    /// Every column that held a mine at build time, shallowest first.
    /// Entries whose column is absent from `mines` are tombstones.
    depth_order: Vec<Column>,
    /// Number of tombstones currently in `depth_order`.
    tombstones: usize,
    x_occupancy: AxisOccupancy,
    y_occupancy: AxisOccupancy,
}

impl MineIndex {
    /// The mine in `position`'s column, if any. Depth is ignored.
    pub fn mine_at(&self, position: Position) -> Option<Position> {
        self.mines.get(&Column::of(position)).copied()
    }

    /// Whether `position`'s column holds a mine.
    pub fn contains(&self, position: Position) -> bool {
        self.mines.contains_key(&Column::of(position))
    }

    /// Remove the mine in `position`'s column.
    ///
    /// Returns the removed mine, or `None` if the column was already empty.
    /// Calling this twice for the same column is the same as calling it once.
    pub fn remove_at(&mut self, position: Position) -> Option<Position> {
        let removed = self.mines.remove(&Column::of(position))?;

        let _ = self.x_occupancy.decrement(removed.x);
        let _ = self.y_occupancy.decrement(removed.y);

        self.tombstones += 1;
        if self.tombstones * 2 > self.depth_order.len() {
            self.compact();
        }

        tracing::trace!(
            x = removed.x,
            y = removed.y,
            z = removed.z,
            remaining = self.mines.len(),
            "removed mine"
        );
        Some(removed)
    }

    /// Largest x-axis distance from `position` to an occupied x coordinate.
    pub fn max_x_distance(&self, position: Position) -> u32 {
        self.x_occupancy.farthest_from(position.x)
    }

    /// Largest y-axis distance from `position` to an occupied y coordinate.
    pub fn max_y_distance(&self, position: Position) -> u32 {
        self.y_occupancy.farthest_from(position.y)
    }

    /// `(min, max)` occupied x coordinate.
    pub fn x_extent(&self) -> Option<(i32, i32)> {
        self.x_occupancy.extent()
    }

    /// `(min, max)` occupied y coordinate.
    pub fn y_extent(&self) -> Option<(i32, i32)> {
        self.y_occupancy.extent()
    }

    /// Number of mines currently in the index.
    pub fn count(&self) -> usize {
        self.mines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mines.is_empty()
    }

    /// Number of mines with `z <= depth`.
    ///
    /// Walks mines shallowest first and stops at the first one deeper than
    /// `depth`.
    pub fn count_at_or_above(&self, depth: i32) -> usize {
        self.iter().take_while(|mine| mine.z <= depth).count()
    }

    /// Live mines, shallowest first. Mines at equal depth keep build order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.depth_order
            .iter()
            .filter_map(|column| self.mines.get(column).copied())
    }

    /// Per-axis occupancy, x then y.
    pub fn occupancy(&self) -> (&AxisOccupancy, &AxisOccupancy) {
        (&self.x_occupancy, &self.y_occupancy)
    }

    /// Drop tombstones from the depth order. Survivors keep their order.
    fn compact(&mut self) {
        let mines = &self.mines;
        self.depth_order.retain(|column| mines.contains_key(column));
        self.tombstones = 0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
