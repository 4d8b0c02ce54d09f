//! Textual depth map of the field around an observer.
//!
//! The viewport is a box centred on the observer's column, just wide and tall
//! enough to reach the farthest live mine on each axis (see
//! [`MineIndex::max_x_distance`]). Rows run from the smallest y to the largest
//! and each row lists x in ascending order. Every cell is one symbol:
//!
//! - `.` no mine in the column;
//! - `*` a mine at or above the observer's depth (missed);
//! - a letter encoding how far below the observer the mine lies.
//!
//! # Example
//!
//! ```
//! use minefield_engine::prelude::*;
//!
//! let mut builder = MineIndexBuilder::new();
//! builder.add_mine(Position::new(0, 0, 1)).unwrap();
//! builder.add_mine(Position::new(2, 2, 3)).unwrap();
//! let index = builder.build();
//!
//! let grid = render_view(&index, Position::new(1, 1, 0));
//! assert_eq!(grid, "a..\n...\n..c\n");
//! ```

use minefield_index::index::MineIndex;
use minefield_index::position::Position;

use crate::depth::{encode_range, EMPTY_SYMBOL, MISSED_SYMBOL};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// What a single viewport cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Missed,
    /// A mine `range` units below the observer (`range > 0`).
    Active(i32),
}

impl Cell {
    /// Classify the column at `column` as seen from `observer`.
    pub fn classify(index: &MineIndex, column: Position, observer: Position) -> Self {
        match index.mine_at(column) {
            None => Cell::Empty,
            Some(mine) => {
                let range = mine.z - observer.z;
                if range <= 0 {
                    Cell::Missed
                } else {
                    Cell::Active(range)
                }
            }
        }
    }

    /// Display symbol.
    ///
    /// # Panics
    ///
    /// Panics for an active range the alphabet cannot express (see
    /// [`encode_range`]).
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => EMPTY_SYMBOL,
            Cell::Missed => MISSED_SYMBOL,
            Cell::Active(range) => encode_range(range),
        }
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Inclusive bounds of the rendered region.
///
/// Bounds are `i64` so that a box around an observer near the edge of the
/// `i32` range does not overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Viewport {
    /// The symmetric box around `observer` that reaches every live mine.
    ///
    /// An empty index gives a single cell: the observer's own column.
    pub fn around(index: &MineIndex, observer: Position) -> Self {
        let dx = i64::from(index.max_x_distance(observer));
        let dy = i64::from(index.max_y_distance(observer));
        let (x, y) = (i64::from(observer.x), i64::from(observer.y));
        Self {
            min_x: x - dx,
            max_x: x + dx,
            min_y: y - dy,
            max_y: y + dy,
        }
    }

    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }

    /// Cells in row-major order (y outer, x inner), one `Vec` per row.
    pub fn rows(&self, index: &MineIndex, observer: Position) -> Vec<Vec<Cell>> {
        (self.min_y..=self.max_y)
            .map(|y| {
                (self.min_x..=self.max_x)
                    .map(|x| match (i32::try_from(x), i32::try_from(y)) {
                        (Ok(x), Ok(y)) => Cell::classify(index, Position::at_column(x, y), observer),
                        // No mine can live outside the coordinate range.
                        _ => Cell::Empty,
                    })
                    .collect()
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the field around `observer` as rows of symbols, each row ending in
/// `\n`.
pub fn render_view(index: &MineIndex, observer: Position) -> String {
    let viewport = Viewport::around(index, observer);
    let mut out = String::with_capacity((viewport.width() + 1) * viewport.height());
    for row in viewport.rows(index, observer) {
        out.extend(row.into_iter().map(Cell::symbol));
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use minefield_index::index::MineIndexBuilder;

    fn index_of(mines: &[(i32, i32, i32)]) -> MineIndex {
        let mut builder = MineIndexBuilder::new();
        for &(x, y, z) in mines {
            builder.add_mine(Position::new(x, y, z)).unwrap();
        }
        builder.build()
    }

    #[test]
    fn corners_render_with_their_ranges() {
        let index = index_of(&[(0, 0, 1), (2, 2, 3)]);
        let observer = Position::new(1, 1, 0);

        let viewport = Viewport::around(&index, observer);
        assert_eq!(
            viewport,
            Viewport {
                min_x: 0,
                max_x: 2,
                min_y: 0,
                max_y: 2,
            }
        );
        assert_eq!(render_view(&index, observer), "a..\n...\n..c\n");
    }

    #[test]
    fn empty_index_renders_single_cell() {
        let index = index_of(&[]);
        assert_eq!(render_view(&index, Position::new(7, -3, 12)), ".\n");
    }

    #[test]
    fn passed_mine_renders_as_missed_and_still_counts() {
        let index = index_of(&[(1, 0, 4), (3, 0, 9)]);
        let grid = render_view(&index, Position::new(2, 0, 4));
        assert_eq!(grid, "*.e\n");
        assert_eq!(index.count(), 2);
    }

    #[test]
    fn viewport_is_symmetric_around_off_centre_observer() {
        let index = index_of(&[(0, 0, 27)]);
        let observer = Position::new(3, 1, 0);
        let viewport = Viewport::around(&index, observer);
        assert_eq!((viewport.width(), viewport.height()), (7, 3));

        let grid = render_view(&index, observer);
        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows, vec!["A......", ".......", "......."]);
    }

    #[test]
    fn deep_ranges_use_upper_case() {
        let index = index_of(&[(0, 0, 52)]);
        assert_eq!(render_view(&index, Position::new(0, 0, 0)), "Z\n");
        assert_eq!(render_view(&index, Position::new(0, 0, 25)), "A\n");
    }

    #[test]
    fn classify_distinguishes_all_three_states() {
        let index = index_of(&[(0, 0, 5)]);
        let col = Position::at_column(0, 0);
        assert_eq!(Cell::classify(&index, col, Position::new(0, 0, 2)), Cell::Active(3));
        assert_eq!(Cell::classify(&index, col, Position::new(0, 0, 5)), Cell::Missed);
        assert_eq!(Cell::classify(&index, col, Position::new(0, 0, 9)), Cell::Missed);
        assert_eq!(
            Cell::classify(&index, Position::at_column(1, 0), Position::new(0, 0, 0)),
            Cell::Empty
        );
    }

    #[test]
    #[should_panic(expected = "cannot be encoded")]
    fn observer_above_the_surface_overflows_the_alphabet() {
        let index = index_of(&[(0, 0, 52)]);
        let _ = render_view(&index, Position::new(0, 0, -1));
    }
}
