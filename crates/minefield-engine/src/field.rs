//! The mine field: dimensions plus the live mine index.
//!
//! A field file is a grid of symbols. Line `j` (0-based) is row `y = j`;
//! character `i` of that line, after trimming and dropping spaces, is column
//! `x = i`. `.` marks an empty column and a range letter marks a mine at that
//! depth. Blank lines still count as rows.

use std::path::Path;
use std::str::FromStr;

use minefield_index::index::{MineIndex, MineIndexBuilder};
use minefield_index::position::Position;

use crate::depth::{decode_range, EMPTY_SYMBOL};
use crate::input::{load_model, read_model, LineModel};
use crate::view::render_view;
use crate::EngineError;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// The field's extent and its remaining mines.
#[derive(Debug, Clone)]
pub struct Field {
    width: usize,
    height: usize,
    index: MineIndex,
}

impl Field {
    /// Parse a field from text.
    pub fn parse(text: &str) -> Result<Self, EngineError> {
        read_model(text.as_bytes(), FieldParser::new())
    }

    /// Read a field file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        load_model(path, FieldParser::new())
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Centre of the surface plane. For an even dimension this is the upper of
    /// the two middle columns.
    pub fn center(&self) -> Position {
        Position::at_column((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn mine_count(&self) -> usize {
        self.index.count()
    }

    /// Whether any live mine lies at or above `depth`.
    pub fn mines_at_or_above(&self, depth: i32) -> bool {
        self.index.count_at_or_above(depth) > 0
    }

    /// Destroy the mine in `position`'s column, if any.
    pub fn destroy_mine(&mut self, position: Position) -> Option<Position> {
        self.index.remove_at(position)
    }

    /// Render the field as seen from `observer`.
    pub fn render(&self, observer: Position) -> String {
        render_view(&self.index, observer)
    }

    pub fn index(&self) -> &MineIndex {
        &self.index
    }
}

impl FromStr for Field {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// FieldParser
// ---------------------------------------------------------------------------

/// [`LineModel`] that stages mines row by row and builds the index at the end.
#[derive(Debug, Default)]
pub struct FieldParser {
    width: usize,
    height: usize,
    builder: MineIndexBuilder,
}

impl FieldParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineModel for FieldParser {
    type Output = Field;

    fn process_line(&mut self, line_no: usize, line: &str) -> Result<(), EngineError> {
        tracing::trace!(line_no, line, "processing field line");

        let y = self.height as i32;
        let mut row_len = 0;
        for (x, symbol) in line.trim().chars().filter(|&c| c != ' ').enumerate() {
            row_len = x + 1;
            if symbol == EMPTY_SYMBOL {
                continue;
            }
            let z = decode_range(symbol).ok_or(EngineError::InvalidFieldSymbol {
                line: line_no,
                column: x + 1,
                symbol,
            })?;
            self.builder.add_mine(Position::new(x as i32, y, z))?;
        }

        self.width = self.width.max(row_len);
        self.height += 1;
        Ok(())
    }

    fn finish(self) -> Result<Field, EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::EmptyField);
        }

        tracing::debug!(
            width = self.width,
            height = self.height,
            mines = self.builder.staged(),
            "validated field"
        );

        Ok(Field {
            width: self.width,
            height: self.height,
            index: self.builder.build(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
