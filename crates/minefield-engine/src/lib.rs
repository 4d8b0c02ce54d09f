//! Minefield Engine -- Step-driven mine clearing evaluator.
//!
//! This crate builds on [`minefield_index`] to provide everything around the
//! index: parsing field and script files, rendering the field as seen from the
//! vessel, running the step loop and scoring the result.
//!
//! # Quick Start
//!
//! ```
//! use minefield_engine::prelude::*;
//!
//! let field = Field::parse("...\n.b.\n...\n").unwrap();
//! let script = Script::parse("delta\n", 2).unwrap();
//!
//! let evaluator = Evaluator::new(field, script, SimConfig::default()).unwrap();
//! let report = evaluator.run();
//!
//! assert!(report.outcome.passed());
//! assert_eq!(report.outcome.score, 5);
//! assert!(render_transcript(&report).ends_with("pass (5)\n"));
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod depth;
pub mod evaluator;
pub mod field;
pub mod input;
pub mod script;
pub mod transcript;
pub mod view;

use std::path::PathBuf;

/// Re-export the index crate for convenience.
pub use minefield_index;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while loading inputs or configuring a run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An input file could not be opened.
    #[error("could not open '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading a line from an input failed part way through.
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        source: std::io::Error,
    },

    /// A field file contained a character that is neither empty nor a depth.
    #[error("invalid range character '{symbol}' at line {line}, column {column} of field file")]
    InvalidFieldSymbol {
        line: usize,
        column: usize,
        symbol: char,
    },

    /// The field file had no rows or no columns.
    #[error("please provide a non-empty field file")]
    EmptyField,

    /// A script token is neither a firing pattern nor a move.
    #[error("invalid instruction '{token}' at line {line} of script file")]
    InvalidInstruction {
        line: usize,
        token: String,
    },

    /// A script line holds more instructions than a step allows.
    #[error("too many instructions at line {line} of script file (at most {limit} per step)")]
    TooManyInstructions {
        line: usize,
        limit: usize,
    },

    /// A script line holds two firing patterns.
    #[error("too many firing pattern instructions at line {line} of script file")]
    DuplicateFiringPattern {
        line: usize,
    },

    /// A script line holds two moves.
    #[error("too many move instructions at line {line} of script file")]
    DuplicateMove {
        line: usize,
    },

    /// The script file had no steps.
    #[error("please provide a non-empty script file")]
    EmptyScript,

    /// The mine index rejected a mine.
    #[error(transparent)]
    Index(#[from] minefield_index::IndexError),

    /// A configuration file could not be parsed.
    #[error("could not parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A configuration value is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common engine usage.
pub mod prelude {
    // Re-export everything from the index prelude.
    pub use minefield_index::prelude::*;

    pub use crate::config::SimConfig;
    pub use crate::depth::{decode_range, encode_range, EMPTY_SYMBOL, MAX_RANGE, MISSED_SYMBOL};
    pub use crate::evaluator::{Evaluator, Outcome, RunReport, RunStats, StepFrame, Termination};
    pub use crate::field::{Field, FieldParser};
    pub use crate::input::{load_model, read_model, LineModel};
    pub use crate::script::{FiringPattern, Instruction, Move, Script, ScriptParser, StepInstructions};
    pub use crate::transcript::{render_transcript, transcripts_match};
    pub use crate::view::{render_view, Cell, Viewport};
    pub use crate::EngineError;
}
