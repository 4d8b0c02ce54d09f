//! Vessel scripts: one line of instructions per simulation step.
//!
//! Each line holds up to `max_step_instructions` whitespace-separated,
//! case-insensitive tokens, with at most one firing pattern and at most one
//! move. Instructions run in the order they are written. Lines without any
//! token are skipped.

use std::fmt;
use std::path::Path;

use crate::input::{load_model, read_model, LineModel};
use crate::EngineError;

// ---------------------------------------------------------------------------
// FiringPattern
// ---------------------------------------------------------------------------

/// A volley of torpedoes fired at fixed offsets from the vessel's column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FiringPattern {
    /// The four diagonals.
    Alpha,
    /// The four orthogonal neighbours.
    Beta,
    /// West, centre, east.
    Gamma,
    /// North, centre, south.
    Delta,
}

impl FiringPattern {
    pub const ALL: [FiringPattern; 4] = [Self::Alpha, Self::Beta, Self::Gamma, Self::Delta];

    pub fn name(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Gamma => "gamma",
            Self::Delta => "delta",
        }
    }

    /// `(dx, dy)` offsets hit by this pattern.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::Alpha => &[(-1, -1), (-1, 1), (1, -1), (1, 1)],
            Self::Beta => &[(-1, 0), (0, -1), (0, 1), (1, 0)],
            Self::Gamma => &[(-1, 0), (0, 0), (1, 0)],
            Self::Delta => &[(0, -1), (0, 0), (0, 1)],
        }
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// A one-unit horizontal move. North is towards smaller y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    North,
    South,
    East,
    West,
}

impl Move {
    pub const ALL: [Move; 4] = [Self::North, Self::South, Self::East, Self::West];

    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }

    /// Unit `(dx, dy)` translation.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }
}

// ---------------------------------------------------------------------------
// Instruction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Fire(FiringPattern),
    Move(Move),
}

impl Instruction {
    /// Parse a lowercase token.
    pub fn parse(token: &str) -> Option<Self> {
        FiringPattern::ALL
            .into_iter()
            .find(|p| p.name() == token)
            .map(Self::Fire)
            .or_else(|| Move::ALL.into_iter().find(|m| m.name() == token).map(Self::Move))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fire(pattern) => pattern.name(),
            Self::Move(direction) => direction.name(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// StepInstructions
// ---------------------------------------------------------------------------

/// The instructions for one step, in written order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInstructions {
    instructions: Vec<Instruction>,
}

impl StepInstructions {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn iter(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.instructions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl fmt::Display for StepInstructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

/// An ordered, non-empty list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    steps: Vec<StepInstructions>,
}

impl Script {
    /// Parse a script from text.
    pub fn parse(text: &str, max_step_instructions: usize) -> Result<Self, EngineError> {
        read_model(text.as_bytes(), ScriptParser::new(max_step_instructions))
    }

    /// Read a script file.
    pub fn load(path: &Path, max_step_instructions: usize) -> Result<Self, EngineError> {
        load_model(path, ScriptParser::new(max_step_instructions))
    }

    /// Instructions for 1-based `step`, or `None` past the end of the script.
    pub fn step(&self, step: usize) -> Option<&StepInstructions> {
        step.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the script has no steps. Never true for a parsed script.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[StepInstructions] {
        &self.steps
    }
}

// ---------------------------------------------------------------------------
// ScriptParser
// ---------------------------------------------------------------------------

/// [`LineModel`] that validates each script line into a [`StepInstructions`].
#[derive(Debug)]
pub struct ScriptParser {
    max_step_instructions: usize,
    steps: Vec<StepInstructions>,
}

impl ScriptParser {
    pub fn new(max_step_instructions: usize) -> Self {
        Self {
            max_step_instructions,
            steps: Vec::new(),
        }
    }
}

impl LineModel for ScriptParser {
    type Output = Script;

    fn process_line(&mut self, line_no: usize, line: &str) -> Result<(), EngineError> {
        tracing::trace!(line_no, line, "processing script line");

        let line = line.trim().to_lowercase();
        let mut instructions = Vec::new();
        let mut has_fire = false;
        let mut has_move = false;

        for token in line.split_whitespace() {
            if instructions.len() == self.max_step_instructions {
                return Err(EngineError::TooManyInstructions {
                    line: line_no,
                    limit: self.max_step_instructions,
                });
            }
            let instruction = Instruction::parse(token).ok_or_else(|| EngineError::InvalidInstruction {
                line: line_no,
                token: token.to_owned(),
            })?;
            match instruction {
                Instruction::Fire(_) if has_fire => {
                    return Err(EngineError::DuplicateFiringPattern { line: line_no });
                }
                Instruction::Move(_) if has_move => {
                    return Err(EngineError::DuplicateMove { line: line_no });
                }
                Instruction::Fire(_) => has_fire = true,
                Instruction::Move(_) => has_move = true,
            }
            instructions.push(instruction);
        }

        if !instructions.is_empty() {
            self.steps.push(StepInstructions::new(instructions));
        }
        Ok(())
    }

    fn finish(self) -> Result<Script, EngineError> {
        if self.steps.is_empty() {
            return Err(EngineError::EmptyScript);
        }
        for (i, step) in self.steps.iter().enumerate() {
            tracing::debug!(step = i + 1, instructions = %step, "validated script step");
        }
        Ok(Script { steps: self.steps })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
