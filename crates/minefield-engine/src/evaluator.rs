//! The step loop that drives a vessel through the field.
//!
//! The [`Evaluator`] owns the field, the script and the vessel. Each step:
//!
//! 1. The field is rendered from the vessel's current position.
//! 2. The step's instructions run in written order. A firing pattern destroys
//!    the mine (if any) in each targeted column; a move translates the vessel.
//! 3. The vessel dives by `dive_rate`.
//! 4. The field is rendered again from the new position.
//!
//! The run stops once no mines remain, the script is exhausted, or a live mine
//! lies at or above the vessel's depth (it was passed without being cleared).
//!
//! # Example
//!
//! ```
//! use minefield_engine::prelude::*;
//!
//! let field = Field::parse("a...c\n").unwrap();
//! let script = Script::parse("west\ngamma\n", 2).unwrap();
//! let report = Evaluator::new(field, script, SimConfig::default()).unwrap().run();
//!
//! // The mine at depth 1 is passed during the first step.
//! assert_eq!(report.outcome.termination, Termination::MinePassed);
//! assert!(!report.outcome.passed());
//! ```

use std::fmt;

use minefield_index::position::Position;
use serde::Serialize;

use crate::config::SimConfig;
use crate::field::Field;
use crate::script::{Instruction, Script};
use crate::EngineError;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Counters feeding the score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Mines in the field before the first step.
    pub initial_mines: usize,
    /// Number of firing patterns executed.
    pub volleys_fired: u32,
    /// Total horizontal distance travelled.
    pub distance_moved: u32,
}

/// Why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    AllMinesCleared,
    ScriptExhausted,
    MinePassed,
}

/// Final result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub score: i64,
    pub termination: Termination,
    pub steps_taken: usize,
    pub mines_remaining: usize,
    pub stats: RunStats,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.score > 0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            write!(f, "pass ({})", self.score)
        } else {
            f.write_str("fail (0)")
        }
    }
}

/// Everything observed during one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFrame {
    /// 1-based step number.
    pub step: usize,
    pub vessel_before: Position,
    /// Field rendered before the instructions ran.
    pub before: String,
    /// The step's instructions, space separated.
    pub instructions: String,
    pub vessel_after: Position,
    /// Field rendered after the instructions and the dive.
    pub after: String,
    /// Mines destroyed during this step.
    pub cleared: Vec<Position>,
}

/// Full record of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub frames: Vec<StepFrame>,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Runs a script against a field.
#[derive(Debug)]
pub struct Evaluator {
    field: Field,
    script: Script,
    config: SimConfig,
    vessel: Position,
    /// The step about to run (1-based).
    step: usize,
    stats: RunStats,
}

impl Evaluator {
    /// Place the vessel at the field's centre, at the configured starting
    /// depth.
    pub fn new(field: Field, script: Script, config: SimConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let mut vessel = field.center();
        vessel.z = config.starting_depth;
        let stats = RunStats {
            initial_mines: field.mine_count(),
            ..RunStats::default()
        };

        Ok(Self {
            field,
            script,
            config,
            vessel,
            step: 1,
            stats,
        })
    }

    pub fn vessel(&self) -> Position {
        self.vessel
    }

    /// The step that will run next (1-based).
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Why the run is over, or `None` while it can continue.
    pub fn termination(&self) -> Option<Termination> {
        if self.field.mine_count() == 0 {
            Some(Termination::AllMinesCleared)
        } else if self.step > self.script.len() {
            Some(Termination::ScriptExhausted)
        } else if self.field.mines_at_or_above(self.vessel.z) {
            Some(Termination::MinePassed)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.termination().is_some()
    }

    /// Run one step. Returns `None` without doing anything once the run is
    /// complete.
    pub fn advance(&mut self) -> Option<StepFrame> {
        if self.is_complete() {
            return None;
        }
        let instructions = self.script.step(self.step)?.clone();

        let vessel_before = self.vessel;
        tracing::debug!(step = self.step, vessel = %vessel_before, "starting step");
        let before = self.field.render(vessel_before);

        let mut cleared = Vec::new();
        for instruction in instructions.iter() {
            match instruction {
                Instruction::Fire(pattern) => {
                    for &(dx, dy) in pattern.offsets() {
                        if let Some(mine) = self.field.destroy_mine(self.vessel.offset(dx, dy)) {
                            cleared.push(mine);
                        }
                    }
                    self.stats.volleys_fired = self.stats.volleys_fired.saturating_add(1);
                }
                Instruction::Move(direction) => {
                    let (dx, dy) = direction.delta();
                    let rate = self.config.move_rate;
                    self.vessel.translate(dx * rate, dy * rate, 0);
                    self.stats.distance_moved = self.stats.distance_moved.saturating_add(rate.unsigned_abs());
                }
            }
        }

        self.vessel.translate(0, 0, self.config.dive_rate);
        let after = self.field.render(self.vessel);

        tracing::debug!(
            step = self.step,
            vessel = %self.vessel,
            cleared = cleared.len(),
            remaining = self.field.mine_count(),
            "finished step"
        );

        let frame = StepFrame {
            step: self.step,
            vessel_before,
            before,
            instructions: instructions.to_string(),
            vessel_after: self.vessel,
            after,
            cleared,
        };
        self.step += 1;
        Some(frame)
    }

    /// Score under the current state.
    ///
    /// - Mines remain (passed or never reached): 0.
    /// - All mines cleared before the script ran out: 1.
    /// - All mines cleared on the final step: `10·n` minus capped penalties of
    ///   `5` per volley (at most `5·n`) and `2` per unit moved (at most `3·n`),
    ///   where `n` is the initial mine count.
    pub fn score(&self) -> i64 {
        let initial = self.stats.initial_mines as i64;
        let steps_taken = self.step - 1;

        if self.field.mine_count() > 0 {
            0
        } else if steps_taken < self.script.len() {
            1
        } else {
            let volleys = i64::from(self.stats.volleys_fired);
            let moved = i64::from(self.stats.distance_moved);
            10 * initial - (5 * volleys).min(5 * initial) - (2 * moved).min(3 * initial)
        }
    }

    /// Run to completion.
    pub fn run(mut self) -> RunReport {
        tracing::info!(
            mines = self.stats.initial_mines,
            steps = self.script.len(),
            vessel = %self.vessel,
            "starting evaluation"
        );

        let mut frames = Vec::new();
        while let Some(frame) = self.advance() {
            frames.push(frame);
        }

        // `advance` only stops once a termination condition holds.
        let termination = self.termination().unwrap_or(Termination::ScriptExhausted);
        let outcome = Outcome {
            score: self.score(),
            termination,
            steps_taken: self.step - 1,
            mines_remaining: self.field.mine_count(),
            stats: self.stats,
        };

        tracing::info!(
            score = outcome.score,
            termination = ?outcome.termination,
            steps = outcome.steps_taken,
            "evaluation finished"
        );

        RunReport { frames, outcome }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator(field: &str, script: &str) -> Evaluator {
        Evaluator::new(
            Field::parse(field).unwrap(),
            Script::parse(script, 2).unwrap(),
            SimConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn vessel_starts_at_center_and_starting_depth() {
        let config = SimConfig {
            starting_depth: 3,
            ..SimConfig::default()
        };
        let e = Evaluator::new(
            Field::parse(".....\n.....\n.....\n").unwrap(),
            Script::parse("north\n", 2).unwrap(),
            config,
        )
        .unwrap();
        assert_eq!(e.vessel(), Position::new(2, 1, 3));
        assert_eq!(e.step(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimConfig {
            dive_rate: 0,
            ..SimConfig::default()
        };
        let err = Evaluator::new(Field::parse("a\n").unwrap(), Script::parse("gamma\n", 2).unwrap(), config)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn vessel_above_the_surface_is_rejected() {
        let config = SimConfig {
            starting_depth: -5,
            ..SimConfig::default()
        };
        let err = Evaluator::new(Field::parse("Z\n").unwrap(), Script::parse("gamma\n", 2).unwrap(), config)
            .unwrap_err();
        assert!(err.to_string().contains("starting_depth"), "{err}");
    }

    #[test]
    fn oversized_move_rate_is_rejected() {
        let config = SimConfig {
            move_rate: i32::MAX,
            ..SimConfig::default()
        };
        let err = Evaluator::new(
            Field::parse("z.z\n").unwrap(),
            Script::parse("east\neast\n", 2).unwrap(),
            config,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn maximum_move_rate_runs_to_completion() {
        let config = SimConfig {
            move_rate: crate::config::MAX_MOVE_RATE,
            ..SimConfig::default()
        };
        let report = Evaluator::new(
            Field::parse("z.z\n").unwrap(),
            Script::parse("east\neast\n", 2).unwrap(),
            config,
        )
        .unwrap()
        .run();
        assert_eq!(report.frames[1].vessel_after, Position::new(2049, 0, 2));
        assert_eq!(report.outcome.stats.distance_moved, 2048);
        assert_eq!(report.outcome.termination, Termination::ScriptExhausted);
    }

    #[test]
    fn instructions_run_in_written_order() {
        // Mine directly east of the vessel.
        let mut fire_first = evaluator("..c\n", "delta east\n");
        let frame = fire_first.advance().unwrap();
        assert!(frame.cleared.is_empty());
        assert_eq!(fire_first.field().mine_count(), 1);

        let mut move_first = evaluator("..c\n", "east delta\n");
        let frame = move_first.advance().unwrap();
        assert_eq!(frame.cleared, vec![Position::new(2, 0, 3)]);
        assert_eq!(frame.vessel_after, Position::new(2, 0, 1));
        assert_eq!(move_first.field().mine_count(), 0);
    }

    #[test]
    fn each_step_dives_and_counts_stats() {
        let mut e = evaluator(".....\n..e..\n.....\n", "north beta\nsouth\n");
        let frame = e.advance().unwrap();
        assert_eq!(frame.step, 1);
        assert_eq!(frame.vessel_before, Position::new(2, 1, 0));
        assert_eq!(frame.vessel_after, Position::new(2, 0, 1));
        // Beta from (2, 0) hits (2, 1).
        assert_eq!(frame.cleared, vec![Position::new(2, 1, 5)]);
        assert_eq!(e.stats().volleys_fired, 1);
        assert_eq!(e.stats().distance_moved, 1);
        assert!(e.is_complete());
        assert!(e.advance().is_none());
    }

    #[test]
    fn passing_a_mine_ends_the_run_with_zero() {
        let report = evaluator("a...c\n", "west\ngamma\n").run();
        assert_eq!(report.frames.len(), 1);
        assert_eq!(report.frames[0].after, "..*...b\n");
        assert_eq!(report.outcome.termination, Termination::MinePassed);
        assert_eq!(report.outcome.score, 0);
        assert_eq!(report.outcome.mines_remaining, 2);
        assert_eq!(report.outcome.to_string(), "fail (0)");
    }

    #[test]
    fn clearing_early_scores_one() {
        let report = evaluator("b\n", "gamma\nnorth\n").run();
        assert_eq!(report.outcome.termination, Termination::AllMinesCleared);
        assert_eq!(report.outcome.steps_taken, 1);
        assert_eq!(report.outcome.score, 1);
        assert_eq!(report.outcome.to_string(), "pass (1)");
    }

    #[test]
    fn clearing_on_the_last_step_applies_penalties() {
        let report = evaluator("...\n...\n..c\n", "east\ndelta\n").run();
        assert_eq!(report.outcome.termination, Termination::AllMinesCleared);
        assert_eq!(
            report.outcome.stats,
            RunStats {
                initial_mines: 1,
                volleys_fired: 1,
                distance_moved: 1,
            }
        );
        // 10 - min(5, 5) - min(2, 3)
        assert_eq!(report.outcome.score, 3);
    }

    #[test]
    fn penalties_are_capped() {
        // Two mines, cleared on the final step after lots of firing and moving.
        let report = evaluator(
            "...\n.d.\n.d.\n",
            "alpha north\nalpha south\nalpha east\nwest delta\n",
        )
        .run();
        assert_eq!(report.outcome.stats.volleys_fired, 4);
        assert_eq!(report.outcome.stats.distance_moved, 4);
        // 20 - min(20, 10) - min(8, 6)
        assert_eq!(report.outcome.score, 4);
    }

    #[test]
    fn running_out_of_script_fails() {
        let report = evaluator("...\n...\n..z\n", "gamma\n").run();
        assert_eq!(report.outcome.termination, Termination::ScriptExhausted);
        assert!(!report.outcome.passed());
    }

    #[test]
    fn empty_field_passes_immediately() {
        let report = evaluator("...\n", "gamma\n").run();
        assert!(report.frames.is_empty());
        assert_eq!(report.outcome.termination, Termination::AllMinesCleared);
        assert_eq!(report.outcome.score, 1);
    }

    #[test]
    fn larger_move_rate_scales_translation_and_distance() {
        let config = SimConfig {
            move_rate: 2,
            dive_rate: 3,
            ..SimConfig::default()
        };
        let mut e = Evaluator::new(
            Field::parse(".....\n").unwrap(),
            Script::parse("west\n", 2).unwrap(),
            config.clone(),
        )
        .unwrap();
        // No mines: the run is already complete.
        assert!(e.advance().is_none());

        let mut e = Evaluator::new(
            Field::parse("....z\n").unwrap(),
            Script::parse("west\n", 2).unwrap(),
            config,
        )
        .unwrap();
        let frame = e.advance().unwrap();
        assert_eq!(frame.vessel_after, Position::new(0, 0, 3));
        assert_eq!(e.stats().distance_moved, 2);
    }
}
