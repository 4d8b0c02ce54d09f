//! Plain-text transcript of a run.
//!
//! Each step is written as:
//!
//! ```text
//! Step <n>
//!
//! <field before the step>
//!
//! <instructions>
//!
//! <field after the step>
//!
//! ```
//!
//! followed by a single verdict line, `pass (<score>)` or `fail (0)`.

use std::fmt::Write as _;

use crate::evaluator::{RunReport, StepFrame};

fn write_frame(out: &mut String, frame: &StepFrame) {
    // `before` and `after` already end with a newline.
    let _ = write!(
        out,
        "Step {}\n\n{}\n{}\n\n{}\n",
        frame.step, frame.before, frame.instructions, frame.after
    );
}

/// Render every frame of `report` and its verdict.
pub fn render_transcript(report: &RunReport) -> String {
    let mut out = String::new();
    for frame in &report.frames {
        write_frame(&mut out, frame);
    }
    let _ = writeln!(out, "{}", report.outcome);
    out
}

/// Compare two transcripts line by line, ignoring surrounding whitespace on
/// each line and blank lines around the whole block.
pub fn transcripts_match(generated: &str, expected: &str) -> bool {
    generated.trim().lines().map(str::trim).eq(expected.trim().lines().map(str::trim))
}
