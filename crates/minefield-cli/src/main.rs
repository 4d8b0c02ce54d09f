//! `minefield` -- run a vessel script against a mine field and print the
//! transcript.
//!
//! ```text
//! minefield <FIELD> <SCRIPT> [--config <PATH>] [--expect <PATH>] [--json]
//! ```
//!
//! The transcript goes to stdout; logs go to stderr (`RUST_LOG` controls the
//! level, default `warn`). Any error prints `fail (0)` and exits with status 1.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use minefield_engine::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "minefield",
    version,
    about = "Evaluate a mine clearing script against a mine field"
)]
struct Cli {
    /// Field file: one row per line, `.` for empty, `a`-`z`/`A`-`Z` for a
    /// mine's depth.
    field: PathBuf,

    /// Script file: one step per line, at most one firing pattern and one move.
    script: PathBuf,

    /// JSON file overriding simulation settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Expected transcript to compare the generated one against.
    #[arg(long, value_name = "PATH")]
    expect: Option<PathBuf>,

    /// Print the run report as JSON instead of the transcript.
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path).with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    let field = Field::load(&cli.field).with_context(|| format!("loading field {}", cli.field.display()))?;
    let script = Script::load(&cli.script, config.max_step_instructions)
        .with_context(|| format!("loading script {}", cli.script.display()))?;

    let report = Evaluator::new(field, script, config)?.run();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_transcript(&report));
    }

    let Some(expected_path) = cli.expect.as_deref() else {
        return Ok(ExitCode::SUCCESS);
    };
    let expected = std::fs::read_to_string(expected_path)
        .with_context(|| format!("reading expected output {}", expected_path.display()))?;

    if transcripts_match(&render_transcript(&report), &expected) {
        println!("PASS: generated and test output are identical");
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(expected = %expected_path.display(), "transcript differs from expected output");
        println!("FAIL: generated and test output differ");
        Ok(ExitCode::FAILURE)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            println!("fail (0)");
            ExitCode::FAILURE
        }
    }
}
