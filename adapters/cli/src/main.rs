#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates and prints Maze Runner levels.

mod settings;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use maze_runner_core::{Difficulty, Dimensions};
use maze_runner_generation::{Generated, Generator};

/// Generates solvable mazes and prints them as text.
#[derive(Debug, Parser)]
#[command(name = "maze-runner", version, about)]
struct Args {
    /// Size preset: easy, medium, hard or extreme.
    #[arg(short, long, default_value_t = Difficulty::default())]
    difficulty: Difficulty,

    /// Custom odd row count, overriding the preset.
    #[arg(long, requires = "columns")]
    rows: Option<u32>,

    /// Custom odd column count, overriding the preset.
    #[arg(long, requires = "rows")]
    columns: Option<u32>,

    /// Seed for reproducible output; consecutive mazes use consecutive seeds.
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with generator tuning.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of mazes to print.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,

    /// Print generation statistics after each maze.
    #[arg(long)]
    report: bool,

    /// Enable debug logging unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn dimensions(&self) -> Dimensions {
        match (self.rows, self.columns) {
            (Some(rows), Some(columns)) => Dimensions::new(rows, columns),
            _ => self.difficulty.dimensions(),
        }
    }
}

/// Entry point for the Maze Runner command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let stdout = io::stdout();
    run(&args, &mut stdout.lock())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let config = settings::load_config(args.config.as_deref())?;
    let dimensions = args.dimensions();
    debug!(
        "printing {} maze(s) of {}x{}",
        args.count,
        dimensions.rows(),
        dimensions.columns()
    );
    let mut generator =
        Generator::with_config(dimensions, config).context("invalid maze configuration")?;

    for index in 0..args.count {
        let generated = match args.seed {
            Some(seed) => generator.generate_seeded(seed.wrapping_add(u64::from(index))),
            None => generator.generate_from_entropy(),
        }
        .context("maze generation failed")?;

        write!(out, "{}", generated.maze)?;
        if args.report {
            write_report(out, &generated)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn write_report<W: Write>(out: &mut W, generated: &Generated) -> Result<()> {
    let maze = &generated.maze;
    let report = &generated.report;

    writeln!(out, "size:       {}x{}", maze.rows(), maze.columns())?;
    writeln!(out, "start:      {}", maze.start())?;
    writeln!(out, "goal:       {}", maze.goal())?;
    writeln!(out, "solution:   {} steps", report.solution_length)?;
    writeln!(out, "attempts:   {}", report.attempts)?;
    writeln!(out, "path cells: {}", report.path_cells)?;
    writeln!(out, "loops:      {}", report.loops)?;
    writeln!(
        out,
        "branches:   {} ({} side, {} reconnected)",
        report.branches.branches, report.branches.side_branches, report.branches.reconnects
    )?;
    writeln!(
        out,
        "dead ends:  {} removed, {} extended in {} passes",
        report.pruning.removed, report.pruning.extended, report.pruning.passes
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(arguments: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("maze-runner").chain(arguments.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn defaults_to_medium_preset() {
        let args = parse(&[]);
        assert_eq!(args.difficulty, Difficulty::Medium);
        assert_eq!(args.dimensions(), Dimensions::new(15, 15));
        assert_eq!(args.count, 1);
    }

    #[test]
    fn parses_difficulty_names() {
        assert_eq!(parse(&["--difficulty", "EXTREME"]).difficulty, Difficulty::Extreme);
        assert_eq!(parse(&["-d", "easy"]).dimensions(), Dimensions::new(11, 11));
        assert!(Args::try_parse_from(["maze-runner", "-d", "impossible"]).is_err());
    }

    #[test]
    fn custom_dimensions_require_both_axes() {
        assert_eq!(
            parse(&["--rows", "9", "--columns", "13"]).dimensions(),
            Dimensions::new(9, 13)
        );
        assert!(Args::try_parse_from(["maze-runner", "--rows", "9"]).is_err());
    }

    #[test]
    fn run_prints_requested_mazes() {
        let args = parse(&["-d", "easy", "--seed", "7", "-n", "2", "--report"]);
        let mut output = Vec::new();

        run(&args, &mut output).expect("run succeeds");

        let text = String::from_utf8(output).expect("utf-8 output");
        assert_eq!(text.matches('S').count(), 2);
        assert_eq!(text.matches('G').count(), 2);
        assert_eq!(text.matches("attempts:").count(), 2);
    }

    #[test]
    fn run_is_reproducible_with_seed() {
        let args = parse(&["-d", "hard", "--seed", "42"]);
        let mut first = Vec::new();
        let mut second = Vec::new();

        run(&args, &mut first).expect("run succeeds");
        run(&args, &mut second).expect("run succeeds");

        assert_eq!(first, second);
    }

    #[test]
    fn run_rejects_even_dimensions() {
        let args = parse(&["--rows", "10", "--columns", "11", "--seed", "1"]);
        let error = run(&args, &mut Vec::new()).expect_err("even rows rejected");
        assert!(error.to_string().contains("invalid maze configuration"));
    }
}
