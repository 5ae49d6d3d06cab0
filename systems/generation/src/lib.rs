#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! End-to-end maze generation with validation and bounded regeneration.
//!
//! Each attempt starts from a fully walled grid and runs the systems in a
//! fixed order: perfect carve, loop injection, branch injection, dead-end
//! pruning and goal placement. The attempt is accepted only when the goal is
//! reachable from the start; otherwise the grid is discarded and the pipeline
//! starts over with fresh random draws, up to the configured ceiling.

use log::{error, info, warn};
use maze_runner_core::{
    Difficulty, Dimensions, GenerationError, GenerationEvent, GeneratorConfig, Position, START,
};
use maze_runner_system_branches::{BranchInjector, BranchSummary};
use maze_runner_system_carver::Carver;
use maze_runner_system_goal::GoalPlacement;
use maze_runner_system_loops::LoopInjector;
use maze_runner_system_pruning::{DeadEndPruner, PruneSummary};
use maze_runner_world::{navigation, Grid, Maze};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Statistics describing how an accepted maze was built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Attempts made, the accepted one included.
    pub attempts: u32,
    /// Cells opened by the perfect carve.
    pub path_cells: usize,
    /// Loops opened by the loop injector.
    pub loops: usize,
    /// Branch injection totals.
    pub branches: BranchSummary,
    /// Dead-end pruning totals.
    pub pruning: PruneSummary,
    /// Steps on a shortest walk from start to goal.
    pub solution_length: u32,
    /// Every event recorded while building the accepted attempt.
    pub events: Vec<GenerationEvent>,
}

impl GenerationReport {
    /// Connectors opened by loop injection or branch reconnects.
    ///
    /// These are the only cells allowed to close a 2 × 2 open block.
    #[must_use]
    pub fn loop_closures(&self) -> Vec<Position> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GenerationEvent::LoopCarved { connector }
                | GenerationEvent::BranchReconnected { connector } => Some(*connector),
                _ => None,
            })
            .collect()
    }
}

/// A maze accepted by the pipeline together with its build report.
#[derive(Clone, Debug)]
pub struct Generated {
    /// The finished maze.
    pub maze: Maze,
    /// How the maze was built.
    pub report: GenerationReport,
}

/// Layout produced by one pipeline attempt before validation.
struct Attempt {
    grid: Grid,
    goal: Option<Position>,
    path_cells: usize,
    loops: usize,
    branches: BranchSummary,
    pruning: PruneSummary,
}

/// Maze generator bound to one grid size and configuration.
#[derive(Debug)]
pub struct Generator {
    dimensions: Dimensions,
    config: GeneratorConfig,
    carver: Carver,
    loops: LoopInjector,
    branches: BranchInjector,
    pruner: DeadEndPruner,
    goal: GoalPlacement,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl Generator {
    /// Creates a generator for a difficulty preset with the default tuning.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::assemble(difficulty.dimensions(), GeneratorConfig::default())
    }

    /// Creates a generator for arbitrary dimensions and tuning.
    ///
    /// Both are validated up front so a malformed configuration is reported
    /// here rather than mid-generation.
    pub fn with_config(
        dimensions: impl Into<Dimensions>,
        config: GeneratorConfig,
    ) -> Result<Self, GenerationError> {
        let dimensions = dimensions.into().validate()?;
        config.validate()?;
        Ok(Self::assemble(dimensions, config))
    }

    fn assemble(dimensions: Dimensions, config: GeneratorConfig) -> Self {
        Self {
            dimensions,
            carver: Carver::new(),
            loops: LoopInjector::new(config.loops.clone()),
            branches: BranchInjector::new(config.branches.clone()),
            pruner: DeadEndPruner::new(config.pruning.clone()),
            goal: GoalPlacement::new(config.goal.clone()),
            config,
        }
    }

    /// Grid extent of every maze this generator builds.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Tuning in effect.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds a maze from a deterministic ChaCha stream seeded with `seed`.
    pub fn generate_seeded(&mut self, seed: u64) -> Result<Generated, GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(&mut rng)
    }

    /// Builds a maze from a freshly drawn seed, logging the seed for replay.
    pub fn generate_from_entropy(&mut self) -> Result<Generated, GenerationError> {
        let seed: u64 = rand::thread_rng().gen();
        info!("generating maze from seed {seed:#018x}");
        self.generate_seeded(seed)
    }

    /// Builds a maze whose goal is reachable from the start.
    pub fn generate<R>(&mut self, rng: &mut R) -> Result<Generated, GenerationError>
    where
        R: Rng + ?Sized,
    {
        self.generate_where(rng, |_| true)
    }

    /// Builds a maze that is solvable and additionally satisfies `accept`.
    ///
    /// The predicate sees the candidate only after it passed the reachability
    /// check; rejected candidates are regenerated like unsolvable ones.
    pub fn generate_where<R, F>(
        &mut self,
        rng: &mut R,
        mut accept: F,
    ) -> Result<Generated, GenerationError>
    where
        R: Rng + ?Sized,
        F: FnMut(&Maze) -> bool,
    {
        let mut events = Vec::new();

        for attempt in 1..=self.config.max_attempts {
            events.clear();
            let candidate = self.run_pipeline(rng, &mut events)?;

            let Some(goal) = candidate.goal else {
                warn!("attempt {attempt}: no goal candidate, regenerating");
                continue;
            };

            let Some(solution_length) = navigation::shortest_path_len(&candidate.grid, START, goal)
            else {
                warn!("attempt {attempt}: goal {goal} unreachable from {START}, regenerating");
                continue;
            };

            let maze = Maze::new(candidate.grid, START, goal);
            if !accept(&maze) {
                warn!("attempt {attempt}: maze rejected by caller, regenerating");
                continue;
            }

            info!(
                "generated {}x{} maze on attempt {attempt}: goal {goal}, solution {solution_length} steps",
                maze.rows(),
                maze.columns()
            );

            let report = GenerationReport {
                attempts: attempt,
                path_cells: candidate.path_cells,
                loops: candidate.loops,
                branches: candidate.branches,
                pruning: candidate.pruning,
                solution_length,
                events,
            };
            return Ok(Generated { maze, report });
        }

        error!(
            "giving up after {} attempts on a {}x{} maze",
            self.config.max_attempts,
            self.dimensions.rows(),
            self.dimensions.columns()
        );
        Err(GenerationError::RetriesExhausted {
            attempts: self.config.max_attempts,
        })
    }

    fn run_pipeline<R>(
        &mut self,
        rng: &mut R,
        events: &mut Vec<GenerationEvent>,
    ) -> Result<Attempt, GenerationError>
    where
        R: Rng + ?Sized,
    {
        let mut grid = Grid::new(self.dimensions)?;

        let path_cells = self.carver.carve(&mut grid, START, rng, events);
        let loops = self.loops.inject(&mut grid, &path_cells, rng, events);
        let branches = self.branches.inject(&mut grid, &path_cells, rng, events);
        let pruning = self.pruner.prune(&mut grid, &[START], rng, events);
        let goal = self.goal.place(&grid, START, rng, events);

        Ok(Attempt {
            grid,
            goal,
            path_cells: path_cells.len(),
            loops,
            branches,
            pruning,
        })
    }
}

/// Builds a maze for a difficulty preset from a deterministic seed.
pub fn generate(difficulty: Difficulty, seed: u64) -> Result<Maze, GenerationError> {
    Generator::new(difficulty)
        .generate_seeded(seed)
        .map(|generated| generated.maze)
}
