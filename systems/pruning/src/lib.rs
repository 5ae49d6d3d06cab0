#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-point cleanup of degenerate dead ends.
//!
//! A dead end is degenerate when its single open neighbour is not a junction,
//! i.e. the two cells form a stub that leads nowhere. Each such cell is either
//! filled back in or, occasionally, lengthened into a proper spur. Scans repeat
//! until a full pass changes nothing, because filling one stub can expose
//! another behind it.

use log::debug;
use maze_runner_core::{Direction, GenerationEvent, Position, PruningTuning};
use maze_runner_world::{query, Grid};
use rand::Rng;

/// Totals collected over one pruning run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PruneSummary {
    /// Number of full scans performed, the final unchanged scan included.
    pub passes: usize,
    /// Number of dead ends filled back in.
    pub removed: usize,
    /// Number of dead ends lengthened instead of removed.
    pub extended: usize,
}

impl PruneSummary {
    /// Reports whether the run modified the grid.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.removed > 0 || self.extended > 0
    }
}

/// Dead-end pruner.
#[derive(Clone, Debug)]
pub struct DeadEndPruner {
    tuning: PruningTuning,
}

impl Default for DeadEndPruner {
    fn default() -> Self {
        Self::new(PruningTuning::default())
    }
}

impl DeadEndPruner {
    /// Creates a new pruner with the provided tuning.
    #[must_use]
    pub fn new(tuning: PruningTuning) -> Self {
        Self { tuning }
    }

    /// Reports whether the cell is a degenerate dead end that may be pruned.
    #[must_use]
    pub fn is_prunable(grid: &Grid, position: Position, protected: &[Position]) -> bool {
        query::is_dead_end(grid, position)
            && !protected.contains(&position)
            && query::open_neighbors(grid, position)
                .all(|neighbor| !query::is_junction(grid, neighbor))
    }

    /// Scans the grid until no degenerate dead end remains.
    ///
    /// Cells listed in `protected` are never touched. A dead end that rolls
    /// an extension but has no room to grow is removed instead, so every
    /// qualifying cell changes the grid and a second run finds nothing.
    pub fn prune<R>(
        &self,
        grid: &mut Grid,
        protected: &[Position],
        rng: &mut R,
        out: &mut Vec<GenerationEvent>,
    ) -> PruneSummary
    where
        R: Rng + ?Sized,
    {
        let rows = i32::try_from(grid.rows()).unwrap_or(0);
        let columns = i32::try_from(grid.columns()).unwrap_or(0);
        let mut summary = PruneSummary::default();

        loop {
            summary.passes += 1;
            let mut changed = false;

            for row in 1..rows - 1 {
                for column in 1..columns - 1 {
                    let cell = Position::new(row, column);
                    if !Self::is_prunable(grid, cell, protected) {
                        continue;
                    }
                    changed = true;

                    if roll(rng, self.tuning.extension_chance) {
                        if let Some(length) = self.extend(grid, cell, rng) {
                            out.push(GenerationEvent::DeadEndExtended { cell, length });
                            summary.extended += 1;
                            continue;
                        }
                    }

                    grid.close(cell);
                    out.push(GenerationEvent::DeadEndRemoved { cell });
                    summary.removed += 1;
                }
            }

            if !changed {
                break;
            }
        }

        debug!(
            "pruning settled after {} passes: {} removed, {} extended",
            summary.passes, summary.removed, summary.extended
        );
        summary
    }

    /// Grows a dead end straight away from its open neighbour.
    ///
    /// Returns the number of cells appended, or `None` when not even the first
    /// cell could be opened without touching another corridor.
    fn extend<R>(&self, grid: &mut Grid, cell: Position, rng: &mut R) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        let open = Direction::ALL
            .into_iter()
            .find(|&direction| grid.is_path(cell.step(direction, 1)))?;
        let heading = open.opposite();

        let first = cell.step(heading, 1);
        if !query::can_extend_into(grid, first, cell) {
            return None;
        }
        grid.open(first);

        let mut tip = first;
        let mut length = 1;
        while roll(rng, self.tuning.continue_chance) {
            let next = tip.step(heading, 1);
            if !query::can_extend_into(grid, next, tip) {
                break;
            }
            grid.open(next);
            tip = next;
            length += 1;
        }

        Some(length)
    }
}

fn roll<R>(rng: &mut R, chance: f64) -> bool
where
    R: Rng + ?Sized,
{
    rng.gen::<f64>() < chance
}
