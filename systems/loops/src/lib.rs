#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Loop injection that turns the perfect maze into one with alternate routes.

use log::debug;
use maze_runner_core::{Direction, GenerationEvent, LoopTuning};
use maze_runner_world::{Grid, PathCells};
use rand::{seq::SliceRandom, Rng};

/// Opens a bounded number of connectors between open cells two steps apart.
#[derive(Clone, Debug)]
pub struct LoopInjector {
    tuning: LoopTuning,
}

impl Default for LoopInjector {
    fn default() -> Self {
        Self::new(LoopTuning::default())
    }
}

impl LoopInjector {
    /// Creates a new injector with the provided tuning.
    #[must_use]
    pub fn new(tuning: LoopTuning) -> Self {
        Self { tuning }
    }

    /// Number of attempts made for a registry of the given size.
    #[must_use]
    pub fn attempt_budget(&self, path_cell_count: usize) -> usize {
        (path_cell_count as f64 * self.tuning.density) as usize
    }

    /// Runs the attempt budget and returns how many loops were opened.
    ///
    /// Each attempt picks a random registered cell and opens at most one
    /// connector toward an open cell two steps away. Attempts that find no
    /// eligible neighbour are spent without effect.
    pub fn inject<R>(
        &self,
        grid: &mut Grid,
        path_cells: &PathCells,
        rng: &mut R,
        out: &mut Vec<GenerationEvent>,
    ) -> usize
    where
        R: Rng + ?Sized,
    {
        let attempts = self.attempt_budget(path_cells.len());
        let mut carved = 0;

        for _ in 0..attempts {
            let Some(cell) = path_cells.choose(rng) else {
                break;
            };

            let mut directions = Direction::ALL;
            directions.shuffle(rng);

            for direction in directions {
                let neighbor = cell.step(direction, 2);
                let connector = cell.step(direction, 1);
                if grid.is_interior(neighbor)
                    && grid.is_path(neighbor)
                    && grid.is_interior(connector)
                    && grid.is_wall(connector)
                {
                    grid.open(connector);
                    out.push(GenerationEvent::LoopCarved { connector });
                    carved += 1;
                    break;
                }
            }
        }

        debug!("opened {carved} loops from {attempts} attempts");
        carved
    }
}
