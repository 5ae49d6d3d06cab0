#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Goal placement far away from the start.

use log::debug;
use maze_runner_core::{GenerationEvent, GoalStrategy, GoalTuning, Position};
use maze_runner_world::{navigation::DistanceField, Grid};
use rand::Rng;

/// Chooses the goal cell of a finished layout.
#[derive(Clone, Debug)]
pub struct GoalPlacement {
    tuning: GoalTuning,
}

impl Default for GoalPlacement {
    fn default() -> Self {
        Self::new(GoalTuning::default())
    }
}

impl GoalPlacement {
    /// Creates a new placement system with the provided tuning.
    #[must_use]
    pub fn new(tuning: GoalTuning) -> Self {
        Self { tuning }
    }

    /// Picks the goal, or `None` when no open cell other than `start` was found.
    ///
    /// [`GoalStrategy::Sampled`] draws random interior cells, skips walls and
    /// keeps the one with the greatest Manhattan distance from `start`.
    /// [`GoalStrategy::Farthest`] walks the grid and keeps the reachable cell
    /// with the greatest walking distance instead.
    pub fn place<R>(
        &self,
        grid: &Grid,
        start: Position,
        rng: &mut R,
        out: &mut Vec<GenerationEvent>,
    ) -> Option<Position>
    where
        R: Rng + ?Sized,
    {
        let goal = match self.tuning.strategy {
            GoalStrategy::Sampled => self.sample(grid, start, rng),
            GoalStrategy::Farthest => DistanceField::from_source(grid, start)
                .farthest()
                .map(|(cell, _)| cell)
                .filter(|&cell| cell != start),
        };

        match goal {
            Some(goal) => {
                let distance = goal.manhattan_distance(start);
                debug!("placed goal at {goal}, {distance} cells from {start}");
                out.push(GenerationEvent::GoalPlaced { goal, distance });
            }
            None => debug!("no goal candidate found"),
        }

        goal
    }

    fn sample<R>(&self, grid: &Grid, start: Position, rng: &mut R) -> Option<Position>
    where
        R: Rng + ?Sized,
    {
        let mut best: Option<(Position, u32)> = None;

        for _ in 0..self.tuning.samples {
            let candidate = grid.random_interior(rng);
            if grid.is_wall(candidate) {
                continue;
            }

            let distance = candidate.manhattan_distance(start);
            if distance > best.map_or(0, |(_, best_distance)| best_distance) {
                best = Some((candidate, distance));
            }
        }

        best.map(|(cell, _)| cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_runner_core::{Dimensions, START};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn l_shaped() -> Grid {
        let mut grid = Grid::new(Dimensions::new(7, 7)).expect("valid dimensions");
        for index in 1..=5 {
            grid.open(Position::new(1, index));
            grid.open(Position::new(index, 5));
        }
        grid
    }

    #[test]
    fn farthest_picks_end_of_walk() {
        let placement = GoalPlacement::new(GoalTuning {
            strategy: GoalStrategy::Farthest,
            samples: 0,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut events = Vec::new();

        let goal = placement.place(&l_shaped(), START, &mut rng, &mut events);

        assert_eq!(goal, Some(Position::new(5, 5)));
        assert_eq!(
            events,
            vec![GenerationEvent::GoalPlaced {
                goal: Position::new(5, 5),
                distance: 8,
            }]
        );
    }

    #[test]
    fn sampled_goal_is_open_and_not_start() {
        let grid = l_shaped();
        let placement = GoalPlacement::default();
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut events = Vec::new();
            if let Some(goal) = placement.place(&grid, START, &mut rng, &mut events) {
                assert!(grid.is_path(goal));
                assert_ne!(goal, START);
            }
        }
    }

    #[test]
    fn start_alone_yields_no_goal() {
        let mut grid = Grid::new(Dimensions::new(5, 5)).expect("valid dimensions");
        grid.open(START);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut events = Vec::new();

        for strategy in [GoalStrategy::Sampled, GoalStrategy::Farthest] {
            let placement = GoalPlacement::new(GoalTuning {
                strategy,
                samples: 50,
            });
            assert_eq!(placement.place(&grid, START, &mut rng, &mut events), None);
        }
        assert!(events.is_empty());
    }
}
