#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Winding dead-end branches carved off existing corridors.
//!
//! A branch grows one cell at a time from a registered path cell. Every cell
//! it opens must be an interior wall whose only open neighbour is the cell
//! the branch just came from, so a branch can never brush against an
//! unrelated corridor and merge with it. The same rule governs the short
//! side branches sprouted along the way. The only deliberate merge is the
//! optional reconnect at the tip, which is always recorded as its own event.

use log::debug;
use maze_runner_core::{BranchTuning, Dimensions, Direction, GenerationEvent, Position};
use maze_runner_world::{query, Grid, PathCells};
use rand::{seq::SliceRandom, Rng};

/// Totals collected over one injection run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BranchSummary {
    /// Number of macro branches carved.
    pub branches: usize,
    /// Number of side branches sprouted off macro branches.
    pub side_branches: usize,
    /// Number of branch tips joined to a nearby corridor.
    pub reconnects: usize,
    /// Total cells opened, connectors included.
    pub cells_opened: usize,
}

/// Carves macro branches, side branches and reconnects.
#[derive(Clone, Debug)]
pub struct BranchInjector {
    tuning: BranchTuning,
}

impl Default for BranchInjector {
    fn default() -> Self {
        Self::new(BranchTuning::default())
    }
}

impl BranchInjector {
    /// Creates a new injector with the provided tuning.
    #[must_use]
    pub fn new(tuning: BranchTuning) -> Self {
        Self { tuning }
    }

    /// Number of branch attempts made for a grid of the given size.
    #[must_use]
    pub fn attempt_budget(&self, dimensions: Dimensions) -> usize {
        (dimensions.area() as f64 * self.tuning.density) as usize
    }

    /// Runs the attempt budget against the grid.
    pub fn inject<R>(
        &self,
        grid: &mut Grid,
        path_cells: &PathCells,
        rng: &mut R,
        out: &mut Vec<GenerationEvent>,
    ) -> BranchSummary
    where
        R: Rng + ?Sized,
    {
        let attempts = self.attempt_budget(grid.dimensions());
        let mut summary = BranchSummary::default();

        for _ in 0..attempts {
            let Some(origin) = path_cells.choose(rng) else {
                break;
            };

            let mut headings = Direction::ALL;
            headings.shuffle(rng);

            if let Some(heading) = headings
                .into_iter()
                .find(|&heading| self.can_branch(grid, origin, heading))
            {
                self.carve_branch(grid, origin, heading, rng, out, &mut summary);
            }
        }

        debug!(
            "carved {} branches, {} side branches and {} reconnects from {attempts} attempts",
            summary.branches, summary.side_branches, summary.reconnects
        );
        summary
    }

    /// Reports whether a branch may leave `origin` heading in `heading`.
    ///
    /// The first cell must be openable without touching another corridor and
    /// the next `min_length` cells straight ahead must all be interior walls.
    #[must_use]
    pub fn can_branch(&self, grid: &Grid, origin: Position, heading: Direction) -> bool {
        if !grid.is_path(origin) {
            return false;
        }

        let first = origin.step(heading, 1);
        if !query::can_extend_into(grid, first, origin) {
            return false;
        }

        (1..=self.tuning.min_length).all(|distance| {
            let ahead = first.step(heading, distance as i32);
            grid.is_interior(ahead) && grid.is_wall(ahead)
        })
    }

    fn carve_branch<R>(
        &self,
        grid: &mut Grid,
        origin: Position,
        mut heading: Direction,
        rng: &mut R,
        out: &mut Vec<GenerationEvent>,
        summary: &mut BranchSummary,
    ) where
        R: Rng + ?Sized,
    {
        let target_length = if self.tuning.max_length > self.tuning.min_length {
            rng.gen_range(self.tuning.min_length..self.tuning.max_length)
        } else {
            self.tuning.min_length
        };

        let mut tip = origin.step(heading, 1);
        grid.open(tip);
        let mut length = 1;

        for step in 0..target_length {
            let mut admissible = [Direction::North; 4];
            let mut count = 0;
            for direction in Direction::ALL {
                if query::can_extend_into(grid, tip.step(direction, 1), tip) {
                    admissible[count] = direction;
                    count += 1;
                }
            }

            let options = &admissible[..count];
            let Some(&fallback) = options.choose(rng) else {
                break;
            };
            if !(options.contains(&heading) && roll(rng, self.tuning.straight_bias)) {
                heading = fallback;
            }

            tip = tip.step(heading, 1);
            grid.open(tip);
            length += 1;

            if step >= self.tuning.side_branch_delay && roll(rng, self.tuning.side_branch_chance)
            {
                if let Some(opened) = self.carve_side_branch(grid, tip, rng, out) {
                    summary.side_branches += 1;
                    summary.cells_opened += opened;
                }
            }
        }

        out.push(GenerationEvent::BranchCarved { origin, length });
        summary.branches += 1;
        summary.cells_opened += length;

        if roll(rng, self.tuning.reconnect_chance) {
            if let Some(connector) = reconnect(grid, tip, rng) {
                out.push(GenerationEvent::BranchReconnected { connector });
                summary.reconnects += 1;
                summary.cells_opened += 1;
            }
        }
    }

    /// Sprouts a short straight spur off `anchor`, returning the cells opened.
    fn carve_side_branch<R>(
        &self,
        grid: &mut Grid,
        anchor: Position,
        rng: &mut R,
        out: &mut Vec<GenerationEvent>,
    ) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);

        let direction = directions
            .into_iter()
            .find(|&direction| query::can_extend_into(grid, anchor.step(direction, 1), anchor))?;

        let mut tip = anchor.step(direction, 1);
        grid.open(tip);
        let mut length = 1;

        let extension = rng.gen_range(0..=self.tuning.side_branch_max_extension);
        for _ in 0..extension {
            let next = tip.step(direction, 1);
            if !query::can_extend_into(grid, next, tip) {
                break;
            }
            grid.open(next);
            tip = next;
            length += 1;
        }

        out.push(GenerationEvent::SideBranchCarved {
            origin: anchor,
            length,
        });
        Some(length)
    }
}

/// Opens the wall next to `tip` when the cell beyond it is already a corridor.
fn reconnect<R>(grid: &mut Grid, tip: Position, rng: &mut R) -> Option<Position>
where
    R: Rng + ?Sized,
{
    let mut directions = Direction::ALL;
    directions.shuffle(rng);

    let connector = directions.into_iter().find_map(|direction| {
        let connector = tip.step(direction, 1);
        let beyond = tip.step(direction, 2);
        (grid.is_interior(connector) && grid.is_wall(connector) && grid.is_path(beyond))
            .then_some(connector)
    })?;

    grid.open(connector);
    Some(connector)
}

fn roll<R>(rng: &mut R, chance: f64) -> bool
where
    R: Rng + ?Sized,
{
    rng.gen::<f64>() < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn corridor_grid() -> Grid {
        let mut grid = Grid::new(Dimensions::new(11, 11)).expect("valid dimensions");
        for column in 1..=9 {
            grid.open(Position::new(1, column));
        }
        grid
    }

    #[test]
    fn can_branch_requires_clear_lookahead() {
        let grid = corridor_grid();
        let injector = BranchInjector::default();

        assert!(injector.can_branch(&grid, Position::new(1, 5), Direction::South));
        assert!(
            !injector.can_branch(&grid, Position::new(1, 5), Direction::North),
            "border blocks the branch"
        );
        assert!(
            !injector.can_branch(&grid, Position::new(1, 5), Direction::East),
            "neighbouring cell is already open"
        );
        assert!(
            !injector.can_branch(&grid, Position::new(5, 5), Direction::South),
            "branches start from open cells only"
        );
    }

    #[test]
    fn can_branch_rejects_path_within_lookahead() {
        let mut grid = corridor_grid();
        grid.open(Position::new(5, 5));
        let injector = BranchInjector::default();

        assert!(!injector.can_branch(&grid, Position::new(1, 5), Direction::South));
        assert!(injector.can_branch(&grid, Position::new(1, 3), Direction::South));
    }

    #[test]
    fn can_branch_rejects_first_cell_touching_other_corridor() {
        let mut grid = corridor_grid();
        grid.open(Position::new(2, 4));
        let injector = BranchInjector::default();

        assert!(!injector.can_branch(&grid, Position::new(1, 5), Direction::South));
    }

    #[test]
    fn reconnect_opens_wall_before_existing_corridor() {
        let mut grid = corridor_grid();
        grid.open(Position::new(3, 5));
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let connector = reconnect(&mut grid, Position::new(3, 5), &mut rng);

        assert_eq!(connector, Some(Position::new(2, 5)));
        assert!(grid.is_path(Position::new(2, 5)));
    }

    #[test]
    fn reconnect_without_nearby_corridor_does_nothing() {
        let mut grid = corridor_grid();
        grid.open(Position::new(5, 5));
        let snapshot = grid.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        assert_eq!(reconnect(&mut grid, Position::new(5, 5), &mut rng), None);
        assert_eq!(grid, snapshot);
    }
}
