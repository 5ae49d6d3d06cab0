//! Breadth-first walking distances over the open cells of a grid.

use std::collections::VecDeque;

use maze_runner_core::Position;

use crate::Grid;

/// Dense walking-distance grid seeded from a single source cell.
///
/// The field mirrors the grid's dimensions and stores the breadth-first search
/// results over non-wall cells. Distances default to `u32::MAX` for walls and
/// unreachable cells so callers can distinguish them from traversable tiles.
#[derive(Clone, Debug, Default)]
pub struct DistanceField {
    rows: u32,
    columns: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Builds the field for the provided grid and source cell.
    #[must_use]
    pub fn from_source(grid: &Grid, source: Position) -> Self {
        let mut field = Self::default();
        field.rebuild(grid, source);
        field
    }

    /// Rebuilds the walking distances using a breadth-first search from `source`.
    pub fn rebuild(&mut self, grid: &Grid, source: Position) {
        let cell_count = usize::try_from(grid.dimensions().area()).unwrap_or(0);
        self.rows = grid.rows();
        self.columns = grid.columns();

        if self.distances.len() != cell_count {
            self.distances = vec![u32::MAX; cell_count];
        } else {
            self.distances.fill(u32::MAX);
        }

        if grid.is_wall(source) {
            return;
        }

        let Some(source_index) = self.index(source) else {
            return;
        };
        self.distances[source_index] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = self.index(cell) else {
                continue;
            };
            let next_distance = self.distances[current_index].saturating_add(1);

            for neighbor in cell.neighbors() {
                if grid.is_wall(neighbor) {
                    continue;
                }

                let Some(neighbor_index) = self.index(neighbor) else {
                    continue;
                };

                if self.distances[neighbor_index] <= next_distance {
                    continue;
                }

                self.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }
    }

    /// Walking distance to the provided cell, if it is reachable.
    #[must_use]
    pub fn distance(&self, position: Position) -> Option<u32> {
        self.index(position)
            .and_then(|offset| self.distances.get(offset).copied())
            .filter(|&distance| distance != u32::MAX)
    }

    /// Number of cells reachable from the source, the source included.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.distances
            .iter()
            .filter(|&&distance| distance != u32::MAX)
            .count()
    }

    /// Reachable cell with the greatest walking distance.
    ///
    /// Ties resolve to the first such cell in row-major order.
    #[must_use]
    pub fn farthest(&self) -> Option<(Position, u32)> {
        let columns = usize::try_from(self.columns).ok()?;
        if columns == 0 {
            return None;
        }

        let mut best: Option<(usize, u32)> = None;
        for (offset, &distance) in self.distances.iter().enumerate() {
            if distance == u32::MAX {
                continue;
            }
            if best.map_or(true, |(_, best_distance)| distance > best_distance) {
                best = Some((offset, distance));
            }
        }

        let (offset, distance) = best?;
        let row = i32::try_from(offset / columns).ok()?;
        let column = i32::try_from(offset % columns).ok()?;
        Some((Position::new(row, column), distance))
    }

    fn index(&self, position: Position) -> Option<usize> {
        let row = u32::try_from(position.row()).ok()?;
        let column = u32::try_from(position.column()).ok()?;
        if row >= self.rows || column >= self.columns {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        usize::try_from(row)
            .ok()?
            .checked_mul(width)?
            .checked_add(usize::try_from(column).ok()?)
    }
}

/// Reports whether `to` can be reached from `from` walking only over open cells.
#[must_use]
pub fn is_reachable(grid: &Grid, from: Position, to: Position) -> bool {
    shortest_path_len(grid, from, to).is_some()
}

/// Number of steps on a shortest walk between two open cells.
#[must_use]
pub fn shortest_path_len(grid: &Grid, from: Position, to: Position) -> Option<u32> {
    if grid.is_wall(from) || grid.is_wall(to) {
        return None;
    }
    DistanceField::from_source(grid, from).distance(to)
}
