#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid storage and finished-maze state for Maze Runner.
//!
//! Generation systems mutate a [`Grid`] in place while a maze is being built.
//! Once the pipeline accepts an attempt the grid is sealed inside a [`Maze`],
//! which only exposes read-only queries from then on.

use std::fmt;

use maze_runner_core::{CellType, Dimensions, Position};

mod grid;
pub mod navigation;

pub use grid::{Grid, PathCells};

/// A finished, solvable maze with a fixed start and goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    start: Position,
    goal: Position,
}

impl Maze {
    /// Seals a generated grid together with its start and goal cells.
    ///
    /// The generation pipeline only calls this after the goal has been proven
    /// reachable from the start.
    #[must_use]
    pub fn new(grid: Grid, start: Position, goal: Position) -> Self {
        Self { grid, start, goal }
    }

    /// Number of rows in the maze.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    /// Number of columns in the maze.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.grid.columns()
    }

    /// Extent of the maze.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Cell the player starts on.
    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    /// Cell the player must reach.
    #[must_use]
    pub fn goal(&self) -> Position {
        self.goal
    }

    /// Underlying wall/path layout.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Semantic role of a cell. Positions outside the maze are walls.
    #[must_use]
    pub fn cell_type(&self, row: i32, column: i32) -> CellType {
        let position = Position::new(row, column);
        if position == self.start {
            CellType::Start
        } else if position == self.goal {
            CellType::Goal
        } else if self.grid.is_wall(position) {
            CellType::Wall
        } else {
            CellType::Path
        }
    }

    /// Reports whether the cell blocks movement. Positions outside the maze are walls.
    #[must_use]
    pub fn is_wall(&self, row: i32, column: i32) -> bool {
        self.grid.is_wall(Position::new(row, column))
    }

    /// Reports whether a player may step onto the cell.
    #[must_use]
    pub fn is_valid_move(&self, row: i32, column: i32) -> bool {
        let position = Position::new(row, column);
        self.grid.contains(position) && !self.grid.is_wall(position)
    }

    /// Number of steps on a shortest walk from start to goal.
    #[must_use]
    pub fn shortest_path_len(&self) -> Option<u32> {
        navigation::shortest_path_len(&self.grid, self.start, self.goal)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        grid::render(f, &self.grid, |position| {
            if position == self.start {
                Some('S')
            } else if position == self.goal {
                Some('G')
            } else {
                None
            }
        })
    }
}

/// Topology queries shared by the generation systems.
pub mod query {
    use maze_runner_core::Position;

    use super::Grid;

    /// Number of orthogonal neighbours that are walls; outside cells count as walls.
    #[must_use]
    pub fn wall_neighbor_count(grid: &Grid, position: Position) -> usize {
        position
            .neighbors()
            .into_iter()
            .filter(|&neighbor| grid.is_wall(neighbor))
            .count()
    }

    /// Open orthogonal neighbours of a cell.
    pub fn open_neighbors(grid: &Grid, position: Position) -> impl Iterator<Item = Position> + '_ {
        position
            .neighbors()
            .into_iter()
            .filter(move |&neighbor| grid.is_path(neighbor))
    }

    /// Reports whether the cell is a corridor with exactly one open neighbour.
    #[must_use]
    pub fn is_dead_end(grid: &Grid, position: Position) -> bool {
        grid.is_path(position) && wall_neighbor_count(grid, position) == 3
    }

    /// Reports whether the cell is a corridor with two or more open neighbours.
    #[must_use]
    pub fn is_junction(grid: &Grid, position: Position) -> bool {
        grid.is_path(position) && wall_neighbor_count(grid, position) <= 2
    }

    /// Reports whether `target` may be opened while growing a corridor from `from`.
    ///
    /// The target must be an interior wall and none of its neighbours other
    /// than `from` may already be open, otherwise the new cell would merge with
    /// an unrelated corridor.
    #[must_use]
    pub fn can_extend_into(grid: &Grid, target: Position, from: Position) -> bool {
        grid.is_interior(target)
            && grid.is_wall(target)
            && target
                .neighbors()
                .into_iter()
                .all(|neighbor| neighbor == from || !grid.is_path(neighbor))
    }

    /// Every corridor cell with exactly one open neighbour, in row-major order.
    #[must_use]
    pub fn dead_ends(grid: &Grid) -> Vec<Position> {
        grid.interior_positions()
            .filter(|&position| is_dead_end(grid, position))
            .collect()
    }

    /// Top-left corners of every 2 × 2 block made entirely of open cells.
    #[must_use]
    pub fn open_blocks(grid: &Grid) -> Vec<Position> {
        grid.interior_positions()
            .filter(|&corner| {
                [(0, 0), (0, 1), (1, 0), (1, 1)]
                    .into_iter()
                    .all(|(row, column)| {
                        grid.is_path(Position::new(corner.row() + row, corner.column() + column))
                    })
            })
            .collect()
    }
}
