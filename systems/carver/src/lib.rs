#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomised depth-first carving of a perfect maze.
//!
//! The carver walks the lattice of cell centers (odd row and odd column) in
//! steps of two. From each center it visits the four directions in a freshly
//! shuffled order and tunnels into every neighbouring center that is still a
//! wall, opening the connector between them. The result is a spanning tree:
//! every center is open and connected to the start, and no loops exist yet.

use log::debug;
use maze_runner_core::{Direction, GenerationEvent, Position};
use maze_runner_world::{Grid, PathCells};
use rand::{seq::SliceRandom, Rng};

/// Pending work for one center on the explicit depth-first stack.
#[derive(Clone, Copy, Debug)]
struct Frame {
    cell: Position,
    directions: [Direction; 4],
    next: usize,
}

impl Frame {
    fn shuffled<R>(cell: Position, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Depth-first perfect-maze carver.
///
/// The frame stack is kept between calls so repeated attempts reuse its
/// allocation.
#[derive(Debug, Default)]
pub struct Carver {
    frames: Vec<Frame>,
}

impl Carver {
    /// Creates a new carver with an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Carves a perfect maze rooted at `start` into a fully walled grid.
    ///
    /// Returns every center and connector opened, in carve order. A start
    /// that is not an interior cell center carves nothing.
    pub fn carve<R>(
        &mut self,
        grid: &mut Grid,
        start: Position,
        rng: &mut R,
        out: &mut Vec<GenerationEvent>,
    ) -> PathCells
    where
        R: Rng + ?Sized,
    {
        let mut path_cells = PathCells::new();
        self.frames.clear();

        if !grid.is_interior(start) || !start.is_cell_center() {
            return path_cells;
        }

        grid.open(start);
        path_cells.push(start);
        self.frames.push(Frame::shuffled(start, rng));

        while let Some(frame) = self.frames.last_mut() {
            if frame.next == frame.directions.len() {
                let _ = self.frames.pop();
                continue;
            }

            let direction = frame.directions[frame.next];
            frame.next += 1;
            let cell = frame.cell;

            let neighbor = cell.step(direction, 2);
            if !grid.is_interior(neighbor) || !grid.is_wall(neighbor) {
                continue;
            }

            let connector = cell.step(direction, 1);
            grid.open(connector);
            path_cells.push(connector);
            grid.open(neighbor);
            path_cells.push(neighbor);
            self.frames.push(Frame::shuffled(neighbor, rng));
        }

        debug!(
            "carved perfect maze of {}x{} with {} path cells",
            grid.rows(),
            grid.columns(),
            path_cells.len()
        );
        out.push(GenerationEvent::PerfectMazeCarved {
            path_cells: path_cells.len(),
        });

        path_cells
    }
}
