//! Dense cell storage backing every maze.

use std::fmt;

use maze_runner_core::{CellState, ConfigError, Dimensions, Position};
use rand::Rng;

/// Rectangular array of wall/path cells stored in row-major order.
///
/// The outermost ring of cells is permanently walled: [`Grid::open`] ignores
/// border positions, so no generation pass can break the invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a fully walled grid after validating the requested dimensions.
    pub fn new(dimensions: Dimensions) -> Result<Self, ConfigError> {
        let dimensions = dimensions.validate()?;
        let cell_count = usize::try_from(dimensions.area()).unwrap_or(usize::MAX);
        Ok(Self {
            dimensions,
            cells: vec![CellState::Wall; cell_count],
        })
    }

    /// Number of rows in the grid.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.dimensions.rows()
    }

    /// Number of columns in the grid.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.dimensions.columns()
    }

    /// Extent of the grid.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Reports whether the position lies anywhere inside the grid.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Reports whether the position lies strictly inside the border ring.
    #[must_use]
    pub fn is_interior(&self, position: Position) -> bool {
        position.row() > 0
            && position.column() > 0
            && i64::from(position.row()) < i64::from(self.rows()) - 1
            && i64::from(position.column()) < i64::from(self.columns()) - 1
    }

    /// State of the cell, or `None` when the position is outside the grid.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<CellState> {
        self.index(position).map(|index| self.cells[index])
    }

    /// Reports whether the cell blocks movement; outside positions are walls.
    #[must_use]
    pub fn is_wall(&self, position: Position) -> bool {
        self.get(position).map_or(true, CellState::is_wall)
    }

    /// Reports whether the cell is an in-bounds corridor.
    #[must_use]
    pub fn is_path(&self, position: Position) -> bool {
        self.get(position) == Some(CellState::Path)
    }

    /// Converts an interior cell into a corridor. Border positions are left untouched.
    pub fn open(&mut self, position: Position) {
        if !self.is_interior(position) {
            return;
        }
        if let Some(index) = self.index(position) {
            self.cells[index] = CellState::Path;
        }
    }

    /// Converts a cell back into a wall.
    pub fn close(&mut self, position: Position) {
        if let Some(index) = self.index(position) {
            self.cells[index] = CellState::Wall;
        }
    }

    /// Restores every cell to a wall.
    pub fn fill_walls(&mut self) {
        self.cells.fill(CellState::Wall);
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let rows = i32::try_from(self.rows()).unwrap_or(0);
        let columns = i32::try_from(self.columns()).unwrap_or(0);
        (0..rows).flat_map(move |row| (0..columns).map(move |column| Position::new(row, column)))
    }

    /// Every non-border position in row-major order.
    pub fn interior_positions(&self) -> impl Iterator<Item = Position> {
        let rows = i32::try_from(self.rows()).unwrap_or(0);
        let columns = i32::try_from(self.columns()).unwrap_or(0);
        (1..rows - 1)
            .flat_map(move |row| (1..columns - 1).map(move |column| Position::new(row, column)))
    }

    /// Uniformly random non-border position.
    pub fn random_interior<R>(&self, rng: &mut R) -> Position
    where
        R: Rng + ?Sized,
    {
        let rows = i32::try_from(self.rows()).unwrap_or(i32::MAX);
        let columns = i32::try_from(self.columns()).unwrap_or(i32::MAX);
        Position::new(rng.gen_range(1..rows - 1), rng.gen_range(1..columns - 1))
    }

    /// Number of corridor cells.
    #[must_use]
    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_wall()).count()
    }

    fn index(&self, position: Position) -> Option<usize> {
        let row = u32::try_from(position.row()).ok()?;
        let column = u32::try_from(position.column()).ok()?;
        if row >= self.rows() || column >= self.columns() {
            return None;
        }
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        let width = usize::try_from(self.columns()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self, |_| None)
    }
}

/// Writes one line per row, letting `overlay` replace individual glyphs.
pub(crate) fn render<F>(f: &mut fmt::Formatter<'_>, grid: &Grid, overlay: F) -> fmt::Result
where
    F: Fn(Position) -> Option<char>,
{
    let mut current_row = 0;
    for position in grid.positions() {
        if position.row() != current_row {
            writeln!(f)?;
            current_row = position.row();
        }
        let glyph = overlay(position).unwrap_or(if grid.is_wall(position) {
            '█'
        } else {
            ' '
        });
        write!(f, "{glyph}")?;
    }
    writeln!(f)
}

/// Registry of the cells opened by the perfect-maze carve.
///
/// Enrichment passes draw their seed points from this registry. It is owned
/// by a single generation attempt and discarded with it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathCells {
    cells: Vec<Position>,
}

impl PathCells {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Records a carved cell.
    pub fn push(&mut self, position: Position) {
        self.cells.push(position);
    }

    /// Number of recorded cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Recorded cells in carve order.
    #[must_use]
    pub fn as_slice(&self) -> &[Position] {
        &self.cells
    }

    /// Uniformly random recorded cell.
    pub fn choose<R>(&self, rng: &mut R) -> Option<Position>
    where
        R: Rng + ?Sized,
    {
        if self.cells.is_empty() {
            return None;
        }
        Some(self.cells[rng.gen_range(0..self.cells.len())])
    }

    /// Forgets every recorded cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
