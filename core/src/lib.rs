#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Runner generator.
//!
//! This crate defines the vocabulary that connects the grid owned by the
//! world crate with the generation systems. Systems mutate a grid in place
//! and describe every enrichment they perform by pushing
//! [`GenerationEvent`] values into a caller-provided sink, which lets the
//! generation pipeline audit and report on an accepted maze without the
//! systems knowing about each other.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

mod config;
mod error;

pub use config::{
    BranchTuning, GeneratorConfig, GoalStrategy, GoalTuning, LoopTuning, PruningTuning,
};
pub use error::{ConfigError, GenerationError};

/// Smallest accepted extent for either grid axis.
pub const MIN_DIMENSION: u32 = 5;

/// Largest accepted extent for either grid axis.
pub const MAX_DIMENSION: u32 = 4_095;

/// Fixed entry point shared by every generated maze.
pub const START: Position = Position::new(1, 1);

/// Location of a single grid cell expressed as row and column indices.
///
/// Coordinates are signed so callers can probe cells just outside the grid
/// (for example `(-1, 0)`) while doing collision checks; such positions are
/// simply reported as walls by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: i32,
    column: i32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the position.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based column index of the position.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Moves `distance` cells in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction, distance: i32) -> Self {
        let (row_delta, column_delta) = direction.delta();
        Self {
            row: self.row + row_delta * distance,
            column: self.column + column_delta * distance,
        }
    }

    /// Immediate orthogonal neighbours in [`Direction::ALL`] order.
    #[must_use]
    pub const fn neighbors(self) -> [Position; 4] {
        [
            self.step(Direction::North, 1),
            self.step(Direction::East, 1),
            self.step(Direction::South, 1),
            self.step(Direction::West, 1),
        ]
    }

    /// Cell lying halfway between two positions on the same axis.
    #[must_use]
    pub const fn midpoint(self, other: Position) -> Self {
        Self {
            row: (self.row + other.row) / 2,
            column: (self.column + other.column) / 2,
        }
    }

    /// Reports whether both indices are odd, i.e. the position is a carvable room.
    #[must_use]
    pub const fn is_cell_center(&self) -> bool {
        self.row.rem_euclid(2) == 1 && self.column.rem_euclid(2) == 1
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Cardinal directions used for carving and neighbour scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing column indices.
    East,
    /// Toward increasing row indices.
    South,
    /// Toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Row and column delta of a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Topological state stored for every grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Impassable cell.
    #[default]
    Wall,
    /// Open corridor cell.
    Path,
}

impl CellState {
    /// Reports whether the cell blocks movement.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, CellState::Wall)
    }
}

/// Semantic role of a cell as observed by consumers of a finished maze.
///
/// Start and goal are resolved from coordinates at query time and are never
/// stored in the grid itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// Impassable cell.
    Wall,
    /// Open corridor cell.
    Path,
    /// The fixed entry cell.
    Start,
    /// The cell the player must reach.
    Goal,
}

/// Named maze size presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 11 × 11 grid.
    Easy,
    /// 15 × 15 grid.
    #[default]
    Medium,
    /// 21 × 21 grid.
    Hard,
    /// 31 × 31 grid.
    Extreme,
}

impl Difficulty {
    /// Every preset ordered from smallest to largest.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    /// Grid extent associated with the preset.
    #[must_use]
    pub const fn dimensions(self) -> Dimensions {
        match self {
            Difficulty::Easy => Dimensions::new(11, 11),
            Difficulty::Medium => Dimensions::new(15, 15),
            Difficulty::Hard => Dimensions::new(21, 21),
            Difficulty::Extreme => Dimensions::new(31, 31),
        }
    }

    /// Lowercase name used in configuration files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Extreme => "extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownDifficulty(trimmed.to_owned()))
    }
}

/// Number of rows and columns making up a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    rows: u32,
    columns: u32,
}

impl Dimensions {
    /// Creates a new, unvalidated dimension pair.
    #[must_use]
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.rows as u64 * self.columns as u64
    }

    /// Checks that both axes are odd and within the supported range.
    pub fn validate(self) -> Result<Self, ConfigError> {
        for (axis, value) in [("rows", self.rows), ("columns", self.columns)] {
            if value < MIN_DIMENSION {
                return Err(ConfigError::DimensionTooSmall { axis, value });
            }
            if value > MAX_DIMENSION {
                return Err(ConfigError::DimensionTooLarge { axis, value });
            }
            if value % 2 == 0 {
                return Err(ConfigError::EvenDimension { axis, value });
            }
        }
        Ok(self)
    }
}

impl From<Difficulty> for Dimensions {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.dimensions()
    }
}

/// Record of a single mutation or decision made while building a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationEvent {
    /// The perfect-maze carve finished.
    PerfectMazeCarved {
        /// Number of cell centers and connectors opened.
        path_cells: usize,
    },
    /// A connector was opened between two existing path cells.
    LoopCarved {
        /// Wall cell that was converted to a path.
        connector: Position,
    },
    /// A winding dead-end branch was carved.
    BranchCarved {
        /// Existing path cell the branch hangs off.
        origin: Position,
        /// Number of cells opened by the branch itself.
        length: usize,
    },
    /// A short spur was carved off a branch.
    SideBranchCarved {
        /// Branch cell the spur hangs off.
        origin: Position,
        /// Number of cells opened by the spur.
        length: usize,
    },
    /// A branch tip was joined to a nearby path, closing an extra loop.
    BranchReconnected {
        /// Wall cell that was converted to a path.
        connector: Position,
    },
    /// A degenerate dead end was filled back in.
    DeadEndRemoved {
        /// Cell converted back to a wall.
        cell: Position,
    },
    /// A degenerate dead end was lengthened instead of removed.
    DeadEndExtended {
        /// Former dead-end cell.
        cell: Position,
        /// Number of cells appended past it.
        length: usize,
    },
    /// The goal was chosen.
    GoalPlaced {
        /// Chosen goal cell.
        goal: Position,
        /// Manhattan distance between start and goal.
        distance: u32,
    },
}
