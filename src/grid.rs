//! Discrete grid coordinates and the eight compass directions.
//!
//! The map is an 8-connected grid: every legal move between adjacent cells
//! changes each axis by at most one, so every edge bearing is a multiple of
//! 45°. `+x` points east and `+y` points north.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer cell index into the world grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `direction`.
    pub fn step(&self, direction: Direction) -> GridCoord {
        let (dx, dy) = direction.delta();
        GridCoord::new(self.x + dx, self.y + dy)
    }

    /// Chessboard distance: the number of 8-connected steps between cells.
    pub fn chebyshev(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass direction of an exit. `N` is `+y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

/// All eight directions in counter-clockwise order starting east, matching
/// the sector layout of [`Direction::from_offset`].
pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::E,
    Direction::NE,
    Direction::N,
    Direction::NW,
    Direction::W,
    Direction::SW,
    Direction::S,
    Direction::SE,
];

impl Direction {
    /// Unit grid offset `(dx, dy)` for one step this way.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::N => (0, 1),
            Direction::NE => (1, 1),
            Direction::E => (1, 0),
            Direction::SE => (1, -1),
            Direction::S => (0, -1),
            Direction::SW => (-1, -1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, 1),
        }
    }

    /// The reverse direction. `opposite` is an involution.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
        }
    }

    /// Bucket a world-space offset into one of the eight 45°-wide compass
    /// sectors centred on the cardinals.
    pub fn from_offset(dx: f64, dy: f64) -> Direction {
        let angle = dy.atan2(dx).to_degrees();
        // Shift by half a sector so each bucket is centred on its cardinal.
        let sector = ((angle + 360.0 + 22.5) / 45.0).floor() as usize % 8;
        ALL_DIRECTIONS[sector]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Direction::N => "north",
            Direction::NE => "northeast",
            Direction::E => "east",
            Direction::SE => "southeast",
            Direction::S => "south",
            Direction::SW => "southwest",
            Direction::W => "west",
            Direction::NW => "northwest",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
