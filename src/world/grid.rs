//! Static tile map.
//!
//! * Row-major `u8` cells, `0` = open, anything else = wall id.
//! * The outer ring is **always** occupied: rays and the player can never
//!   leave the array, so [`Grid::occupancy`] indexes without a check.

use std::str::FromStr;

use glam::Vec2;
use thiserror::Error;

/// Value stored in one map cell.
pub type Cell = u8;

/// Passable cell.
pub const OPEN: Cell = 0;

/// Reference 10×10 room.
const SAMPLE: [[Cell; 10]; 10] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 1, 1, 0, 1, 0, 0, 1],
    [1, 0, 0, 1, 0, 0, 1, 0, 0, 1],
    [1, 0, 0, 1, 0, 0, 1, 0, 0, 1],
    [1, 0, 0, 1, 0, 1, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Things that make a map unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("map has no rows")]
    Empty,

    /// Anything narrower or shorter than 3 cells has no interior.
    #[error("map is {width}x{height}, need at least 3x3")]
    TooSmall { width: usize, height: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("border cell ({x}, {y}) is open")]
    OpenBorder { x: usize, y: usize },

    #[error("unexpected character `{ch}` at line {line}")]
    BadChar { ch: char, line: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from rows (`rows[y][x]`), checking shape and border.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self, GridError> {
        let first = rows.first().ok_or(GridError::Empty)?;
        let width = first.as_ref().len();
        let height = rows.len();

        let mut cells = Vec::with_capacity(width * height);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }

        let grid = Self {
            width,
            height,
            cells,
        };
        grid.check_border()?;
        Ok(grid)
    }

    /// The built-in reference room.
    pub fn sample() -> Self {
        Self {
            width: 10,
            height: 10,
            cells: SAMPLE.concat(),
        }
    }

    fn check_border(&self) -> Result<(), GridError> {
        if self.width < 3 || self.height < 3 {
            return Err(GridError::TooSmall {
                width: self.width,
                height: self.height,
            });
        }
        let last_x = self.width - 1;
        let last_y = self.height - 1;
        let ring = (0..self.width)
            .flat_map(|x| [(x, 0), (x, last_y)])
            .chain((1..last_y).flat_map(|y| [(0, y), (last_x, y)]));
        for (x, y) in ring {
            if self.occupancy(x, y) == OPEN {
                return Err(GridError::OpenBorder { x, y });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell value at `(x, y)`.
    ///
    /// Panics when out of bounds; callers stay inside thanks to the border.
    #[inline(always)]
    pub fn occupancy(&self, x: usize, y: usize) -> Cell {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) off the map");
        self.cells[y * self.width + x]
    }

    /// Bounds-checked lookup of the cell under a continuous point.
    pub fn cell_at(&self, p: Vec2) -> Option<Cell> {
        if !(p.x >= 0.0 && p.y >= 0.0) {
            return None; // also rejects NaN
        }
        let (x, y) = (p.x.floor() as usize, p.y.floor() as usize);
        (x < self.width && y < self.height).then(|| self.occupancy(x, y))
    }

    #[inline]
    pub fn is_open(&self, p: Vec2) -> bool {
        self.cell_at(p) == Some(OPEN)
    }

    /// Longest straight line that fits inside the map.
    pub fn diagonal(&self) -> f32 {
        Vec2::new(self.width as f32, self.height as f32).length()
    }

    /// Precisions at or above this are rejected: the march step would fall
    /// under the f32 spacing of positions on this map and stop advancing.
    pub fn finest_precision(&self) -> f32 {
        1.0 / (self.diagonal() * f32::EPSILON)
    }
}

/// Text map: one row per line, digits are wall ids and `.` is open.
/// Whitespace is ignored, `;` starts a comment line.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for (idx, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            let row = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|ch| match ch {
                    '.' => Ok(OPEN),
                    d => d
                        .to_digit(10)
                        .map(|v| v as Cell)
                        .ok_or(GridError::BadChar { ch, line: idx + 1 }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
