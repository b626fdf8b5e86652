//! Per-cell movement costs and their text format.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::point::Point;

/// Errors from building a [`CostGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("cost map has no cells")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid character {ch:?} at {pos}")]
    InvalidChar { ch: char, pos: Point },
}

/// A rectangular map of movement costs.
///
/// Each cell holds the cost of entering it. A cost of 0 marks an
/// impassable cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostGrid {
    width: i32,
    height: i32,
    costs: Vec<u32>,
}

impl CostGrid {
    /// Build a grid from rows of costs. All rows must have the same width.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, ParseError> {
        let Some(first) = rows.first() else {
            return Err(ParseError::Empty);
        };
        let width = first.as_ref().len();
        if width == 0 {
            return Err(ParseError::Empty);
        }
        let mut costs = Vec::with_capacity(width * rows.len());
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != width {
                return Err(ParseError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            costs.extend_from_slice(cells);
        }
        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            costs,
        })
    }

    /// Parse a cost map: one line per row, one digit per cell, `#` for a
    /// wall (same as `0`). Leading and trailing blank space around the
    /// whole map is ignored, as is trailing space on each line.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let mut rows = Vec::new();
        for (y, line) in s.trim().lines().enumerate() {
            let row = line
                .trim_end()
                .chars()
                .enumerate()
                .map(|(x, ch)| match ch {
                    '#' => Ok(0),
                    _ => ch.to_digit(10).ok_or(ParseError::InvalidChar {
                        ch,
                        pos: Point::new(x as i32, y as i32),
                    }),
                })
                .collect::<Result<Vec<u32>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Cost of entering `p`, or `None` outside the grid.
    #[inline]
    pub fn cost(&self, p: Point) -> Option<u32> {
        self.index(p).map(|i| self.costs[i])
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.cost(p).is_some_and(|c| c > 0)
    }

    /// Change the cost of `p`. Returns the old cost, or `None` outside
    /// the grid.
    pub fn set_cost(&mut self, p: Point, cost: u32) -> Option<u32> {
        let i = self.index(p)?;
        Some(std::mem::replace(&mut self.costs[i], cost))
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, u32)> + '_ {
        let w = self.width;
        self.costs
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Point::new(i as i32 % w, i as i32 / w), c))
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.contains(p).then(|| (p.y * self.width + p.x) as usize)
    }
}

impl FromStr for CostGrid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Writes the grid back in the text format, walls as `#`. Costs above 9
/// are clamped to `9`.
impl fmt::Display for CostGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.costs.chunks(self.width as usize).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for &c in row {
                let ch = match c {
                    0 => '#',
                    c => char::from_digit(c.min(9), 10).unwrap_or('9'),
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
