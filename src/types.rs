#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

use smallvec::SmallVec;

use crate::MAX_WORD_LENGTH;

/// Zero-indexed (row, col) coords for a cell in the grid, where row = 0 is the top row.
pub type GridCoord = (usize, usize);

/// The letters of a normalized word, one `char` per grid cell.
pub type Glyphs = SmallVec<[char; MAX_WORD_LENGTH]>;

/// The direction that an entry runs in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// The direction that crosses this one.
    #[must_use]
    pub fn perpendicular(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// The (row, col) step taken to move one cell forward along this direction.
    #[must_use]
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }
}

/// A word placed in the grid, along with its clue and the number it's listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub word: String,
    pub clue: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub number: u32,
}

impl Placement {
    /// Generate the coords for each cell of this entry.
    #[must_use]
    pub fn cell_coords(&self) -> Vec<GridCoord> {
        (0..self.word.chars().count())
            .map(|cell_idx| match self.direction {
                Direction::Across => (self.row, self.col + cell_idx),
                Direction::Down => (self.row + cell_idx, self.col),
            })
            .collect()
    }

    /// Pair each of this entry's letters with the cell it occupies.
    pub fn cells(&self) -> impl Iterator<Item = (GridCoord, char)> + '_ {
        self.cell_coords().into_iter().zip(self.word.chars())
    }
}

/// A finished, trimmed grid. `cells` is a flat array in order of row and then column; `None`
/// is a cell no entry passes through. With the `serde` feature, `cells` is written as an array
/// of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "GridRows", try_from = "GridRows"))]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Option<char>>,
    pub placements: Vec<Placement>,
}

impl Grid {
    /// The contents of the cell at the given coords, or `None` if it's empty or off the grid.
    #[must_use]
    pub fn cell(&self, (row, col): GridCoord) -> Option<char> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells[row * self.width + col]
    }

    /// Iterate over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<char>]> {
        self.cells.chunks(self.width.max(1))
    }

    /// The clue number printed in the given cell, if an entry starts there.
    #[must_use]
    pub fn number_at(&self, coord: GridCoord) -> Option<u32> {
        self.placements
            .iter()
            .find(|placement| (placement.row, placement.col) == coord)
            .map(|placement| placement.number)
    }

    /// Find the first placement whose letters disagree with `cells` or fall off the grid, if any.
    #[must_use]
    pub fn first_inconsistent_placement(&self) -> Option<&Placement> {
        self.placements.iter().find(|placement| {
            placement
                .cells()
                .any(|(coord, glyph)| self.cell(coord) != Some(glyph))
        })
    }
}

/// The serialized form of a `Grid`, with `cells` split into rows.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct GridRows {
    width: usize,
    height: usize,
    cells: Vec<Vec<Option<char>>>,
    placements: Vec<Placement>,
}

#[cfg(feature = "serde")]
impl From<Grid> for GridRows {
    fn from(grid: Grid) -> Self {
        GridRows {
            cells: grid.rows().map(<[Option<char>]>::to_vec).collect(),
            width: grid.width,
            height: grid.height,
            placements: grid.placements,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridRows> for Grid {
    type Error = String;

    fn try_from(rows: GridRows) -> Result<Self, Self::Error> {
        if rows.cells.len() != rows.height {
            return Err(format!(
                "expected {} rows, found {}",
                rows.height,
                rows.cells.len()
            ));
        }
        if let Some(line) = rows.cells.iter().find(|line| line.len() != rows.width) {
            return Err(format!(
                "expected rows of {} cells, found one of {}",
                rows.width,
                line.len()
            ));
        }
        Ok(Grid {
            width: rows.width,
            height: rows.height,
            cells: rows.cells.into_iter().flatten().collect(),
            placements: rows.placements,
        })
    }
}
