//! The square working buffer that words are written into while a grid is being built.

use crate::types::{Direction, GridCoord};

/// A `size × size` array of cells, stored flat in order of row and then column. A buffer is owned
/// by a single generation call and thrown away once it has been trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBuffer {
    size: usize,
    cells: Vec<Option<char>>,
}

/// The occupied part of a buffer, along with where it sat in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trimmed {
    pub cells: Vec<Option<char>>,
    pub offset_row: usize,
    pub offset_col: usize,
    pub width: usize,
    pub height: usize,
}

impl GridBuffer {
    #[must_use]
    pub fn new(size: usize) -> GridBuffer {
        GridBuffer {
            size,
            cells: vec![None; size * size],
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Look up a cell by signed coords, treating anything off the grid as empty.
    #[must_use]
    pub fn get(&self, row: isize, col: isize) -> Option<char> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[row * self.size + col]
    }

    /// Is the cell at the given signed coords empty (or off the grid)?
    #[must_use]
    pub fn is_empty_at(&self, row: isize, col: isize) -> bool {
        self.get(row, col).is_none()
    }

    /// Write a word's letters into the buffer. The caller is responsible for having checked the
    /// placement with `is_valid_placement`.
    pub fn place_word(&mut self, glyphs: &[char], (row, col): GridCoord, direction: Direction) {
        for (cell_idx, &glyph) in glyphs.iter().enumerate() {
            let (r, c) = match direction {
                Direction::Across => (row, col + cell_idx),
                Direction::Down => (row + cell_idx, col),
            };
            self.cells[r * self.size + c] = Some(glyph);
        }
    }

    /// Count how many of the word's letters would land on a cell already holding that letter.
    #[must_use]
    pub fn count_intersections(
        &self,
        glyphs: &[char],
        (row, col): (isize, isize),
        direction: Direction,
    ) -> usize {
        let (d_row, d_col) = direction.step();
        glyphs
            .iter()
            .enumerate()
            .filter(|&(cell_idx, &glyph)| {
                let offset = cell_idx as isize;
                self.get(row + d_row * offset, col + d_col * offset) == Some(glyph)
            })
            .count()
    }

    /// Crop the buffer to the bounding box of its non-empty cells. Returns `None` for a buffer
    /// with nothing in it.
    #[must_use]
    pub fn trim(&self) -> Option<Trimmed> {
        let mut bounds: Option<(GridCoord, GridCoord)> = None;

        for (idx, cell) in self.cells.iter().enumerate() {
            if cell.is_none() {
                continue;
            }
            let (row, col) = (idx / self.size, idx % self.size);
            bounds = Some(match bounds {
                None => ((row, col), (row, col)),
                Some(((min_row, min_col), (max_row, max_col))) => (
                    (min_row.min(row), min_col.min(col)),
                    (max_row.max(row), max_col.max(col)),
                ),
            });
        }

        let ((min_row, min_col), (max_row, max_col)) = bounds?;
        let width = max_col - min_col + 1;
        let height = max_row - min_row + 1;

        let cells = self
            .cells
            .chunks(self.size)
            .skip(min_row)
            .take(height)
            .flat_map(|line| line[min_col..=max_col].iter().copied())
            .collect();

        Some(Trimmed {
            cells,
            offset_row: min_row,
            offset_col: min_col,
            width,
            height,
        })
    }
}
