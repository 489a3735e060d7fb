//! The rules deciding whether a word may be written into the buffer at a given position. Together
//! they keep every maximal horizontal or vertical run of letters equal to a placed word. A word
//! can still be laid exactly over an identical one.

use crate::grid_buffer::GridBuffer;
use crate::types::Direction;

/// Can `glyphs` be written into `buffer` starting at `(row, col)` and running along `direction`?
///
/// * The whole word has to fit inside the buffer.
/// * Each cell it covers must be empty or already hold the same letter.
/// * Each empty cell it covers must have empty neighbours on both sides perpendicular to the
///   word, so it can't run flush alongside another entry.
/// * The cells just before its start and just after its end must be empty, so it can't extend
///   another entry.
#[must_use]
pub fn is_valid_placement(
    buffer: &GridBuffer,
    glyphs: &[char],
    (row, col): (isize, isize),
    direction: Direction,
) -> bool {
    let size = buffer.size() as isize;
    let length = glyphs.len() as isize;

    if row < 0 || col < 0 {
        return false;
    }
    let (end_row, end_col) = match direction {
        Direction::Across => (row, col + length - 1),
        Direction::Down => (row + length - 1, col),
    };
    if end_row >= size || end_col >= size {
        return false;
    }

    let (d_row, d_col) = direction.step();
    let (side_row, side_col) = direction.perpendicular().step();

    for (cell_idx, &glyph) in glyphs.iter().enumerate() {
        let offset = cell_idx as isize;
        let (r, c) = (row + d_row * offset, col + d_col * offset);

        match buffer.get(r, c) {
            Some(existing) if existing != glyph => return false,
            Some(_) => {}
            None => {
                if !buffer.is_empty_at(r - side_row, c - side_col)
                    || !buffer.is_empty_at(r + side_row, c + side_col)
                {
                    return false;
                }
            }
        }
    }

    buffer.is_empty_at(row - d_row, col - d_col)
        && buffer.is_empty_at(row + d_row * length, col + d_col * length)
}
