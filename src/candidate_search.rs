//! Finding where a new word can cross the entries already in the grid.

use log::trace;

use crate::grid_buffer::GridBuffer;
use crate::types::{Direction, Glyphs, Placement};
use crate::validity::is_valid_placement;
use crate::LOG_PLACEMENT_PROCESS;

/// A legal position for a new word, along with how many of its letters are shared with entries
/// already in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub intersections: usize,
}

/// Find the best position for `glyphs` crossing one of the `existing` placements. Every pair of
/// matching letters is tried, perpendicular to the entry it crosses; the valid candidate sharing
/// the most letters with the grid wins, and ties go to whichever was found first (scanning
/// `existing` in order, then the new word's letters, then the existing word's letters).
#[must_use]
pub fn find_best_placement(
    buffer: &GridBuffer,
    glyphs: &[char],
    existing: &[Placement],
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for placement in existing {
        let existing_glyphs: Glyphs = placement.word.chars().collect();
        let direction = placement.direction.perpendicular();

        for (i, &glyph) in glyphs.iter().enumerate() {
            for (j, _) in existing_glyphs
                .iter()
                .enumerate()
                .filter(|&(_, &existing_glyph)| existing_glyph == glyph)
            {
                let (row, col) = match placement.direction {
                    Direction::Across => (
                        placement.row as isize - i as isize,
                        (placement.col + j) as isize,
                    ),
                    Direction::Down => (
                        (placement.row + j) as isize,
                        placement.col as isize - i as isize,
                    ),
                };

                if !is_valid_placement(buffer, glyphs, (row, col), direction) {
                    if LOG_PLACEMENT_PROCESS {
                        trace!(
                            "rejected ({row}, {col}) {} crossing {}",
                            direction.as_str(),
                            placement.word
                        );
                    }
                    continue;
                }

                let intersections = buffer.count_intersections(glyphs, (row, col), direction);
                if LOG_PLACEMENT_PROCESS {
                    trace!(
                        "candidate ({row}, {col}) {} crossing {} with {intersections} intersections",
                        direction.as_str(),
                        placement.word
                    );
                }

                if best.map_or(true, |best| intersections > best.intersections) {
                    best = Some(Candidate {
                        row: row as usize,
                        col: col as usize,
                        direction,
                        intersections,
                    });
                }
            }
        }
    }

    best
}
