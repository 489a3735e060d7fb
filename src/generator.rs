//! This module builds a crossword grid from a list of words: the longest word is laid across the
//! middle of a square working buffer, and every other word is greedily crossed with the entries
//! already placed. Words that can't be crossed anywhere are left out. The buffer is then trimmed
//! to the letters actually used and the entries are numbered in reading order.

use log::{debug, info};
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::candidate_search::find_best_placement;
use crate::grid_buffer::GridBuffer;
use crate::types::{Direction, Glyphs, GridCoord, Grid, Placement};
use crate::word_list::WordEntry;
use crate::{CHECK_INVARIANTS, DEFAULT_MAX_GRID_SIZE, MAX_GRID_SIZE};

/// Settings for a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// The side length of the square buffer words are placed in. The finished grid is trimmed, so
    /// it's usually smaller than this.
    pub max_grid_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            max_grid_size: DEFAULT_MAX_GRID_SIZE,
        }
    }
}

/// Build a grid from `words` in a buffer of `max_size × max_size` cells. Returns `None` if there
/// are no words, if `max_size` is above `MAX_GRID_SIZE`, or if the longest word doesn't fit;
/// otherwise the grid holds at least that longest word, plus every other word that could be
/// crossed with it. A word listed twice is laid over its twin.
#[must_use]
pub fn generate_grid(words: &[WordEntry], max_size: usize) -> Option<Grid> {
    generate_grid_with_config(
        words,
        &GeneratorConfig {
            max_grid_size: max_size,
        },
    )
}

/// Build a grid from `words` using the given config; see `generate_grid`.
#[must_use]
pub fn generate_grid_with_config(words: &[WordEntry], config: &GeneratorConfig) -> Option<Grid> {
    let max_size = config.max_grid_size;
    if max_size > MAX_GRID_SIZE || max_size.checked_mul(max_size).is_none() {
        debug!("buffer size {max_size} is over the limit of {MAX_GRID_SIZE}");
        return None;
    }

    let mut sorted_words: Vec<(&WordEntry, Glyphs)> =
        words.iter().map(|entry| (entry, entry.glyphs())).collect();
    sorted_words.sort_by_key(|(_, glyphs)| Reverse(glyphs.len()));

    let ((anchor, anchor_glyphs), rest) = sorted_words.split_first()?;

    if anchor_glyphs.len() > max_size {
        debug!(
            "anchor word {} ({} letters) doesn't fit in a {max_size}×{max_size} grid",
            anchor.word,
            anchor_glyphs.len()
        );
        return None;
    }

    let mut buffer = GridBuffer::new(max_size);
    let mut placements: Vec<Placement> = Vec::with_capacity(sorted_words.len());

    let start = (max_size / 2, (max_size - anchor_glyphs.len()) / 2);
    buffer.place_word(anchor_glyphs, start, Direction::Across);
    placements.push(new_placement(anchor_glyphs, &anchor.clue, start, Direction::Across, 1));

    for (entry, glyphs) in rest {
        match find_best_placement(&buffer, glyphs, &placements) {
            Some(candidate) => {
                let coord = (candidate.row, candidate.col);
                buffer.place_word(glyphs, coord, candidate.direction);
                let number = placements.len() as u32 + 1;
                placements.push(new_placement(
                    glyphs,
                    &entry.clue,
                    coord,
                    candidate.direction,
                    number,
                ));
                debug!(
                    "placed {} {} at {coord:?} with {} intersections",
                    entry.word,
                    candidate.direction.as_str(),
                    candidate.intersections
                );
            }
            None => debug!("dropped {}: no valid crossing", entry.word),
        }
    }

    // The anchor is always in the buffer, so there's something to trim.
    let trimmed = buffer.trim()?;

    let adjusted: Vec<Placement> = placements
        .into_iter()
        .map(|placement| Placement {
            row: placement.row - trimmed.offset_row,
            col: placement.col - trimmed.offset_col,
            ..placement
        })
        .collect();

    let grid = Grid {
        width: trimmed.width,
        height: trimmed.height,
        cells: trimmed.cells,
        placements: renumber(adjusted),
    };

    if CHECK_INVARIANTS {
        if let Some(placement) = grid.first_inconsistent_placement() {
            panic!("Placement disagrees with grid cells: {placement:?}");
        }
    }

    info!(
        "generated {}×{} grid with {} of {} words",
        grid.width,
        grid.height,
        grid.placements.len(),
        words.len()
    );

    Some(grid)
}

fn new_placement(
    glyphs: &[char],
    clue: &str,
    (row, col): GridCoord,
    direction: Direction,
    number: u32,
) -> Placement {
    Placement {
        word: glyphs.iter().collect(),
        clue: clue.to_string(),
        row,
        col,
        direction,
        number,
    }
}

/// Assign clue numbers in reading order: placements are ordered top to bottom, then left to
/// right, and each distinct start cell gets the next number. An across and a down entry starting
/// in the same cell share a number.
#[must_use]
pub fn renumber(mut placements: Vec<Placement>) -> Vec<Placement> {
    placements.sort_by_key(|placement| (placement.row, placement.col));

    let mut number_by_start: HashMap<GridCoord, u32> = HashMap::new();
    let mut next_number = 1;

    for placement in &mut placements {
        let number = *number_by_start
            .entry((placement.row, placement.col))
            .or_insert_with(|| {
                let number = next_number;
                next_number += 1;
                number
            });
        placement.number = number;
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn entries(words: &[&str]) -> Vec<WordEntry> {
        words
            .iter()
            .enumerate()
            .map(|(idx, word)| WordEntry::new(word, &format!("Clue {}", idx + 1)))
            .collect()
    }

    /// Check the structural properties every generated grid should have.
    fn check_grid(grid: &Grid) {
        assert!(!grid.placements.is_empty());
        assert_eq!(grid.cells.len(), grid.width * grid.height);

        // Trimmed: something in the first and last row and column.
        assert!(grid.rows().next().unwrap().iter().any(Option::is_some));
        assert!(grid.rows().last().unwrap().iter().any(Option::is_some));
        assert!(grid.rows().any(|row| row[0].is_some()));
        assert!(grid.rows().any(|row| row[grid.width - 1].is_some()));

        // Every placement agrees with the cells, so no two placements collide.
        assert_eq!(grid.first_inconsistent_placement(), None);

        // Every filled cell belongs to some placement.
        let covered: HashSet<GridCoord> = grid
            .placements
            .iter()
            .flat_map(Placement::cell_coords)
            .collect();
        for row in 0..grid.height {
            for col in 0..grid.width {
                assert_eq!(grid.cell((row, col)).is_some(), covered.contains(&(row, col)));
            }
        }

        // Every maximal run of two or more letters is exactly one entry.
        let entries: HashSet<(GridCoord, Direction, usize)> = grid
            .placements
            .iter()
            .map(|p| ((p.row, p.col), p.direction, p.word.chars().count()))
            .collect();
        assert_eq!(entries.len(), grid.placements.len(), "duplicate entries");
        for run in letter_runs(grid) {
            assert!(entries.contains(&run), "unexpected run {run:?}");
        }
        assert_eq!(letter_runs(grid).len(), grid.placements.len());

        // Numbering: non-decreasing in reading order, shared by shared starts, no gaps.
        let mut numbers_by_start: HashMap<GridCoord, u32> = HashMap::new();
        let mut previous = 0;
        for placement in &grid.placements {
            assert!(placement.number >= previous);
            previous = placement.number;
            let number = numbers_by_start
                .entry((placement.row, placement.col))
                .or_insert(placement.number);
            assert_eq!(*number, placement.number);
        }
        let mut distinct: Vec<u32> = numbers_by_start.values().copied().collect();
        distinct.sort_unstable();
        assert_eq!(distinct, (1..=distinct.len() as u32).collect::<Vec<_>>());
    }

    /// Find every maximal horizontal or vertical run of at least two filled cells.
    fn letter_runs(grid: &Grid) -> Vec<(GridCoord, Direction, usize)> {
        let mut runs = vec![];
        for direction in [Direction::Across, Direction::Down] {
            let (lines, line_length) = match direction {
                Direction::Across => (grid.height, grid.width),
                Direction::Down => (grid.width, grid.height),
            };
            for line in 0..lines {
                let coord = |idx: usize| match direction {
                    Direction::Across => (line, idx),
                    Direction::Down => (idx, line),
                };
                let mut idx = 0;
                while idx < line_length {
                    if grid.cell(coord(idx)).is_none() {
                        idx += 1;
                        continue;
                    }
                    let start = idx;
                    while idx < line_length && grid.cell(coord(idx)).is_some() {
                        idx += 1;
                    }
                    if idx - start > 1 {
                        runs.push((coord(start), direction, idx - start));
                    }
                }
            }
        }
        runs
    }

    #[test]
    fn test_empty_word_list() {
        assert_eq!(generate_grid(&[], DEFAULT_MAX_GRID_SIZE), None);
    }

    #[test]
    fn test_single_word() {
        let grid = generate_grid(&[WordEntry::new("ETIMO", "Vårt företag")], 15).unwrap();

        assert_eq!(grid.placements.len(), 1);
        let placement = &grid.placements[0];
        assert_eq!(placement.word, "ETIMO");
        assert_eq!(placement.direction, Direction::Across);
        assert_eq!((placement.row, placement.col, placement.number), (0, 0, 1));
        assert_eq!((grid.width, grid.height), (5, 1));
        check_grid(&grid);
    }

    #[test]
    fn test_letters_are_written_along_the_placement() {
        let grid = generate_grid(&entries(&["test"]), 15).unwrap();
        let placement = &grid.placements[0];

        let letters: String = placement
            .cell_coords()
            .into_iter()
            .map(|coord| grid.cell(coord).unwrap())
            .collect();
        assert_eq!(letters, "TEST");
    }

    #[test]
    fn test_multiple_intersecting_words() {
        let grid = generate_grid(&entries(&["KORSORD", "SLACK", "KOD"]), 15).unwrap();

        assert!(grid.placements.len() >= 2);
        check_grid(&grid);
    }

    #[test]
    fn test_korsord_layout() {
        let grid = generate_grid(&entries(&["KORSORD", "SLACK", "KOD"]), 15).unwrap();

        // "KORSORD" is centered in row 7 (columns 4–10) of the buffer; "SLACK" hangs down from
        // its "S" and "KOD" from its "K", so the trimmed grid is 7 wide and 5 tall.
        assert_eq!((grid.width, grid.height), (7, 5));
        assert_eq!(
            grid.placements,
            vec![
                Placement {
                    word: "KORSORD".into(),
                    clue: "Clue 1".into(),
                    row: 0,
                    col: 0,
                    direction: Direction::Across,
                    number: 1,
                },
                Placement {
                    word: "KOD".into(),
                    clue: "Clue 3".into(),
                    row: 0,
                    col: 0,
                    direction: Direction::Down,
                    number: 1,
                },
                Placement {
                    word: "SLACK".into(),
                    clue: "Clue 2".into(),
                    row: 0,
                    col: 3,
                    direction: Direction::Down,
                    number: 2,
                },
            ]
        );
    }

    #[test]
    fn test_anchor_too_long() {
        assert_eq!(generate_grid(&entries(&["VERYLONGWORD"]), 8), None);
        assert!(generate_grid(&entries(&["EXACTFIT"]), 8).is_some());
    }

    #[test]
    fn test_zero_size_buffer() {
        assert_eq!(generate_grid(&entries(&["A"]), 0), None);
    }

    #[test]
    fn test_unplaceable_words_are_dropped() {
        let grid = generate_grid(&entries(&["KORSORD", "XYZ", "SLACK"]), 15).unwrap();

        let words: Vec<&str> = grid.placements.iter().map(|p| p.word.as_str()).collect();
        assert!(!words.contains(&"XYZ"));
        assert!(words.contains(&"SLACK"));
        check_grid(&grid);
    }

    #[test]
    fn test_longest_word_anchors_regardless_of_order() {
        let grid = generate_grid(&entries(&["KOD", "SLACK", "KORSORD"]), 15).unwrap();

        let anchor = grid
            .placements
            .iter()
            .find(|p| p.word == "KORSORD")
            .unwrap();
        assert_eq!(anchor.direction, Direction::Across);
    }

    #[test]
    fn test_ties_in_length_keep_input_order() {
        let grid = generate_grid(&entries(&["ABC", "CAB"]), 15).unwrap();

        let anchor = grid
            .placements
            .iter()
            .find(|p| p.direction == Direction::Across)
            .unwrap();
        assert_eq!(anchor.word, "ABC");
    }

    #[test]
    fn test_lowercase_and_accented_input() {
        let grid = generate_grid(&entries(&["äpple", "öl", "päls"]), 15).unwrap();

        let words: Vec<&str> = grid.placements.iter().map(|p| p.word.as_str()).collect();
        assert!(words.contains(&"ÄPPLE"));
        assert!(words.contains(&"ÖL"));
        assert!(grid.placements.iter().all(|p| p.word == p.word.to_uppercase()));
        check_grid(&grid);
    }

    #[test]
    fn test_oversized_buffer_is_rejected() {
        let words = entries(&["KOD"]);
        assert_eq!(generate_grid(&words, 1usize << 33), None);
        assert_eq!(generate_grid(&words, usize::MAX), None);
        assert_eq!(generate_grid(&words, MAX_GRID_SIZE + 1), None);

        let grid = generate_grid(&words, MAX_GRID_SIZE).unwrap();
        assert_eq!((grid.width, grid.height), (3, 1));
    }

    #[test]
    fn test_duplicate_word_stacks_on_its_twin() {
        let grid = generate_grid(&entries(&["KORSORD", "KOD", "KOD"]), 15).unwrap();

        assert_eq!((grid.width, grid.height), (7, 3));
        assert_eq!(grid.placements.len(), 3);
        assert!(grid.first_inconsistent_placement().is_none());

        let stacked: Vec<&Placement> = grid
            .placements
            .iter()
            .filter(|p| p.word == "KOD")
            .collect();
        assert_eq!(stacked.len(), 2);
        for placement in stacked {
            assert_eq!((placement.row, placement.col), (0, 0));
            assert_eq!(placement.direction, Direction::Down);
            assert_eq!(placement.number, 1);
        }
    }

    #[test]
    fn test_larger_word_sets_stay_consistent() {
        let word_sets: [&[&str]; 4] = [
            &["KORSORD", "SLACK", "KOD", "TEAM", "ETIMO", "KAFFE", "FREDAG", "MÖTE"],
            &["ACROSS", "DOWN", "NORTH", "SOUTH", "WEST", "EAST", "ORBIT", "STAR"],
            &["HELLO", "WORLD", "LOWER", "OWL", "ROLE", "DOLL", "HERO", "WORD", "LORD"],
            &["PROGRAMMERING", "RUST", "GRID", "ORD", "MAGI", "RAM", "NÄT", "GÅTA"],
        ];

        for words in word_sets {
            let grid = generate_grid(&entries(words), 15).unwrap();
            check_grid(&grid);
            assert!(grid.width <= 15 && grid.height <= 15);
        }
    }

    #[test]
    fn test_small_buffer_limits_placements() {
        let words = entries(&["ACROSS", "DOWN", "NORTH", "SOUTH", "WEST", "EAST"]);
        let grid = generate_grid(&words, 6).unwrap();

        assert!(grid.width <= 6 && grid.height <= 6);
        check_grid(&grid);
    }

    #[test]
    fn test_deterministic() {
        let words = entries(&["HELLO", "WORLD", "LOWER", "OWL", "ROLE", "DOLL"]);
        assert_eq!(generate_grid(&words, 15), generate_grid(&words, 15));
        assert_eq!(
            generate_grid(&words, 11),
            generate_grid_with_config(&words, &GeneratorConfig { max_grid_size: 11 })
        );
    }

    #[test]
    fn test_default_config() {
        let words = entries(&["KORSORD", "SLACK"]);
        assert_eq!(
            generate_grid_with_config(&words, &GeneratorConfig::default()),
            generate_grid(&words, 15)
        );
    }

    #[test]
    fn test_renumber() {
        let placement = |word: &str, row, col, direction| Placement {
            word: String::from(word),
            clue: String::new(),
            row,
            col,
            direction,
            number: 99,
        };

        let renumbered = renumber(vec![
            placement("SLACK", 0, 3, Direction::Down),
            placement("KORSORD", 0, 0, Direction::Across),
            placement("KOD", 0, 0, Direction::Down),
            placement("AB", 2, 1, Direction::Across),
        ]);

        let summary: Vec<(&str, u32)> = renumbered
            .iter()
            .map(|p| (p.word.as_str(), p.number))
            .collect();
        assert_eq!(
            summary,
            vec![("KORSORD", 1), ("KOD", 1), ("SLACK", 2), ("AB", 3)]
        );
    }
}
