//! Plain-text renderings of grids and clue lists, for the command line.

use crate::puzzle::{Clue, Puzzle};
use crate::types::Grid;

/// Render the solved grid, one line per row, with `#` for cells that no entry passes through.
#[must_use]
pub fn render_solution(grid: &Grid) -> String {
    grid.rows()
        .map(|line| line.iter().map(|cell| cell.unwrap_or('#')).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the unsolved grid. Each cell is three characters wide: the clue number where an entry
/// starts, `.` for other letter cells, and `#` for blocks.
#[must_use]
pub fn render_numbered(grid: &Grid) -> String {
    (0..grid.height)
        .map(|row| {
            (0..grid.width)
                .map(|col| match (grid.cell((row, col)), grid.number_at((row, col))) {
                    (None, _) => "  #".to_string(),
                    (Some(_), Some(number)) => format!("{number:>3}"),
                    (Some(_), None) => "  .".to_string(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the title followed by the across and down clue lists.
#[must_use]
pub fn render_clues(puzzle: &Puzzle) -> String {
    fn write_section(out: &mut String, heading: &str, clues: &[Clue]) {
        out.push_str(&format!("\n{heading}\n"));
        for clue in clues {
            out.push_str(&format!("{:>3}. {}\n", clue.number, clue.clue));
        }
    }

    let mut out = puzzle.title.clone();
    out.push('\n');
    write_section(&mut out, "Across", &puzzle.across_clues);
    write_section(&mut out, "Down", &puzzle.down_clues);
    out
}
