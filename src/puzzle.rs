#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

use crate::types::{Direction, Grid};

/// One line in a clue list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Clue {
    pub number: u32,
    pub clue: String,
}

/// A grid together with its titled, numbered clue lists.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Puzzle {
    pub grid: Grid,
    pub across_clues: Vec<Clue>,
    pub down_clues: Vec<Clue>,
    pub title: String,
}

/// Split a grid's placements into across and down clue lists, each ordered by clue number.
#[must_use]
pub fn assemble(grid: Grid, title: &str) -> Puzzle {
    let clues_for = |direction: Direction| {
        let mut clues: Vec<Clue> = grid
            .placements
            .iter()
            .filter(|placement| placement.direction == direction)
            .map(|placement| Clue {
                number: placement.number,
                clue: placement.clue.clone(),
            })
            .collect();
        clues.sort_by_key(|clue| clue.number);
        clues
    };

    let across_clues = clues_for(Direction::Across);
    let down_clues = clues_for(Direction::Down);

    Puzzle {
        grid,
        across_clues,
        down_clues,
        title: title.to_string(),
    }
}
