//! Persistence for the previous edition's crossword, so that its solution can be printed next to
//! the new puzzle. The store is a single JSON file holding the edition counter and the last
//! edition saved.

use log::{info, warn};
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::puzzle::Puzzle;
use crate::types::{Direction, Grid, Placement};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("can’t access edition store “{path}”: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("can’t encode edition store: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("saved crossword entry {number} {direction} doesn’t fit its {width}×{height} grid")]
    InconsistentSolution {
        number: u32,
        direction: &'static str,
        width: usize,
        height: usize,
    },
}

/// A placement as stored on disk. Converts to and from `Placement` without losing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPlacement {
    pub word: String,
    pub clue: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub number: u32,
}

impl From<&Placement> for PersistedPlacement {
    fn from(placement: &Placement) -> Self {
        PersistedPlacement {
            word: placement.word.clone(),
            clue: placement.clue.clone(),
            row: placement.row,
            col: placement.col,
            direction: placement.direction,
            number: placement.number,
        }
    }
}

impl From<PersistedPlacement> for Placement {
    fn from(persisted: PersistedPlacement) -> Self {
        Placement {
            word: persisted.word,
            clue: persisted.clue,
            row: persisted.row,
            col: persisted.col,
            direction: persisted.direction,
            number: persisted.number,
        }
    }
}

/// The parts of a puzzle needed to print its solution later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCrossword {
    pub title: String,
    pub words: Vec<PersistedPlacement>,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl From<&Puzzle> for PersistedCrossword {
    fn from(puzzle: &Puzzle) -> Self {
        PersistedCrossword {
            title: puzzle.title.clone(),
            words: puzzle.grid.placements.iter().map(Into::into).collect(),
            grid_width: puzzle.grid.width,
            grid_height: puzzle.grid.height,
        }
    }
}

impl PersistedCrossword {
    /// Rebuild the solved grid by writing every saved word back into an empty grid of the saved
    /// dimensions. Fails if a word falls outside the grid or disagrees with a crossing word.
    pub fn to_grid(&self) -> Result<Grid, StoreError> {
        let (width, height) = (self.grid_width, self.grid_height);
        let mut cells: Vec<Option<char>> = vec![None; width * height];

        for persisted in &self.words {
            let placement = Placement::from(persisted.clone());
            for ((row, col), glyph) in placement.cells() {
                let fits = row < height
                    && col < width
                    && cells[row * width + col].map_or(true, |existing| existing == glyph);
                if !fits {
                    return Err(StoreError::InconsistentSolution {
                        number: placement.number,
                        direction: placement.direction.as_str(),
                        width,
                        height,
                    });
                }
                cells[row * width + col] = Some(glyph);
            }
        }

        Ok(Grid {
            width,
            height,
            cells,
            placements: self.words.iter().cloned().map(Into::into).collect(),
        })
    }
}

/// Everything remembered about one published edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedEdition {
    pub edition_number: u32,
    pub edition_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crossword: Option<PersistedCrossword>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionStoreData {
    pub current_edition_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edition: Option<PersistedEdition>,
}

impl Default for EditionStoreData {
    fn default() -> Self {
        EditionStoreData {
            current_edition_number: 1,
            last_edition: None,
        }
    }
}

/// A JSON-file-backed record of the edition counter and the most recent edition.
#[derive(Debug)]
pub struct EditionStore {
    path: PathBuf,
    data: EditionStoreData,
}

impl EditionStore {
    /// Open the store at `path`. A missing file starts a fresh store at edition 1; so does one
    /// that can't be read or parsed, after logging a warning.
    #[must_use]
    pub fn open(path: &Path) -> EditionStore {
        let data = if path.exists() {
            fs::read_to_string(path)
                .map_err(|err| err.to_string())
                .and_then(|contents| {
                    serde_json::from_str::<EditionStoreData>(&contents).map_err(|err| err.to_string())
                })
                .unwrap_or_else(|err| {
                    warn!("could not read edition store {}: {err}", path.display());
                    EditionStoreData::default()
                })
        } else {
            EditionStoreData::default()
        };

        EditionStore {
            path: path.to_path_buf(),
            data,
        }
    }

    /// Return the number for the next edition, advancing and saving the counter.
    pub fn next_edition_number(&mut self) -> Result<u32, StoreError> {
        let next = self.data.current_edition_number;
        self.data.current_edition_number += 1;
        self.save()?;
        Ok(next)
    }

    #[must_use]
    pub fn current_edition_number(&self) -> u32 {
        self.data.current_edition_number
    }

    /// The most recently saved edition, whose crossword solution goes in the next issue.
    #[must_use]
    pub fn last_edition(&self) -> Option<&PersistedEdition> {
        self.data.last_edition.as_ref()
    }

    /// Record `edition` as the most recent one, replacing whatever was there.
    pub fn save_edition(&mut self, edition: PersistedEdition) -> Result<(), StoreError> {
        let edition_number = edition.edition_number;
        self.data.last_edition = Some(edition);
        self.save()?;
        info!("saved edition #{edition_number} to {}", self.path.display());
        Ok(())
    }

    fn save(&self) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_error)?;
        }
        let contents = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, contents).map_err(io_error)
    }
}
