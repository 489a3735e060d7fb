use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::types::Glyphs;

/// A candidate entry for the grid: a word and the clue it will be listed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// The word as it will appear in the grid; see `normalize_word`.
    pub word: String,
    pub clue: String,
}

impl WordEntry {
    /// Build an entry, normalizing the word into its grid form.
    #[must_use]
    pub fn new(word: &str, clue: &str) -> WordEntry {
        WordEntry {
            word: normalize_word(word),
            clue: clue.to_string(),
        }
    }

    /// The letters of this entry's word, normalized, one per grid cell.
    #[must_use]
    pub fn glyphs(&self) -> Glyphs {
        normalize_word(&self.word).chars().collect()
    }
}

/// Turn a word as supplied by the caller into the form used in the grid: NFC-composed, so that
/// accented letters take up a single cell, uppercased, with whitespace removed.
#[must_use]
pub fn normalize_word(raw: &str) -> String {
    raw.nfc()
        .flat_map(char::to_uppercase)
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("can’t read word list “{path}”: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected “WORD: clue”")]
    MissingClue { line: usize },
    #[error("line {line}: word is empty")]
    EmptyWord { line: usize },
    #[error("line {line}: word contains non-letter characters: “{word}”")]
    InvalidWord { line: usize, word: String },
}

/// Parse a word list with one `WORD: clue` entry per line. Blank lines and lines starting with
/// `#` are skipped. Entries are returned in file order, which is the order ties are broken in.
pub fn parse_word_list(contents: &str) -> Result<Vec<WordEntry>, WordListError> {
    let mut entries = vec![];

    for (line_idx, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        let line_number = line_idx + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((raw_word, raw_clue)) = line.split_once(':') else {
            return Err(WordListError::MissingClue { line: line_number });
        };

        let clue = raw_clue.trim();
        if clue.is_empty() {
            return Err(WordListError::MissingClue { line: line_number });
        }

        let word = normalize_word(raw_word);
        if word.is_empty() {
            return Err(WordListError::EmptyWord { line: line_number });
        }
        if !word.chars().all(char::is_alphabetic) {
            return Err(WordListError::InvalidWord {
                line: line_number,
                word: raw_word.trim().to_string(),
            });
        }

        entries.push(WordEntry {
            word,
            clue: clue.to_string(),
        });
    }

    Ok(entries)
}

/// Read and parse a word list file; see `parse_word_list`.
pub fn load_word_list(path: &Path) -> Result<Vec<WordEntry>, WordListError> {
    let contents = fs::read_to_string(path).map_err(|source| WordListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_word_list(&contents)
}
