use clap::Parser;
use crossword_core::edition_store::{EditionStore, PersistedCrossword, PersistedEdition};
use crossword_core::generator::{generate_grid_with_config, GeneratorConfig};
use crossword_core::puzzle::assemble;
use crossword_core::render::{render_clues, render_numbered, render_solution};
use crossword_core::word_list::load_word_list;
use crossword_core::{DEFAULT_MAX_GRID_SIZE, MAX_GRID_SIZE};
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

/// crossword_core: Command-line crossword generation tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the word list, with one "WORD: clue" entry per line, best words first
    words_path: PathBuf,

    /// Side length of the square area words are laid out in
    #[arg(long, default_value_t = DEFAULT_MAX_GRID_SIZE, value_parser = parse_max_size)]
    max_size: usize,

    /// Title printed above the clues
    #[arg(long, default_value = "Crossword")]
    title: String,

    /// Minimum number of words that have to make it into the grid
    #[arg(long, default_value_t = 1)]
    min_words: usize,

    /// Path to an edition store; prints the previous solution and records this puzzle
    #[arg(long)]
    store: Option<PathBuf>,

    /// Date recorded with the edition when `--store` is given [default: the current UTC time]
    #[arg(long)]
    edition_date: Option<String>,

    /// Print the puzzle as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn parse_max_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("`{value}` isn't a whole number"))?;
    if !(1..=MAX_GRID_SIZE).contains(&size) {
        return Err(format!("must be between 1 and {MAX_GRID_SIZE}"));
    }
    Ok(size)
}

fn edition_date_or_now(edition_date: Option<String>) -> String {
    edition_date.unwrap_or_else(|| {
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    })
}

struct Error(String);

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0) // Print error unquoted
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let args = Args::parse();

    let words = load_word_list(&args.words_path).map_err(|err| Error(err.to_string()))?;
    if words.is_empty() {
        return Err(Error("Word list is empty".into()));
    }

    let config = GeneratorConfig {
        max_grid_size: args.max_size,
    };
    let grid = generate_grid_with_config(&words, &config).ok_or_else(|| {
        Error(format!(
            "Longest word doesn't fit in a {0}×{0} grid",
            args.max_size
        ))
    })?;

    if grid.placements.len() < args.min_words {
        return Err(Error(format!(
            "Only {} of {} words could be placed (need {})",
            grid.placements.len(),
            words.len(),
            args.min_words
        )));
    }

    let puzzle = assemble(grid, &args.title);

    if args.json {
        let json = serde_json::to_string_pretty(&puzzle).map_err(|err| Error(err.to_string()))?;
        println!("{json}");
    } else {
        println!("{}\n", render_numbered(&puzzle.grid));
        println!("{}", render_clues(&puzzle));
    }

    if let Some(store_path) = args.store {
        let mut store = EditionStore::open(&store_path);

        if !args.json {
            if let Some(last_edition) = store.last_edition() {
                if let Some(crossword) = &last_edition.crossword {
                    let solution = crossword.to_grid().map_err(|err| Error(err.to_string()))?;
                    println!(
                        "Previous solution (edition #{})\n{}",
                        last_edition.edition_number,
                        render_solution(&solution)
                    );
                }
            }
        }

        let edition_number = store
            .next_edition_number()
            .map_err(|err| Error(err.to_string()))?;
        store
            .save_edition(PersistedEdition {
                edition_number,
                edition_date: edition_date_or_now(args.edition_date),
                crossword: Some(PersistedCrossword::from(&puzzle)),
            })
            .map_err(|err| Error(err.to_string()))?;
    }

    Ok(())
}
