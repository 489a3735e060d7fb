//! Greedy interlocking crossword generation: place words on a bounded grid, trim it, number the
//! entries, and assemble the across/down clue lists.

pub mod candidate_search;
#[cfg(feature = "serde")]
pub mod edition_store;
pub mod generator;
pub mod grid_buffer;
pub mod puzzle;
pub mod render;
pub mod types;
pub mod validity;
pub mod word_list;

pub use generator::{generate_grid, generate_grid_with_config, GeneratorConfig};
pub use puzzle::{assemble, Clue, Puzzle};
pub use types::{Direction, Grid, Placement};
pub use word_list::WordEntry;

pub const LOG_PLACEMENT_PROCESS: bool = cfg!(feature = "log_placement_process");
pub const CHECK_INVARIANTS: bool = cfg!(feature = "check_invariants");

/// The side length of the square working buffer when the caller doesn't specify one.
pub const DEFAULT_MAX_GRID_SIZE: usize = 15;

/// The largest working buffer a generation run will allocate; bigger sizes are rejected.
pub const MAX_GRID_SIZE: usize = 1024;

/// The expected maximum length for a single word; longer words still work but spill onto the heap.
pub const MAX_WORD_LENGTH: usize = 21;
