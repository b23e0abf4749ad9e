//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types shared by the grid engine, the
//! animation sequencer and any rendering/input collaborator. Everything here is
//! plain data: no game rules, no timing, no I/O beyond config loading.
//!
//! # Tiles
//!
//! A tile is a `u8` color code. [`EMPTY_TILE`] (`0`) marks a burnt cell; codes
//! `1..=colors_amount` are tile colors.
//!
//! # Coordinates
//!
//! Cells are addressed as `(row, col)`, row 0 at the top. Gravity pulls towards
//! the highest row index.
//!
//! # Animation Timing
//!
//! Stage durations are logical time units supplied by the external clock, not
//! frames or milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BURN_DURATION` | 50 | Removed tiles shrink to nothing |
//! | `FALL_DURATION` | 25 | Surviving tiles slide into the gaps |
//! | `FILL_DURATION` | 50 | New tiles grow in at the top |
//!
//! # Examples
//!
//! ```
//! use tile_burst_types::{Coord, Gap, GameConfig};
//!
//! let gap = Gap::new(2, 4);
//! assert_eq!(gap.len(), 3);
//! assert!(gap.contains(3));
//!
//! let origin = Coord::new(1, 1);
//! assert_eq!(origin.row, 1);
//!
//! let config = GameConfig::default();
//! assert!(config.validate().is_ok());
//! ```

pub mod config;

pub use config::{ConfigError, GameConfig};

use serde::{Deserialize, Serialize};

/// A board cell: `0` is empty, anything else is a color code.
pub type Tile = u8;

/// Burnt / not yet refilled cell.
pub const EMPTY_TILE: Tile = 0;

/// Burn stage duration (logical time units)
pub const BURN_DURATION: f32 = 50.0;

/// Fall stage duration; shorter than the others so the slide reads as snappy
pub const FALL_DURATION: f32 = 25.0;

/// Fill stage duration (logical time units)
pub const FILL_DURATION: f32 = 50.0;

/// Default board height (rows)
pub const DEFAULT_ROWS: usize = 11;

/// Default board width (columns)
pub const DEFAULT_COLS: usize = 9;

/// Default number of tile colors
pub const DEFAULT_COLORS_AMOUNT: u8 = 5;

/// Default minimum removable group size
pub const DEFAULT_MIN_GROUP_SIZE: usize = 2;

/// Default score needed to win
pub const DEFAULT_POINTS_GOAL: u32 = 40;

/// Default number of accepted moves per session
pub const DEFAULT_MOVES_LIMIT: u32 = 10;

/// Default number of automatic reshuffles per session
pub const DEFAULT_SHUFFLES_LIMIT: u32 = 10;

/// Largest color code a board can hold (`0` is reserved for empty cells)
pub const MAX_COLORS_AMOUNT: u8 = u8::MAX - 1;


/// A grid position. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Sort key ordering by column first, then by row.
    pub fn column_major_key(&self) -> (usize, usize) {
        (self.col, self.row)
    }
}

/// An inclusive range of removed rows inside one column.
///
/// Gaps in a column are kept sorted by `start`, never overlap, and are never
/// row-adjacent (adjacent removals merge into a single gap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gap {
    pub start: usize,
    pub end: usize,
}

impl Gap {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "gap start {} after end {}", start, end);
        Self { start, end }
    }

    /// Number of removed rows in the gap (always at least 1)
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, row: usize) -> bool {
        self.start <= row && row <= self.end
    }

    /// True when `row` directly follows the gap's last row
    pub fn touches(&self, row: usize) -> bool {
        self.end + 1 == row
    }
}

/// Where a session stands.
///
/// - **Playing**: moves are accepted
/// - **Won**: score reached the goal; carries the final score
/// - **Lost**: moves or reshuffles ran out; carries the missing points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GameStatus {
    Playing,
    Won { score: u32 },
    Lost { shortfall: u32 },
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won { .. } => "won",
            GameStatus::Lost { .. } => "lost",
        }
    }
}
