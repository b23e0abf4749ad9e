//! Grid engine - pure, deterministic, and testable
//!
//! This crate holds every rule of the tile-matching game: board state, group
//! discovery, gravity, refill, scoring and end-of-session detection. It does no
//! rendering, timing or I/O; collaborators drive it with clicks and listen to
//! the [`GridEvent`]s it emits.
//!
//! - **Deterministic**: the same seed deals the same boards and refills
//! - **Single-threaded**: a move mutates the board inside one call, then notifies
//! - **Copy-on-emit**: every event owns its board/gap payload
//!
//! # Module Structure
//!
//! - [`board`]: flat `rows x cols` grid with burn, collapse, refill and shuffle
//! - [`group`]: iterative flood fill and move detection
//! - [`gaps`]: per-column runs of removed rows
//! - [`game_state`]: the [`GridEngine`] session
//! - [`events`]: typed listener list and the [`GridEvent`] variants
//! - [`rng`]: seeded LCG with uniform colors and Fisher-Yates shuffle
//! - [`scoring`]: points and win/lose thresholds
//! - [`snapshot`]: detached copy of a session
//!
//! # A Move
//!
//! Clicking a group of at least `min_group_size_limit` tiles:
//!
//! 1. bumps moves and score, broadcasts stats
//! 2. emits `BurnTiles` and `FallTiles`, both carrying the pre-move board
//! 3. burns the group, collapses each touched column, refills the top
//! 4. emits `FillTiles` with the post-move board
//! 5. emits `Win` or `Lose` if the session ended
//!
//! # Example
//!
//! ```
//! use tile_burst_core::{Board, ClickOutcome, GridEngine};
//! use tile_burst_types::{GameConfig, GameStatus};
//!
//! let config = GameConfig {
//!     rows: 3,
//!     cols: 3,
//!     points_goal: 5,
//!     ..GameConfig::default()
//! };
//! let board = Board::from_rows(vec![vec![1; 3]; 3]);
//! let mut engine = GridEngine::with_board(config, board, 12345).unwrap();
//!
//! let outcome = engine.click_tile(1, 1);
//! assert_eq!(
//!     outcome,
//!     ClickOutcome::Accepted { burnt: 9, status: GameStatus::Won { score: 9 } }
//! );
//! assert!(engine.board().is_full());
//! ```

pub mod board;
pub mod events;
pub mod game_state;
pub mod gaps;
pub mod group;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tile_burst_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use events::{Emitter, GridEvent, ListenerId};
pub use game_state::{ClickOutcome, GridEngine};
pub use gaps::ColumnGaps;
pub use group::{find_group, find_groups, has_possible_moves, largest_group};
pub use rng::SimpleRng;
pub use scoring::{calculate_score, check_game_over};
pub use snapshot::GameSnapshot;
