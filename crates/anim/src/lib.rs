//! Animation sequencer for the tile grid
//!
//! Converts the grid engine's move notifications into an ordered stream of
//! interpolated per-tile frames. It owns no clock: whoever renders calls
//! [`AnimationSequencer::tick`] once per frame with the elapsed time.
//!
//! # Stages
//!
//! | Stage | Duration | Frame output |
//! |-------|----------|--------------|
//! | Burning | 50 | `TileBurn` per removed tile, scale `1 - ease(p)` |
//! | Falling | 25 | `TileFall` per moving tile, offset `rows * ease(p)` |
//! | Filling | 50 | one `TileFill`, scale `ease(p)` |
//!
//! `p` is time in stage over its duration; `ease` is a cubic Bézier ease-out
//! through control points `(1, 1)` and `(0.5, 1)`.
//!
//! # Example
//!
//! ```
//! use tile_burst_anim::{AnimationSequencer, Stage};
//! use tile_burst_core::{Board, GridEngine};
//! use tile_burst_types::GameConfig;
//!
//! let config = GameConfig { rows: 2, cols: 2, ..GameConfig::default() };
//! let board = Board::from_rows(vec![vec![1, 1], vec![2, 3]]);
//! let mut engine = GridEngine::with_board(config, board, 7).unwrap();
//!
//! let mut sequencer = AnimationSequencer::new();
//! sequencer.listen_to(&mut engine);
//!
//! engine.click_tile(0, 0);
//! assert_eq!(sequencer.pending(), 3);
//!
//! sequencer.tick(1.0, &mut engine);
//! assert_eq!(sequencer.stage(), Stage::Burning);
//! ```

pub mod easing;
pub mod sequencer;
pub mod task;

pub use tile_burst_types as types;

pub use easing::CubicBezier;
pub use sequencer::{AnimationEvent, AnimationSequencer, BoardSync};
pub use task::{AnimationQueue, AnimationTask, Stage, StageData};
