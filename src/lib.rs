//! Tile Burst (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so front ends and tests can
//! use `tile_burst::{core, anim, types}` without tracking the crate split.
//! [`autoplay`] holds the pieces of the headless runner that are worth testing.

pub mod autoplay;

pub use tile_burst_anim as anim;
pub use tile_burst_core as core;
pub use tile_burst_types as types;
