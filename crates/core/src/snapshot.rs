use serde::Serialize;

use crate::types::{GameStatus, Tile};

/// Owned copy of the whole session, detached from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: Vec<Vec<Tile>>,
    pub score: u32,
    pub moves: u32,
    pub moves_remaining: u32,
    pub shuffles: u32,
    pub status: GameStatus,
    pub started: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.started && !self.status.is_over()
    }
}
