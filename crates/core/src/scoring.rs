//! Scoring module - points per move and end-of-session rules

use crate::types::{GameConfig, GameStatus};

/// Points for burning `burnt` tiles: one per tile, no size multiplier
pub fn calculate_score(burnt: usize) -> u32 {
    burnt as u32
}

/// Points still missing to reach the goal
pub fn shortfall(points_goal: u32, score: u32) -> u32 {
    points_goal.saturating_sub(score)
}

/// Outcome after an accepted move.
///
/// Reaching the goal wins even on the last allowed move; otherwise running out
/// of moves loses with the shortfall.
pub fn check_game_over(config: &GameConfig, score: u32, moves: u32) -> GameStatus {
    if score >= config.points_goal {
        GameStatus::Won { score }
    } else if moves >= config.moves_limit {
        GameStatus::Lost {
            shortfall: shortfall(config.points_goal, score),
        }
    } else {
        GameStatus::Playing
    }
}
