//! Group discovery - maximal 4-connected same-color regions
//!
//! Flood fill uses an explicit stack so large boards cannot overflow the call
//! stack. Empty cells never form a group.

use crate::board::Board;
use crate::types::{Coord, EMPTY_TILE};

/// The group containing `origin`, in discovery order.
///
/// Returns an empty vec when `origin` is an empty cell.
pub fn find_group(board: &Board, origin: Coord) -> Vec<Coord> {
    let mut visited = vec![false; board.rows() * board.cols()];
    flood(board, origin, &mut visited)
}

/// Flood fill from `origin`, marking members in `visited`.
///
/// Only members are marked, so one mask can be shared across several fills
/// without hiding cells of other colors.
fn flood(board: &Board, origin: Coord, visited: &mut [bool]) -> Vec<Coord> {
    let target = board.get(origin);
    if target == EMPTY_TILE {
        return Vec::new();
    }

    let cols = board.cols();
    let mut group = Vec::new();
    let mut stack = vec![origin];

    while let Some(at) = stack.pop() {
        let idx = at.row * cols + at.col;
        if visited[idx] || board.get(at) != target {
            continue;
        }
        visited[idx] = true;
        group.push(at);
        stack.extend(board.neighbors(at));
    }

    group
}

/// Whether any group on the board reaches `min_group_size`.
///
/// This reruns a full flood fill from every cell without sharing work between
/// them, which is quadratic in board size. Fine for puzzle-sized boards; it is
/// the engine's most expensive query.
pub fn has_possible_moves(board: &Board, min_group_size: usize) -> bool {
    (0..board.rows()).any(|row| {
        (0..board.cols()).any(|col| find_group(board, Coord::new(row, col)).len() >= min_group_size)
    })
}

/// Every group of at least `min_group_size` cells, each listed once.
///
/// Groups come out in row-major order of their first-seen cell.
pub fn find_groups(board: &Board, min_group_size: usize) -> Vec<Vec<Coord>> {
    let mut visited = vec![false; board.rows() * board.cols()];
    let mut groups = Vec::new();

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            if visited[row * board.cols() + col] {
                continue;
            }
            let group = flood(board, Coord::new(row, col), &mut visited);
            if !group.is_empty() && group.len() >= min_group_size {
                groups.push(group);
            }
        }
    }

    groups
}

/// The largest removable group, earliest found on ties
pub fn largest_group(board: &Board, min_group_size: usize) -> Option<Vec<Coord>> {
    find_groups(board, min_group_size)
        .into_iter()
        .reduce(|best, group| if group.len() > best.len() { group } else { best })
}
