//! Column gap data - removed cells grouped into per-column row ranges
//!
//! Derived once per accepted move from the column-major sorted group. The
//! board's compaction and both burn and fall animations read it.

use serde::Serialize;

use crate::types::{Coord, Gap};

/// Gaps per column, indexed by column number.
///
/// Invariant: every column's gaps are sorted by `start`, disjoint, and
/// separated by at least one surviving row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnGaps {
    columns: Vec<Vec<Gap>>,
}

impl ColumnGaps {
    /// No gaps in any of `cols` columns
    pub fn new(cols: usize) -> Self {
        Self {
            columns: vec![Vec::new(); cols],
        }
    }

    /// Build from a group already sorted by `(col, row)`.
    pub fn from_sorted_group(cols: usize, group: &[Coord]) -> Self {
        debug_assert!(
            group
                .windows(2)
                .all(|w| w[0].column_major_key() < w[1].column_major_key()),
            "group must be sorted column-major without duplicates"
        );

        let mut gaps = Self::new(cols);
        for at in group {
            gaps.push(at.col, Gap::new(at.row, at.row));
        }
        gaps
    }

    /// Sort a copy of `group` column-major and build from it
    pub fn from_group(cols: usize, group: &[Coord]) -> Self {
        let mut sorted = group.to_vec();
        sorted.sort_unstable_by_key(Coord::column_major_key);
        sorted.dedup();
        Self::from_sorted_group(cols, &sorted)
    }

    /// Append a gap below the column's current last gap, merging when the two
    /// are row-adjacent.
    pub fn push(&mut self, col: usize, gap: Gap) {
        let column = &mut self.columns[col];
        match column.last_mut() {
            Some(last) if last.touches(gap.start) => last.end = gap.end,
            Some(last) => {
                assert!(
                    last.end < gap.start,
                    "gap {:?} pushed above {:?} in column {}",
                    gap,
                    last,
                    col
                );
                column.push(gap);
            }
            None => column.push(gap),
        }
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    /// Gaps of one column, top to bottom (empty if the column is untouched)
    pub fn column(&self, col: usize) -> &[Gap] {
        &self.columns[col]
    }

    /// Columns holding at least one gap, ascending, with their gaps
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Gap])> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, gaps)| !gaps.is_empty())
            .map(|(col, gaps)| (col, gaps.as_slice()))
    }

    /// Indices of columns holding at least one gap, ascending
    pub fn affected_columns(&self) -> Vec<usize> {
        self.iter().map(|(col, _)| col).collect()
    }

    /// Total number of removed cells
    pub fn removed_count(&self) -> usize {
        self.columns.iter().flatten().map(Gap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }
}
