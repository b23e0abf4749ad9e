//! Board module - manages the tile grid
//!
//! The board is a `rows x cols` grid of color codes stored in a flat,
//! row-major vector. Coordinates are `(row, col)` with row 0 at the top;
//! gravity pulls tiles towards the last row.
//!
//! Out-of-range coordinates are a caller bug: accessors assert instead of
//! returning `Option`, so a bad translation from screen space fails loudly
//! rather than corrupting the grid.

use arrayvec::ArrayVec;
use serde::ser::{Serialize, Serializer};

use crate::gaps::ColumnGaps;
use crate::rng::SimpleRng;
use crate::types::{Coord, Tile, EMPTY_TILE};

/// The game board - `rows x cols` cells using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Tile>,
}

impl Board {
    /// Create a new board with every cell empty
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board must be at least 1x1");
        Self {
            rows,
            cols,
            cells: vec![EMPTY_TILE; rows * cols],
        }
    }

    /// Create a board with every cell set to a uniformly random color
    pub fn random(rows: usize, cols: usize, colors_amount: u8, rng: &mut SimpleRng) -> Self {
        let mut board = Self::new(rows, cols);
        for cell in &mut board.cells {
            *cell = rng.next_color(colors_amount);
        }
        board
    }

    /// Build from rows of tiles. Every row must have the same non-zero length.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Self {
        assert!(!rows.is_empty(), "board needs at least one row");
        let cols = rows[0].len();
        assert!(cols > 0, "board needs at least one column");
        assert!(
            rows.iter().all(|row| row.len() == cols),
            "board rows must all have {} columns",
            cols
        );

        let height = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Self {
            rows: height,
            cols,
            cells,
        }
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, at: Coord) -> usize {
        assert!(
            self.contains(at),
            "({}, {}) is outside the {}x{} board",
            at.row,
            at.col,
            self.rows,
            self.cols
        );
        at.row * self.cols + at.col
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if the coordinate lies on the board
    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    pub fn get(&self, at: Coord) -> Tile {
        self.cells[self.index(at)]
    }

    pub fn set(&mut self, at: Coord, tile: Tile) {
        let idx = self.index(at);
        self.cells[idx] = tile;
    }

    /// In-bounds 4-neighbors, in up/down/left/right order
    pub fn neighbors(&self, at: Coord) -> ArrayVec<Coord, 4> {
        let mut out = ArrayVec::new();
        if at.row > 0 {
            out.push(Coord::new(at.row - 1, at.col));
        }
        if at.row + 1 < self.rows {
            out.push(Coord::new(at.row + 1, at.col));
        }
        if at.col > 0 {
            out.push(Coord::new(at.row, at.col - 1));
        }
        if at.col + 1 < self.cols {
            out.push(Coord::new(at.row, at.col + 1));
        }
        out
    }

    /// Zero out every listed cell
    pub fn burn(&mut self, tiles: &[Coord]) {
        for &at in tiles {
            self.set(at, EMPTY_TILE);
        }
    }

    /// Let surviving tiles fall into the gaps, column by column.
    ///
    /// Gaps are processed bottom to top. Each one is closed with a two-pointer
    /// shift (`end` walks up from the gap's last row, the source walks up from
    /// the row above its first row) that stops at the next gap up; the freed
    /// span then joins that gap, so stacked gaps collapse in one pass. The
    /// result keeps surviving tiles in order with all zeros on top.
    pub fn collapse(&mut self, gaps: &ColumnGaps) {
        for (col, column_gaps) in gaps.iter() {
            let mut pending = column_gaps.to_vec();
            while let Some(gap) = pending.pop() {
                let top_limit = pending.last().map_or(0, |above| above.end + 1);
                let mut start = gap.start;
                let mut end = gap.end;

                while start > top_limit {
                    let src = (start - 1) * self.cols + col;
                    let dst = end * self.cols + col;
                    self.cells[dst] = self.cells[src];
                    self.cells[src] = EMPTY_TILE;
                    start -= 1;
                    end -= 1;
                }

                if let Some(above) = pending.last_mut() {
                    above.end += gap.len();
                }
            }
        }
    }

    /// Fill the empty top of each column with random colors.
    ///
    /// Scans every column from row 0 until the first non-empty cell. Returns
    /// the filled coordinates, column by column, top to bottom.
    pub fn refill(
        &mut self,
        columns: impl IntoIterator<Item = usize>,
        colors_amount: u8,
        rng: &mut SimpleRng,
    ) -> Vec<Coord> {
        let mut filled = Vec::new();
        for col in columns {
            for row in 0..self.rows {
                let at = Coord::new(row, col);
                if self.get(at) != EMPTY_TILE {
                    break;
                }
                self.set(at, rng.next_color(colors_amount));
                filled.push(at);
            }
        }
        filled
    }

    /// Uniformly permute all tiles, keeping the board shape
    pub fn shuffle(&mut self, rng: &mut SimpleRng) {
        rng.shuffle(&mut self.cells);
    }

    /// How many cells hold each color, indexed by color code
    pub fn color_counts(&self) -> Vec<usize> {
        let max = self.cells.iter().copied().max().unwrap_or(EMPTY_TILE) as usize;
        let mut counts = vec![0; max + 1];
        for &tile in &self.cells {
            counts[tile as usize] += 1;
        }
        counts
    }

    /// One column's tiles, top to bottom
    pub fn column(&self, col: usize) -> Vec<Tile> {
        assert!(col < self.cols, "column {} out of range", col);
        (0..self.rows)
            .map(|row| self.cells[row * self.cols + col])
            .collect()
    }

    pub fn row(&self, row: usize) -> &[Tile] {
        assert!(row < self.rows, "row {} out of range", row);
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Convert to rows of tiles
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.cells.chunks(self.cols).map(<[Tile]>::to_vec).collect()
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&tile| tile != EMPTY_TILE)
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cells.chunks(self.cols))
    }
}
