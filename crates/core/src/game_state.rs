//! Grid engine - owns the board and runs the rules of a session
//!
//! Ties together the board, group discovery, gap data, RNG and scoring. All of
//! a move's mutation happens inside one `click_tile` call; observers learn
//! about it through [`GridEvent`]s whose payloads are copies, so they never see
//! the board change underneath them.

use crate::board::Board;
use crate::events::{Emitter, GridEvent, ListenerId};
use crate::gaps::ColumnGaps;
use crate::group::{find_group, has_possible_moves};
use crate::rng::SimpleRng;
use crate::scoring::{calculate_score, check_game_over, shortfall};
use crate::snapshot::GameSnapshot;
use crate::types::{ConfigError, Coord, GameConfig, GameStatus};

/// Which branch a click took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The group was removed; `status` is the session state after the move
    Accepted { burnt: usize, status: GameStatus },
    /// Too small, no move anywhere: the board was reshuffled
    Reshuffled,
    /// Too small, no move anywhere, reshuffles used up
    Lost { shortfall: u32 },
    /// Too small, but a valid move exists elsewhere
    NoMove,
    /// Session not started or already over. A won or lost session takes no
    /// more moves until `start`, `load_board` or `reset` reopens it.
    Ignored,
}

/// Complete session state
#[derive(Debug)]
pub struct GridEngine {
    config: GameConfig,
    board: Board,
    rng: SimpleRng,
    moves: u32,
    score: u32,
    shuffles: u32,
    status: GameStatus,
    started: bool,
    events: Emitter<GridEvent>,
}

impl GridEngine {
    /// Create an engine with an empty board. Call [`start`](Self::start) to deal tiles.
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.rows, config.cols),
            config,
            rng: SimpleRng::new(seed),
            moves: 0,
            score: 0,
            shuffles: 0,
            status: GameStatus::Playing,
            started: false,
            events: Emitter::new(),
        })
    }

    /// Create an engine already playing on `board`
    pub fn with_board(config: GameConfig, board: Board, seed: u32) -> Result<Self, ConfigError> {
        let mut engine = Self::new(config, seed)?;
        engine.load_board(board);
        Ok(engine)
    }

    /// Register an observer; observers run in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&GridEvent) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Deal a fresh random board, zero the session counters and broadcast both.
    pub fn start(&mut self) {
        let board = Board::random(
            self.config.rows,
            self.config.cols,
            self.config.colors_amount,
            &mut self.rng,
        );
        self.load_board(board);
    }

    /// Start a session on a known board, zeroing the counters.
    pub fn load_board(&mut self, board: Board) {
        assert!(
            board.rows() == self.config.rows && board.cols() == self.config.cols,
            "board is {}x{}, config expects {}x{}",
            board.rows(),
            board.cols(),
            self.config.rows,
            self.config.cols
        );

        self.board = board;
        self.moves = 0;
        self.score = 0;
        self.shuffles = 0;
        self.status = GameStatus::Playing;
        self.started = true;

        self.emit_sync_tiles();
        self.emit_stats();
    }

    /// Zero score and moves, reshuffle once and restore the reshuffle budget.
    ///
    /// The stats broadcast is all zeros, `moves_remaining` included; query
    /// [`moves_remaining`](Self::moves_remaining) for the restored budget.
    pub fn reset(&mut self) {
        self.moves = 0;
        self.score = 0;
        self.status = GameStatus::Playing;
        let event = GridEvent::StatsChange {
            score: 0,
            moves_remaining: 0,
        };
        self.events.emit(&event);
        self.shuffle_tiles();
        self.shuffles = 0;
    }

    /// Broadcast the current board
    pub fn emit_sync_tiles(&mut self) {
        let event = GridEvent::SyncTiles {
            tiles: self.board.clone(),
        };
        self.events.emit(&event);
    }

    /// Handle a click on `(row, col)`.
    ///
    /// Panics if the coordinate is off the board.
    pub fn click_tile(&mut self, row: usize, col: usize) -> ClickOutcome {
        if !self.started || self.status.is_over() {
            return ClickOutcome::Ignored;
        }

        let origin = Coord::new(row, col);
        assert!(
            self.board.contains(origin),
            "click ({}, {}) is outside the {}x{} board",
            row,
            col,
            self.config.rows,
            self.config.cols
        );

        let group = find_group(&self.board, origin);
        if !group.is_empty() && group.len() >= self.config.min_group_size_limit {
            let burnt = group.len();
            self.handle_move(group);
            let status = self.check_game_over();
            return ClickOutcome::Accepted { burnt, status };
        }

        if !has_possible_moves(&self.board, self.config.min_group_size_limit) {
            if self.shuffles < self.config.shuffles_limit {
                self.shuffle_tiles();
                return ClickOutcome::Reshuffled;
            }
            let shortfall = shortfall(self.config.points_goal, self.score);
            self.finish(GameStatus::Lost { shortfall });
            return ClickOutcome::Lost { shortfall };
        }

        // A valid move exists elsewhere; this click simply does nothing.
        ClickOutcome::NoMove
    }

    fn handle_move(&mut self, mut group: Vec<Coord>) {
        self.moves += 1;
        self.score += calculate_score(group.len());
        self.emit_stats();

        group.sort_unstable_by_key(Coord::column_major_key);
        let gaps = ColumnGaps::from_sorted_group(self.config.cols, &group);

        let burn = GridEvent::BurnTiles {
            tiles: self.board.clone(),
            gaps: gaps.clone(),
        };
        self.events.emit(&burn);
        let fall = GridEvent::FallTiles {
            tiles: self.board.clone(),
            gaps: gaps.clone(),
        };
        self.events.emit(&fall);

        self.board.burn(&group);
        self.board.collapse(&gaps);
        let filled = self.board.refill(
            gaps.affected_columns(),
            self.config.colors_amount,
            &mut self.rng,
        );

        let fill = GridEvent::FillTiles {
            tiles: self.board.clone(),
            filled,
        };
        self.events.emit(&fill);
    }

    fn check_game_over(&mut self) -> GameStatus {
        let status = check_game_over(&self.config, self.score, self.moves);
        if status.is_over() {
            self.finish(status);
        }
        status
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        let event = match status {
            GameStatus::Won { score } => GridEvent::Win { score },
            GameStatus::Lost { shortfall } => GridEvent::Lose { shortfall },
            GameStatus::Playing => return,
        };
        self.events.emit(&event);
    }

    fn shuffle_tiles(&mut self) {
        self.shuffles += 1;
        self.board.shuffle(&mut self.rng);
        self.emit_sync_tiles();
    }

    fn emit_stats(&mut self) {
        let event = GridEvent::StatsChange {
            score: self.score,
            moves_remaining: self.moves_remaining(),
        };
        self.events.emit(&event);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn moves_remaining(&self) -> u32 {
        self.config.moves_limit.saturating_sub(self.moves)
    }

    /// Automatic reshuffles used since the last start/reset
    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_rows(),
            score: self.score,
            moves: self.moves,
            moves_remaining: self.moves_remaining(),
            shuffles: self.shuffles,
            status: self.status,
            started: self.started,
        }
    }
}
