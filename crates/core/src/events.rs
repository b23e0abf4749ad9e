//! Outbound notifications and the listener list that delivers them.
//!
//! Dispatch is synchronous and runs listeners in subscription order. Listeners
//! receive a shared reference to an event that owns its payload: boards and
//! gap data inside an event are copies taken at emission time, so nothing a
//! listener holds on to can change after delivery.

use std::fmt;

use serde::Serialize;

use crate::board::Board;
use crate::gaps::ColumnGaps;
use crate::types::Coord;

/// Handle returned by [`Emitter::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Ordered list of listeners for one event type.
pub struct Emitter<E> {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<E>)>,
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Register a listener; it runs after every earlier one.
    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Everything the grid engine announces.
///
/// A move emits, in order: `StatsChange`, `BurnTiles`, `FallTiles`,
/// `FillTiles`, then `Win` or `Lose` if the session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GridEvent {
    /// Full board broadcast
    SyncTiles { tiles: Board },
    #[serde(rename_all = "camelCase")]
    StatsChange { score: u32, moves_remaining: u32 },
    /// Pre-move board and the cells about to burn
    BurnTiles { tiles: Board, gaps: ColumnGaps },
    /// Pre-move board and the gaps the tiles above will fall into
    FallTiles { tiles: Board, gaps: ColumnGaps },
    /// Post-move board and the newly colored cells
    FillTiles { tiles: Board, filled: Vec<Coord> },
    Win { score: u32 },
    Lose { shortfall: u32 },
}

impl GridEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GridEvent::SyncTiles { .. } => "syncTiles",
            GridEvent::StatsChange { .. } => "statsChange",
            GridEvent::BurnTiles { .. } => "burnTiles",
            GridEvent::FallTiles { .. } => "fallTiles",
            GridEvent::FillTiles { .. } => "fillTiles",
            GridEvent::Win { .. } => "win",
            GridEvent::Lose { .. } => "lose",
        }
    }
}
