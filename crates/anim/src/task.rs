//! Animation tasks and the FIFO queue they wait in.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tile_burst_core::{Board, ColumnGaps, GridEvent};

use crate::types::{BURN_DURATION, FALL_DURATION, FILL_DURATION};

/// Sequencer state: idle, or which kind of task is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Idle,
    Burning,
    Falling,
    Filling,
}

impl Stage {
    /// Logical duration of the stage; `None` while idle
    pub fn duration(&self) -> Option<f32> {
        match self {
            Stage::Idle => None,
            Stage::Burning => Some(BURN_DURATION),
            Stage::Falling => Some(FALL_DURATION),
            Stage::Filling => Some(FILL_DURATION),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Burning => "burning",
            Stage::Falling => "falling",
            Stage::Filling => "filling",
        }
    }
}

/// Pre-move board and gaps, frozen when the task was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageData {
    pub tiles: Board,
    pub gaps: ColumnGaps,
}

/// One queued animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationTask {
    Burn(StageData),
    Fall(StageData),
    Fill,
}

impl AnimationTask {
    /// The task a grid notification asks for, if any
    pub fn from_grid_event(event: &GridEvent) -> Option<Self> {
        match event {
            GridEvent::BurnTiles { tiles, gaps } => Some(AnimationTask::Burn(StageData {
                tiles: tiles.clone(),
                gaps: gaps.clone(),
            })),
            GridEvent::FallTiles { tiles, gaps } => Some(AnimationTask::Fall(StageData {
                tiles: tiles.clone(),
                gaps: gaps.clone(),
            })),
            GridEvent::FillTiles { .. } => Some(AnimationTask::Fill),
            _ => None,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            AnimationTask::Burn(_) => Stage::Burning,
            AnimationTask::Fall(_) => Stage::Falling,
            AnimationTask::Fill => Stage::Filling,
        }
    }

    /// Split into the stage it starts and the data it carries
    pub fn into_parts(self) -> (Stage, Option<StageData>) {
        match self {
            AnimationTask::Burn(data) => (Stage::Burning, Some(data)),
            AnimationTask::Fall(data) => (Stage::Falling, Some(data)),
            AnimationTask::Fill => (Stage::Filling, None),
        }
    }
}

/// Unbounded FIFO of pending tasks.
///
/// Cloning shares the same queue, which lets a grid listener append while the
/// sequencer pops. Single-threaded by construction.
#[derive(Debug, Clone, Default)]
pub struct AnimationQueue {
    inner: Rc<RefCell<VecDeque<AnimationTask>>>,
}

impl AnimationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, task: AnimationTask) {
        self.inner.borrow_mut().push_back(task);
    }

    pub fn pop(&self) -> Option<AnimationTask> {
        self.inner.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Stages of the waiting tasks, head first
    pub fn stages(&self) -> Vec<Stage> {
        self.inner.borrow().iter().map(AnimationTask::stage).collect()
    }
}
