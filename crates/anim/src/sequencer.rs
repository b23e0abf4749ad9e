//! Animation sequencer - turns grid moves into timed per-tile frames
//!
//! One task plays at a time. Every tick the active stage's clock advances by the
//! supplied delta and the stage emits a full frame for that progress. When a
//! stage reaches its duration the next queued task starts; when the queue runs
//! dry the sequencer announces completion and asks the grid to re-broadcast its
//! board so observers converge on the logical state.

use serde::Serialize;

use tile_burst_core::{Emitter, GridEngine, ListenerId};

use crate::easing::CubicBezier;
use crate::task::{AnimationQueue, AnimationTask, Stage, StageData};
use crate::types::{Coord, Tile, BURN_DURATION, FALL_DURATION, FILL_DURATION};

/// Something that can re-broadcast the authoritative board.
pub trait BoardSync {
    fn resync(&mut self);
}

impl BoardSync for GridEngine {
    fn resync(&mut self) {
        self.emit_sync_tiles();
    }
}

/// Per-frame output of the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnimationEvent {
    /// A removed tile at this frame's size (1 = full, 0 = gone)
    TileBurn {
        tile: Tile,
        row: usize,
        col: usize,
        scale: f32,
    },
    /// A surviving tile shifted down by `offset` rows
    TileFall {
        tile: Tile,
        row: usize,
        col: usize,
        offset: f32,
    },
    /// Growth factor for every newly filled tile
    TileFill { scale: f32 },
    AnimationsComplete,
}

/// Single-threaded animation state machine driven by an external clock.
#[derive(Debug)]
pub struct AnimationSequencer {
    queue: AnimationQueue,
    stage: Stage,
    stage_data: Option<StageData>,
    elapsed: f32,
    easing: CubicBezier,
    events: Emitter<AnimationEvent>,
}

impl AnimationSequencer {
    pub fn new() -> Self {
        Self {
            queue: AnimationQueue::new(),
            stage: Stage::Idle,
            stage_data: None,
            elapsed: 0.0,
            easing: CubicBezier::ease_out(),
            events: Emitter::new(),
        }
    }

    /// Queue a task for every burn/fall/fill notification `engine` emits.
    pub fn listen_to(&self, engine: &mut GridEngine) -> ListenerId {
        let queue = self.queue.clone();
        engine.subscribe(move |event| {
            if let Some(task) = AnimationTask::from_grid_event(event) {
                queue.push(task);
            }
        })
    }

    pub fn enqueue(&mut self, task: AnimationTask) {
        self.queue.push(task);
    }

    /// Register a frame observer; observers run in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&AnimationEvent) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Advance by `delta` time units.
    ///
    /// A stage is done once its clock reaches its duration; the next tick then
    /// starts the following task (or completes the run) and applies that
    /// tick's delta to it. Negative deltas count as zero, and a zero delta
    /// never starts a task early.
    pub fn tick(&mut self, delta: f32, sync: &mut impl BoardSync) {
        if self.stage == Stage::Idle || self.stage_finished() {
            match self.queue.pop() {
                Some(task) => self.begin(task),
                None => {
                    if self.stage != Stage::Idle {
                        self.events.emit(&AnimationEvent::AnimationsComplete);
                        sync.resync();
                        self.stage = Stage::Idle;
                        self.stage_data = None;
                        self.elapsed = 0.0;
                    }
                    return;
                }
            }
        }

        self.elapsed += delta.max(0.0);
        match self.stage {
            Stage::Burning => self.tick_burning(),
            Stage::Falling => self.tick_falling(),
            Stage::Filling => self.tick_filling(),
            Stage::Idle => {}
        }
    }

    fn begin(&mut self, task: AnimationTask) {
        let (stage, data) = task.into_parts();
        self.stage = stage;
        self.stage_data = data;
        self.elapsed = 0.0;
    }

    fn stage_finished(&self) -> bool {
        self.stage
            .duration()
            .is_some_and(|duration| self.elapsed >= duration)
    }

    fn progress(&self, duration: f32) -> f32 {
        self.easing.ease(self.elapsed / duration)
    }

    fn tick_burning(&mut self) {
        let scale = 1.0 - self.progress(BURN_DURATION);
        let Some(data) = &self.stage_data else {
            return;
        };

        for (col, gaps) in data.gaps.iter() {
            for gap in gaps {
                for row in gap.start..=gap.end {
                    let event = AnimationEvent::TileBurn {
                        tile: data.tiles.get(Coord::new(row, col)),
                        row,
                        col,
                        scale,
                    };
                    self.events.emit(&event);
                }
            }
        }
    }

    fn tick_falling(&mut self) {
        let progress = self.progress(FALL_DURATION);
        let Some(data) = &self.stage_data else {
            return;
        };

        for (col, gaps) in data.gaps.iter() {
            // Rows removed below the span currently being walked.
            let mut fallen_below = 0;
            for (i, gap) in gaps.iter().enumerate().rev() {
                let span_top = if i > 0 { gaps[i - 1].end + 1 } else { 0 };
                let distance = fallen_below + gap.len();
                for row in span_top..gap.start {
                    let event = AnimationEvent::TileFall {
                        tile: data.tiles.get(Coord::new(row, col)),
                        row,
                        col,
                        offset: distance as f32 * progress,
                    };
                    self.events.emit(&event);
                }
                fallen_below = distance;
            }
        }
    }

    fn tick_filling(&mut self) {
        let scale = self.progress(FILL_DURATION);
        self.events.emit(&AnimationEvent::TileFill { scale });
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Time spent in the current stage
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Tasks waiting behind the active one
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Nothing playing and nothing queued
    pub fn is_idle(&self) -> bool {
        self.stage == Stage::Idle && self.queue.is_empty()
    }
}

impl Default for AnimationSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tile_burst_core::{Board, ColumnGaps};

    #[derive(Default)]
    struct CountSync(u32);

    impl BoardSync for CountSync {
        fn resync(&mut self) {
            self.0 += 1;
        }
    }

    fn record(seq: &mut AnimationSequencer) -> Rc<RefCell<Vec<AnimationEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        seq.subscribe(move |event| sink.borrow_mut().push(*event));
        log
    }

    fn stage_data(rows: Vec<Vec<Tile>>, removed: &[(usize, usize)]) -> StageData {
        let tiles = Board::from_rows(rows);
        let group: Vec<Coord> = removed.iter().map(|&(r, c)| Coord::new(r, c)).collect();
        let gaps = ColumnGaps::from_group(tiles.cols(), &group);
        StageData { tiles, gaps }
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut seq = AnimationSequencer::new();
        let log = record(&mut seq);
        let mut sync = CountSync::default();

        seq.tick(10.0, &mut sync);
        assert!(log.borrow().is_empty());
        assert_eq!(sync.0, 0);
        assert!(seq.is_idle());
    }

    #[test]
    fn test_burn_frames_shrink() {
        let mut seq = AnimationSequencer::new();
        let log = record(&mut seq);
        let mut sync = CountSync::default();
        let data = stage_data(vec![vec![4], vec![4], vec![2]], &[(0, 0), (1, 0)]);
        seq.enqueue(AnimationTask::Burn(data));

        seq.tick(25.0, &mut sync);
        assert_eq!(seq.stage(), Stage::Burning);
        {
            let events = log.borrow();
            assert_eq!(events.len(), 2);
            for (i, event) in events.iter().enumerate() {
                match *event {
                    AnimationEvent::TileBurn {
                        tile,
                        row,
                        col,
                        scale,
                    } => {
                        assert_eq!((tile, row, col), (4, i, 0));
                        assert!(scale > 0.0 && scale < 0.5, "scale {}", scale);
                    }
                    other => panic!("unexpected {:?}", other),
                }
            }
        }

        log.borrow_mut().clear();
        seq.tick(25.0, &mut sync);
        assert!(log
            .borrow()
            .iter()
            .all(|e| matches!(e, AnimationEvent::TileBurn { scale, .. } if *scale == 0.0)));
    }

    #[test]
    fn test_fall_offsets_accumulate_from_bottom() {
        // Column: a X b X X c -> a falls 3 rows, b falls 2, c stays.
        let mut seq = AnimationSequencer::new();
        let log = record(&mut seq);
        let mut sync = CountSync::default();
        let data = stage_data(
            vec![vec![1], vec![9], vec![2], vec![9], vec![9], vec![3]],
            &[(1, 0), (3, 0), (4, 0)],
        );
        seq.enqueue(AnimationTask::Fall(data));

        seq.tick(25.0, &mut sync);
        let events = log.borrow();
        assert_eq!(
            *events,
            vec![
                AnimationEvent::TileFall {
                    tile: 2,
                    row: 2,
                    col: 0,
                    offset: 2.0
                },
                AnimationEvent::TileFall {
                    tile: 1,
                    row: 0,
                    col: 0,
                    offset: 3.0
                },
            ]
        );
    }

    #[test]
    fn test_fall_with_gap_at_row_zero() {
        // X a X b -> a falls 1 row; the burnt top row never falls.
        let mut seq = AnimationSequencer::new();
        let log = record(&mut seq);
        let mut sync = CountSync::default();
        let data = stage_data(vec![vec![9], vec![1], vec![9], vec![2]], &[(0, 0), (2, 0)]);
        seq.enqueue(AnimationTask::Fall(data));

        seq.tick(25.0, &mut sync);
        assert_eq!(
            *log.borrow(),
            vec![AnimationEvent::TileFall {
                tile: 1,
                row: 1,
                col: 0,
                offset: 1.0
            }]
        );
    }

    #[test]
    fn test_fill_emits_single_scalar() {
        let mut seq = AnimationSequencer::new();
        let log = record(&mut seq);
        let mut sync = CountSync::default();
        seq.enqueue(AnimationTask::Fill);

        seq.tick(50.0, &mut sync);
        assert_eq!(*log.borrow(), vec![AnimationEvent::TileFill { scale: 1.0 }]);
    }

    #[test]
    fn test_zero_delta_does_not_advance() {
        let mut seq = AnimationSequencer::new();
        let mut sync = CountSync::default();
        seq.enqueue(AnimationTask::Fill);
        seq.enqueue(AnimationTask::Fill);

        seq.tick(0.0, &mut sync);
        assert_eq!(seq.stage(), Stage::Filling);
        assert_eq!(seq.pending(), 1);
        seq.tick(0.0, &mut sync);
        seq.tick(0.0, &mut sync);
        assert_eq!(seq.pending(), 1);
        assert_eq!(seq.elapsed(), 0.0);
    }

    #[test]
    fn test_exact_duration_completes_stage() {
        let mut seq = AnimationSequencer::new();
        let log = record(&mut seq);
        let mut sync = CountSync::default();
        seq.enqueue(AnimationTask::Fill);

        seq.tick(20.0, &mut sync);
        seq.tick(30.0, &mut sync);
        assert_eq!(seq.elapsed(), 50.0);
        assert_eq!(sync.0, 0);

        seq.tick(0.0, &mut sync);
        assert_eq!(seq.stage(), Stage::Idle);
        assert_eq!(sync.0, 1);
        assert_eq!(log.borrow().last(), Some(&AnimationEvent::AnimationsComplete));

        // Already idle: no second completion.
        seq.tick(5.0, &mut sync);
        assert_eq!(sync.0, 1);
    }

    #[test]
    fn test_empty_gap_data_emits_nothing() {
        let mut seq = AnimationSequencer::new();
        let log = record(&mut seq);
        let mut sync = CountSync::default();
        let data = StageData {
            tiles: Board::new(2, 2),
            gaps: ColumnGaps::new(2),
        };
        seq.enqueue(AnimationTask::Burn(data.clone()));
        seq.enqueue(AnimationTask::Fall(data));

        seq.tick(10.0, &mut sync);
        assert_eq!(seq.stage(), Stage::Burning);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_negative_delta_clamped() {
        let mut seq = AnimationSequencer::new();
        let mut sync = CountSync::default();
        seq.enqueue(AnimationTask::Fill);
        seq.tick(10.0, &mut sync);
        seq.tick(-5.0, &mut sync);
        assert_eq!(seq.elapsed(), 10.0);
    }
}
