//! Headless autoplay runner (default binary).
//!
//! Deals a board, clicks the largest group each turn and plays that move's
//! animations to completion before clicking again, the way a front end holds
//! input while tiles are moving. Events go to stdout as `[Grid]`/`[Anim]`
//! lines, or as one JSON object per line with `--json`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use serde::Serialize;

use tile_burst::anim::{AnimationEvent, AnimationSequencer};
use tile_burst::autoplay::{choose_click, parse_autoplay_args};
use tile_burst::core::{Board, ClickOutcome, GridEngine, GridEvent};
use tile_burst::types::{GameConfig, GameStatus};

/// Ticks one move's animations may take before the run is abandoned.
const MAX_TICKS_PER_MOVE: u32 = 100_000;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_autoplay_args(&args)?;

    let config = match &opts.config_path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = opts.seed.unwrap_or_else(clock_seed);
    let json = opts.json;

    let mut engine = GridEngine::new(config, seed)?;
    let mut sequencer = AnimationSequencer::new();
    sequencer.listen_to(&mut engine);
    engine.subscribe(move |event| print_grid_event(event, json));

    let counter = Rc::new(Cell::new(0usize));
    sequencer.subscribe(move |event| match event {
        AnimationEvent::AnimationsComplete => {
            if json {
                print_json(event);
            } else {
                println!("[Anim] animations complete ({} frames)", counter.replace(0));
            }
        }
        _ => {
            counter.set(counter.get() + 1);
            if json {
                print_json(event);
            }
        }
    });

    if !json {
        println!(
            "[Session] seed={} board={}x{} colors={} goal={} moves={}",
            seed,
            config.rows,
            config.cols,
            config.colors_amount,
            config.points_goal,
            config.moves_limit
        );
    }
    engine.start();

    let mut turn = 0u32;
    while !engine.status().is_over() {
        turn += 1;
        let target = choose_click(engine.board(), config.min_group_size_limit);
        let outcome = engine.click_tile(target.row, target.col);
        if !json {
            println!(
                "[Session] turn {}: click ({}, {}) -> {:?}",
                turn, target.row, target.col, outcome
            );
        }
        if matches!(outcome, ClickOutcome::NoMove | ClickOutcome::Ignored) {
            return Err(anyhow!("autoplay stalled on turn {}: {:?}", turn, outcome));
        }

        let ticks = drain_animations(&mut sequencer, &mut engine, opts.delta)?;
        if !json && ticks > 0 {
            println!("[Anim] {} ticks of {}", ticks, opts.delta);
        }
    }

    if json {
        print_json(&engine.snapshot());
    } else {
        let status = engine.status();
        let detail = match status {
            GameStatus::Won { score } => format!("score={}", score),
            GameStatus::Lost { shortfall } => format!("shortfall={}", shortfall),
            GameStatus::Playing => format!("score={}", engine.score()),
        };
        println!(
            "[Session] {} after {} moves, {}",
            status.as_str(),
            engine.moves(),
            detail
        );
    }

    Ok(())
}

/// Tick until the queue is empty and the completion has fired.
fn drain_animations(
    sequencer: &mut AnimationSequencer,
    engine: &mut GridEngine,
    delta: f32,
) -> Result<u32> {
    let mut ticks = 0u32;
    while !sequencer.is_idle() {
        if ticks == MAX_TICKS_PER_MOVE {
            return Err(anyhow!(
                "animations did not settle after {} ticks (stage {})",
                ticks,
                sequencer.stage().as_str()
            ));
        }
        sequencer.tick(delta, engine);
        ticks += 1;
    }
    Ok(ticks)
}

fn print_grid_event(event: &GridEvent, json: bool) {
    if json {
        print_json(event);
        return;
    }

    match event {
        GridEvent::SyncTiles { tiles } => {
            println!("[Grid] syncTiles");
            print_board(tiles);
        }
        GridEvent::StatsChange {
            score,
            moves_remaining,
        } => println!(
            "[Grid] statsChange score={} movesRemaining={}",
            score, moves_remaining
        ),
        GridEvent::BurnTiles { gaps, .. } => println!(
            "[Grid] burnTiles {} tiles in {} columns",
            gaps.removed_count(),
            gaps.affected_columns().len()
        ),
        GridEvent::FallTiles { gaps, .. } => {
            println!("[Grid] fallTiles columns={:?}", gaps.affected_columns())
        }
        GridEvent::FillTiles { filled, .. } => {
            println!("[Grid] fillTiles {} new tiles", filled.len())
        }
        GridEvent::Win { score } => println!("[Grid] win score={}", score),
        GridEvent::Lose { shortfall } => println!("[Grid] lose shortfall={}", shortfall),
    }
}

fn print_board(board: &Board) {
    for row in 0..board.rows() {
        let line: Vec<String> = board.row(row).iter().map(|t| t.to_string()).collect();
        println!("  {}", line.join(" "));
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{}", line),
        Err(e) => eprintln!("[Session] failed to encode event: {}", e),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
