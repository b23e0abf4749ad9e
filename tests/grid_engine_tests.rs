//! Grid engine tests - group discovery, gaps, compaction and session rules

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tile_burst::core::{
    find_group, find_groups, has_possible_moves, Board, ClickOutcome, ColumnGaps, GridEngine,
    GridEvent, SimpleRng,
};
use tile_burst::types::{Coord, GameConfig, GameStatus, EMPTY_TILE};

fn config(rows: usize, cols: usize) -> GameConfig {
    GameConfig {
        rows,
        cols,
        colors_amount: 3,
        min_group_size_limit: 2,
        points_goal: 1000,
        moves_limit: 100,
        shuffles_limit: 3,
    }
}

fn record(engine: &mut GridEngine) -> Rc<RefCell<Vec<GridEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    log
}

fn all_coords(board: &Board) -> Vec<Coord> {
    (0..board.rows())
        .flat_map(|row| (0..board.cols()).map(move |col| Coord::new(row, col)))
        .collect()
}

#[test]
fn test_group_is_same_color_closed_component() {
    for seed in 1..40 {
        let mut rng = SimpleRng::new(seed);
        let board = Board::random(8, 7, 3, &mut rng);

        for origin in all_coords(&board) {
            let group = find_group(&board, origin);
            let members: HashSet<Coord> = group.iter().copied().collect();
            let color = board.get(origin);

            assert_eq!(members.len(), group.len(), "duplicate member (seed {})", seed);
            assert!(members.contains(&origin));
            for &at in &group {
                assert_eq!(board.get(at), color);
                // Closed under same-color adjacency.
                for next in board.neighbors(at) {
                    if board.get(next) == color {
                        assert!(
                            members.contains(&next),
                            "{:?} missing from group of {:?} (seed {})",
                            next,
                            origin,
                            seed
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_groups_are_equal_or_disjoint() {
    let mut rng = SimpleRng::new(2024);
    let board = Board::random(9, 9, 4, &mut rng);

    let groups: Vec<HashSet<Coord>> = all_coords(&board)
        .into_iter()
        .map(|at| find_group(&board, at).into_iter().collect())
        .collect();

    for a in &groups {
        for b in &groups {
            assert!(a == b || a.is_disjoint(b));
        }
    }
}

#[test]
fn test_find_groups_partitions_removable_cells() {
    let mut rng = SimpleRng::new(99);
    let board = Board::random(11, 9, 5, &mut rng);

    let groups = find_groups(&board, 2);
    let covered: usize = groups.iter().map(Vec::len).sum();
    let expected = all_coords(&board)
        .into_iter()
        .filter(|&at| find_group(&board, at).len() >= 2)
        .count();

    assert_eq!(covered, expected);
    assert_eq!(has_possible_moves(&board, 2), !groups.is_empty());
}

#[test]
fn test_empty_cells_never_group() {
    let board = Board::from_rows(vec![vec![0, 0], vec![0, 1]]);
    assert!(find_group(&board, Coord::new(0, 0)).is_empty());
    assert!(!has_possible_moves(&board, 2));
}

#[test]
fn test_gaps_sorted_disjoint_and_maximal() {
    let mut rng = SimpleRng::new(7);
    for _ in 0..200 {
        let cols = 6;
        let removed: Vec<Coord> = (0..rng.next_range(30))
            .map(|_| Coord::new(rng.next_range(10) as usize, rng.next_range(cols) as usize))
            .collect();
        let unique: HashSet<Coord> = removed.iter().copied().collect();
        let gaps = ColumnGaps::from_group(cols as usize, &removed);

        assert_eq!(gaps.removed_count(), unique.len());
        for (col, column) in gaps.iter() {
            for pair in column.windows(2) {
                assert!(
                    pair[0].end + 1 < pair[1].start,
                    "column {} gaps {:?} overlap or touch",
                    col,
                    pair
                );
            }
            for gap in column {
                assert!(gap.start <= gap.end);
                for row in gap.start..=gap.end {
                    assert!(unique.contains(&Coord::new(row, col)));
                }
            }
        }
    }
}

#[test]
fn test_compaction_keeps_survivor_order() {
    let mut rng = SimpleRng::new(31337);
    for _ in 0..100 {
        let mut board = Board::random(10, 6, 4, &mut rng);
        let removed: Vec<Coord> = all_coords(&board)
            .into_iter()
            .filter(|_| rng.next_range(3) == 0)
            .collect();
        let removed_set: HashSet<Coord> = removed.iter().copied().collect();

        let survivors: Vec<Vec<u8>> = (0..board.cols())
            .map(|col| {
                (0..board.rows())
                    .filter(|&row| !removed_set.contains(&Coord::new(row, col)))
                    .map(|row| board.get(Coord::new(row, col)))
                    .collect()
            })
            .collect();

        let gaps = ColumnGaps::from_group(board.cols(), &removed);
        board.burn(&removed);
        board.collapse(&gaps);

        for (col, expected) in survivors.iter().enumerate() {
            let column = board.column(col);
            let empty = board.rows() - expected.len();
            assert!(column[..empty].iter().all(|&t| t == EMPTY_TILE));
            assert_eq!(&column[empty..], expected.as_slice());
        }
    }
}

#[test]
fn test_score_grows_by_group_size() {
    let mut engine = GridEngine::new(config(11, 9), 4242).unwrap();
    engine.start();

    for _ in 0..20 {
        let Some(group) = find_groups(engine.board(), 2).into_iter().next() else {
            break;
        };
        let before = engine.score();
        let outcome = engine.click_tile(group[0].row, group[0].col);
        assert!(matches!(outcome, ClickOutcome::Accepted { burnt, .. } if burnt == group.len()));
        assert_eq!(engine.score(), before + group.len() as u32);
        assert!(engine.board().is_full());
    }
}

#[test]
fn test_win_fires_once_score_reaches_goal() {
    let config = GameConfig {
        points_goal: 4,
        ..config(2, 2)
    };
    let mut engine = GridEngine::with_board(config, Board::from_rows(vec![vec![2; 2]; 2]), 1).unwrap();
    let log = record(&mut engine);

    let outcome = engine.click_tile(0, 1);
    assert_eq!(
        outcome,
        ClickOutcome::Accepted {
            burnt: 4,
            status: GameStatus::Won { score: 4 }
        }
    );
    let events = log.borrow();
    assert_eq!(events.last(), Some(&GridEvent::Win { score: 4 }));
    assert!(!events.iter().any(|e| matches!(e, GridEvent::Lose { .. })));
    drop(events);

    // Over until restarted.
    assert_eq!(engine.click_tile(0, 0), ClickOutcome::Ignored);
}

#[test]
fn test_win_beats_move_limit_on_last_move() {
    let config = GameConfig {
        points_goal: 4,
        moves_limit: 1,
        ..config(2, 2)
    };
    let mut engine = GridEngine::with_board(config, Board::from_rows(vec![vec![2; 2]; 2]), 1).unwrap();
    let log = record(&mut engine);

    engine.click_tile(0, 0);
    let ends: Vec<GridEvent> = log
        .borrow()
        .iter()
        .filter(|e| matches!(e, GridEvent::Win { .. } | GridEvent::Lose { .. }))
        .cloned()
        .collect();
    assert_eq!(ends, vec![GridEvent::Win { score: 4 }]);
}

#[test]
fn test_reshuffles_preserve_colors_then_lose() {
    // Three distinct colors in a row stay dead under any permutation.
    let config = GameConfig {
        points_goal: 10,
        shuffles_limit: 3,
        ..config(1, 3)
    };
    let board = Board::from_rows(vec![vec![1, 2, 3]]);
    let counts = board.color_counts();
    let mut engine = GridEngine::with_board(config, board, 8).unwrap();
    let log = record(&mut engine);

    for i in 1..=3 {
        assert_eq!(engine.click_tile(0, 0), ClickOutcome::Reshuffled);
        assert_eq!(engine.shuffles(), i);
        assert_eq!(engine.board().color_counts(), counts);
    }
    assert_eq!(engine.click_tile(0, 0), ClickOutcome::Lost { shortfall: 10 });
    assert_eq!(engine.status(), GameStatus::Lost { shortfall: 10 });

    let names: Vec<&str> = log.borrow().iter().map(GridEvent::name).collect();
    assert_eq!(names, vec!["syncTiles", "syncTiles", "syncTiles", "lose"]);
}

#[test]
fn test_reset_restores_budget_and_keeps_colors() {
    let board = Board::from_rows(vec![vec![1, 1, 2], vec![3, 2, 3], vec![1, 3, 2]]);
    let mut engine = GridEngine::with_board(config(3, 3), board, 5).unwrap();
    engine.click_tile(0, 0);
    assert_eq!(engine.moves(), 1);

    let log = record(&mut engine);
    let before_reset = engine.board().color_counts();
    engine.reset();

    assert_eq!(engine.score(), 0);
    assert_eq!(engine.moves(), 0);
    assert_eq!(engine.shuffles(), 0);
    assert_eq!(engine.status(), GameStatus::Playing);
    assert_eq!(engine.board().color_counts(), before_reset);

    let events = log.borrow();
    assert_eq!(
        events[0],
        GridEvent::StatsChange {
            score: 0,
            moves_remaining: 0
        }
    );
    assert_eq!(engine.moves_remaining(), 100);
    match &events[1] {
        GridEvent::SyncTiles { tiles } => assert_eq!(tiles, engine.board()),
        other => panic!("expected syncTiles, got {:?}", other),
    }
}

#[test]
#[should_panic(expected = "outside the 3x3 board")]
fn test_click_out_of_range_panics() {
    let mut engine = GridEngine::new(config(3, 3), 1).unwrap();
    engine.start();
    engine.click_tile(3, 0);
}
