//! Outcome evaluation test suite
//!
//! Tests cover:
//! - Payline matching and wild substitution
//! - Scatter counting and feature triggering
//! - Exact payout arithmetic and overflow detection
//! - Input rejection and purity

mod common;

use std::sync::Arc;

use common::*;
use rf_slot_math::{
    Grid, InputError, LineKind, Multiplier, Payline, SlotConfig, SlotError, SymbolId, evaluate,
    presets,
};

fn middle_line() -> Vec<Payline> {
    vec![Payline::straight(1, 6)]
}

fn with_row_1(row: [&'static str; 6]) -> [[&'static str; 6]; 4] {
    let mut rows = FILLER;
    rows[1] = row;
    rows
}

// ═══════════════════════════════════════════════════════════════════════════════
// PAYLINES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_no_match_no_scatter_is_zero() {
    let config = six_by_four(straight_lines());
    let grid = grid_from_rows(&config, &FILLER);

    let result = evaluate(&config, &grid, stake(10)).unwrap();
    assert_eq!(result.total_win.minor(), 0);
    assert!(result.winning_lines.is_empty());
    assert_eq!(result.scatter.count, 0);
    assert!(!result.scatter.triggered);
}

#[test]
fn test_worked_example_king_four() {
    let config = six_by_four(middle_line());
    let grid = grid_from_rows(
        &config,
        &with_row_1(["KING", "KING", "KING", "KING", "ACE", "TEN"]),
    );

    let result = evaluate(&config, &grid, stake(2)).unwrap();
    assert_eq!(result.winning_lines.len(), 1);
    let line = &result.winning_lines[0];
    assert_eq!(line.kind, LineKind::Payline { index: 0 });
    assert_eq!(line.symbol, config.symbol_id("KING").unwrap());
    assert_eq!(line.count, 4);
    assert_eq!(line.payout.minor(), 10);
    assert_eq!(line.positions, vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(result.total_win.minor(), 10);
}

#[test]
fn test_leading_wilds_pay_as_anchor() {
    let config = six_by_four(middle_line());
    let grid = grid_from_rows(
        &config,
        &with_row_1(["WILD", "WILD", "KING", "KING", "ACE", "TEN"]),
    );

    let result = evaluate(&config, &grid, stake(2)).unwrap();
    let line = &result.winning_lines[0];
    assert_eq!(line.symbol, config.symbol_id("KING").unwrap());
    assert_eq!(line.count, 4);
    assert_eq!(line.payout.minor(), 10);
}

#[test]
fn test_wild_run_does_not_substitute_scatter() {
    let config = six_by_four(middle_line());
    let grid = grid_from_rows(
        &config,
        &with_row_1(["WILD", "WILD", "WILD", "SCATTER", "KING", "KING"]),
    );

    let result = evaluate(&config, &grid, stake(1)).unwrap();
    let line = result.line_wins().next().unwrap();
    assert_eq!(line.symbol, config.symbol_id("WILD").unwrap());
    assert_eq!(line.count, 3);
    assert_eq!(line.payout.minor(), 100);
    // A single scatter neither pays nor triggers
    assert!(result.scatter_win().is_none());
    assert_eq!(result.scatter.count, 1);
}

#[test]
fn test_short_wild_run_before_scatter_pays_nothing() {
    let config = six_by_four(middle_line());
    let grid = grid_from_rows(
        &config,
        &with_row_1(["WILD", "WILD", "SCATTER", "KING", "KING", "KING"]),
    );

    let result = evaluate(&config, &grid, stake(1)).unwrap();
    assert_eq!(result.line_wins().count(), 0);
}

#[test]
fn test_line_starting_with_scatter_never_pays() {
    let config = six_by_four(middle_line());
    let grid = grid_from_rows(
        &config,
        &with_row_1(["SCATTER", "KING", "KING", "KING", "KING", "KING"]),
    );

    let result = evaluate(&config, &grid, stake(1)).unwrap();
    assert_eq!(result.line_wins().count(), 0);
}

#[test]
fn test_all_wild_line_pays_wild_table() {
    let config = six_by_four(middle_line());
    let grid = grid_from_rows(&config, &with_row_1(["WILD"; 6]));

    let result = evaluate(&config, &grid, stake(3)).unwrap();
    let line = &result.winning_lines[0];
    assert_eq!(line.symbol, config.symbol_id("WILD").unwrap());
    assert_eq!(line.count, 6);
    assert_eq!(line.payout.minor(), 3000 * 3);
}

#[test]
fn test_every_payline_pays_independently() {
    let config = six_by_four(straight_lines());
    let grid = grid_from_rows(&config, &[["KING"; 6]; 4]);

    let result = evaluate(&config, &grid, stake(1)).unwrap();
    let indices: Vec<_> = result.winning_lines.iter().filter_map(|w| w.payline_index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert_eq!(result.total_win.minor(), 4 * 40);
}

#[test]
fn test_payout_is_exact_multiple_of_stake() {
    let config = six_by_four(middle_line());
    let king = config.symbol_id("KING").unwrap();
    let rows = [
        (["KING", "KING", "KING", "ACE", "TEN", "JACK"], 3),
        (["KING", "KING", "KING", "KING", "ACE", "TEN"], 4),
        (["KING", "WILD", "KING", "KING", "KING", "TEN"], 5),
        (["KING", "KING", "WILD", "KING", "KING", "WILD"], 6),
    ];

    for stake_minor in [1, 2, 7, 250, 1_000_000] {
        for (row, count) in rows {
            let grid = grid_from_rows(&config, &with_row_1(row));
            let result = evaluate(&config, &grid, stake(stake_minor)).unwrap();
            let line = &result.winning_lines[0];
            let expected = config.lookup(king, count).unwrap().apply(stake(stake_minor)).unwrap();
            assert_eq!(line.count, u32::from(count));
            assert_eq!(line.payout, expected);
            assert_eq!(
                line.payout.minor(),
                config.lookup(king, count).unwrap().hundredths() / 100 * stake_minor
            );
        }
    }
}

#[test]
fn test_fractional_pays_round_toward_zero() {
    let mut definition = six_by_four_definition(middle_line());
    definition.symbols[0].pays.insert(3, "0.5".parse::<Multiplier>().unwrap());
    let config = SlotConfig::from_definition(definition).unwrap();
    let grid = grid_from_rows(
        &config,
        &with_row_1(["KING", "KING", "KING", "ACE", "TEN", "JACK"]),
    );

    assert_eq!(evaluate(&config, &grid, stake(3)).unwrap().total_win.minor(), 1);
    assert_eq!(evaluate(&config, &grid, stake(4)).unwrap().total_win.minor(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCATTER
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_scatter_is_position_independent() {
    let config = six_by_four(straight_lines());
    let mut a = FILLER;
    a[0][0] = "SCATTER";
    a[1][3] = "SCATTER";
    a[3][5] = "SCATTER";
    let mut b = FILLER;
    b[2][1] = "SCATTER";
    b[2][2] = "SCATTER";
    b[0][4] = "SCATTER";

    let ra = evaluate(&config, &grid_from_rows(&config, &a), stake(5)).unwrap();
    let rb = evaluate(&config, &grid_from_rows(&config, &b), stake(5)).unwrap();
    assert_eq!(ra.scatter, rb.scatter);
    assert!(ra.scatter.triggered);
    assert_eq!(ra.scatter.count, 3);
    assert_eq!(ra.total_win, rb.total_win);
    assert_eq!(ra.total_win.minor(), 2 * 5);

    let positions = &ra.scatter_win().unwrap().positions;
    assert_eq!(positions, &vec![(0, 0), (3, 1), (5, 3)]);
}

#[test]
fn test_scatter_beyond_table_pays_top_tier() {
    let config = six_by_four(straight_lines());
    let mut rows = FILLER;
    for reel in 0..6 {
        rows[3][reel] = "SCATTER";
    }
    rows[0][0] = "SCATTER";
    rows[0][2] = "SCATTER";

    let result = evaluate(&config, &grid_from_rows(&config, &rows), stake(1)).unwrap();
    assert_eq!(result.scatter.count, 8);
    assert_eq!(result.scatter_win().unwrap().payout.minor(), 500);
}

#[test]
fn test_scatter_count_past_u8_range() {
    let mut definition = six_by_four_definition(vec![Payline::straight(0, 16)]);
    definition.reels = 16;
    definition.rows = 16;
    let mut strip = vec!["KING".to_string(); 15];
    strip.push("SCATTER".into());
    definition.reel_strips = vec![strip; 16];
    let config = SlotConfig::from_definition(definition).unwrap();
    let scatter = config.symbol_id("SCATTER").unwrap();

    let grid = Grid::new(vec![vec![scatter; 16]; 16]);
    let result = evaluate(&config, &grid, stake(2)).unwrap();
    assert_eq!(result.scatter.count, 256);
    assert!(result.scatter.triggered);
    assert_eq!(result.scatter.free_spins_awarded, 10);

    let line = result.scatter_win().unwrap();
    assert_eq!(line.count, 256);
    assert_eq!(line.positions.len(), 256);
    assert_eq!(line.payout.minor(), 500 * 2);
    assert_eq!(result.total_win, line.payout);
}

#[test]
fn test_trigger_without_scatter_pay_is_zero_win() {
    let mut definition = six_by_four_definition(straight_lines());
    definition.symbols[7].pays.clear();
    let config = SlotConfig::from_definition(definition).unwrap();
    let mut rows = FILLER;
    rows[0][0] = "SCATTER";
    rows[1][1] = "SCATTER";
    rows[2][2] = "SCATTER";

    let result = evaluate(&config, &grid_from_rows(&config, &rows), stake(5)).unwrap();
    assert!(result.scatter.triggered);
    assert_eq!(result.scatter.free_spins_awarded, 10);
    let scatter = result.scatter_win().unwrap();
    assert_eq!(scatter.kind, LineKind::Scatter);
    assert!(scatter.payout.is_zero());
    assert!(result.total_win.is_zero());
}

#[test]
fn test_scatter_pay_without_feature() {
    let mut definition = six_by_four_definition(straight_lines());
    definition.scatter_feature = None;
    let config = SlotConfig::from_definition(definition).unwrap();
    let mut rows = FILLER;
    rows[0][0] = "SCATTER";
    rows[1][1] = "SCATTER";
    rows[2][2] = "SCATTER";
    rows[3][3] = "SCATTER";

    let result = evaluate(&config, &grid_from_rows(&config, &rows), stake(1)).unwrap();
    assert!(!result.scatter.triggered);
    assert_eq!(result.scatter.free_spins_awarded, 0);
    assert_eq!(result.total_win.minor(), 10);
}

// ═══════════════════════════════════════════════════════════════════════════════
// BUILT-IN GAME
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_frosty_full_grid_of_tens() {
    let config = presets::frosty_fortunes().unwrap();
    let grid = grid_from_rows(&config, &[["TEN"; 6]; 4]);

    let result = evaluate(&config, &grid, stake(1)).unwrap();
    assert_eq!(result.line_wins().count(), 10);
    assert!(result.line_wins().all(|w| w.count == 6 && w.payout.minor() == 40));
    assert_eq!(result.total_win.minor(), 400);
}

#[test]
fn test_frosty_losing_and_trigger_grids() {
    let config = presets::frosty_fortunes().unwrap();

    let losing = evaluate(&config, &grid_from_rows(&config, &FROSTY_LOSING), stake(2)).unwrap();
    assert!(!losing.is_win());

    let trigger = evaluate(&config, &grid_from_rows(&config, &FROSTY_TRIGGER), stake(2)).unwrap();
    assert!(trigger.triggers_feature());
    assert_eq!(trigger.line_wins().count(), 0);
    assert_eq!(trigger.total_win.minor(), 4);
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERRORS & PURITY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_wrong_shape_rejected() {
    let config = six_by_four(straight_lines());
    let five_reels = grid_from_rows(&config, &FILLER);
    let mut short = Vec::new();
    for reel in 0..5 {
        short.push(five_reels.reel(reel).unwrap().to_vec());
    }
    let err = evaluate(&config, &Grid::new(short), stake(1)).unwrap_err();
    assert!(matches!(
        err,
        SlotError::InvalidInput(InputError::ReelCount { expected: 6, actual: 5 })
    ));

    let mut ragged: Vec<Vec<_>> = (0..6).map(|r| five_reels.reel(r).unwrap().to_vec()).collect();
    ragged[2].pop();
    let err = evaluate(&config, &Grid::new(ragged), stake(1)).unwrap_err();
    assert!(matches!(
        err,
        SlotError::InvalidInput(InputError::RowCount { reel: 2, expected: 4, actual: 3 })
    ));
}

#[test]
fn test_unknown_symbol_id_rejected() {
    let config = six_by_four(straight_lines());
    let mut reels: Vec<Vec<_>> = vec![vec![config.symbol_id("KING").unwrap(); 4]; 6];
    reels[4][1] = SymbolId(99);
    let err = evaluate(&config, &Grid::new(reels), stake(1)).unwrap_err();
    assert!(matches!(
        err,
        SlotError::InvalidInput(InputError::UnknownSymbolId { id: 99, reel: 4, row: 1 })
    ));
}

#[test]
fn test_unknown_symbol_name_rejected() {
    let config = six_by_four(straight_lines());
    let err = Grid::from_names(&config, &[vec!["KING", "BANANA"]]).unwrap_err();
    assert!(matches!(
        err,
        SlotError::InvalidInput(InputError::UnknownSymbol(ref name)) if name == "BANANA"
    ));
}

#[test]
fn test_payout_overflow_detected() {
    let config = six_by_four(middle_line());
    let grid = grid_from_rows(&config, &with_row_1(["WILD"; 6]));
    let err = evaluate(&config, &grid, stake(u64::MAX / 1000)).unwrap_err();
    assert!(matches!(err, SlotError::ArithmeticOverflow { .. }));
}

#[test]
fn test_evaluation_is_idempotent() {
    let config = six_by_four(straight_lines());
    let mut rows = with_row_1(["WILD", "KING", "KING", "WILD", "ACE", "TEN"]);
    rows[0][0] = "SCATTER";
    rows[2][3] = "SCATTER";
    rows[3][5] = "SCATTER";
    let grid = grid_from_rows(&config, &rows);

    let first = evaluate(&config, &grid, stake(7)).unwrap();
    let second = evaluate(&config, &grid, stake(7)).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_concurrent_evaluation_shares_config() {
    let config = Arc::new(presets::frosty_fortunes().unwrap());
    let grids = vec![
        grid_from_rows(&config, &FROSTY_LOSING),
        grid_from_rows(&config, &FROSTY_TRIGGER),
        grid_from_rows(&config, &[["TEN"; 6]; 4]),
    ];
    let expected: Vec<_> = grids
        .iter()
        .map(|g| evaluate(&config, g, stake(3)).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let config = Arc::clone(&config);
                let grids = &grids;
                scope.spawn(move || {
                    (0..200)
                        .map(|i| evaluate(&config, &grids[i % grids.len()], stake(3)).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            let results = handle.join().unwrap();
            for (i, result) in results.iter().enumerate() {
                assert_eq!(result, &expected[i % expected.len()]);
            }
        }
    });
}
