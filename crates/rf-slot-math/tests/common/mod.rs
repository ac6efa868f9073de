//! Shared fixtures for slot math integration tests

#![allow(dead_code)]

use rf_slot_math::{
    Grid, GridSource, Money, Payline, SamplingMode, ScatterFeature, SlotConfig, SlotDefinition,
    SlotResult, Symbol,
};

pub const NAMES: [&str; 8] = [
    "KING", "ACE", "TEN", "JACK", "CROWN", "QUEEN", "WILD", "SCATTER",
];

/// 6×4 game with the card-symbol pays used in the worked examples
pub fn six_by_four_definition(paylines: Vec<Payline>) -> SlotDefinition {
    SlotDefinition {
        name: "Fixture".into(),
        reels: 6,
        rows: 4,
        symbols: vec![
            Symbol::regular("KING", &[2, 5, 20, 40]),
            Symbol::regular("ACE", &[2, 5, 20, 40]),
            Symbol::regular("TEN", &[2, 5, 20, 40]),
            Symbol::regular("JACK", &[2, 5, 20, 40]),
            Symbol::regular("CROWN", &[40, 100, 250, 800]),
            Symbol::regular("QUEEN", &[10, 20, 70, 140]),
            Symbol::wild("WILD", &[100, 300, 1000, 3000]),
            Symbol::scatter("SCATTER", &[2, 10, 250, 500]),
        ],
        paylines,
        reel_strips: vec![NAMES.iter().map(|s| s.to_string()).collect(); 6],
        scatter_feature: Some(ScatterFeature {
            trigger_count: 3,
            free_spins_awarded: 10,
        }),
        sampling: SamplingMode::Independent,
        bet_levels: Vec::new(),
    }
}

pub fn six_by_four(paylines: Vec<Payline>) -> SlotConfig {
    SlotConfig::from_definition(six_by_four_definition(paylines)).unwrap()
}

/// Four straight paylines, one per row
pub fn straight_lines() -> Vec<Payline> {
    (0..4).map(|row| Payline::straight(row, 6)).collect()
}

/// Build a grid from visible rows of symbol names
pub fn grid_from_rows(config: &SlotConfig, rows: &[[&str; 6]]) -> Grid {
    let rows: Vec<Vec<_>> = rows
        .iter()
        .map(|row| row.iter().map(|name| config.symbol_id(name).unwrap()).collect())
        .collect();
    Grid::from_rows(&rows)
}

/// Rows with no line match and no scatter on the fixture games
pub const FILLER: [[&str; 6]; 4] = [
    ["CROWN", "JACK", "CROWN", "JACK", "CROWN", "JACK"],
    ["ACE", "TEN", "ACE", "TEN", "ACE", "TEN"],
    ["QUEEN", "KING", "QUEEN", "KING", "QUEEN", "KING"],
    ["JACK", "CROWN", "JACK", "CROWN", "JACK", "CROWN"],
];

/// Frosty Fortunes grid that wins nothing on any of its 10 paylines
pub const FROSTY_LOSING: [[&str; 6]; 4] = [
    ["CROWN", "DRAGON", "LEOPARD", "QUEEN", "STONE", "WOLF"],
    ["ACE", "JACK", "QUEEN_CARD", "KING", "TEN", "CROWN"],
    ["DRAGON", "LEOPARD", "QUEEN", "STONE", "WOLF", "ACE"],
    ["JACK", "QUEEN_CARD", "KING", "TEN", "CROWN", "DRAGON"],
];

/// Frosty Fortunes grid with exactly three scatters and no line win
pub const FROSTY_TRIGGER: [[&str; 6]; 4] = [
    ["SCATTER", "DRAGON", "LEOPARD", "QUEEN", "STONE", "WOLF"],
    ["ACE", "JACK", "QUEEN_CARD", "KING", "TEN", "CROWN"],
    ["DRAGON", "LEOPARD", "SCATTER", "STONE", "WOLF", "ACE"],
    ["JACK", "QUEEN_CARD", "KING", "TEN", "CROWN", "SCATTER"],
];

pub fn stake(minor: u64) -> Money {
    Money::from_minor(minor)
}

/// Plays back a fixed list of grids, cycling
pub struct ScriptedGrids {
    grids: Vec<Grid>,
    next: usize,
}

impl ScriptedGrids {
    pub fn new(grids: Vec<Grid>) -> Self {
        Self { grids, next: 0 }
    }
}

impl GridSource for ScriptedGrids {
    fn next_grid(&mut self, _config: &SlotConfig) -> SlotResult<Grid> {
        let grid = self.grids[self.next % self.grids.len()].clone();
        self.next += 1;
        Ok(grid)
    }
}
