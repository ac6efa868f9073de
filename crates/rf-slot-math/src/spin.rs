//! Spin result types

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::symbols::SymbolId;

/// What a winning line is tied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineKind {
    /// A numbered payline (0-based)
    Payline { index: usize },
    /// The grid-wide scatter event, not tied to any payline
    Scatter,
}

/// A single win
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    /// Payline or scatter
    pub kind: LineKind,
    /// Paid symbol (never Wild unless the whole run is Wild)
    pub symbol: SymbolId,
    /// Number of matching symbols
    pub count: u32,
    /// Win amount (stake × pay)
    pub payout: Money,
    /// Cells to highlight as (reel, row): the payline prefix, or every scatter
    pub positions: Vec<(u8, u8)>,
}

impl WinningLine {
    pub fn payline_index(&self) -> Option<usize> {
        match self.kind {
            LineKind::Payline { index } => Some(index),
            LineKind::Scatter => None,
        }
    }

    pub fn is_scatter(&self) -> bool {
        self.kind == LineKind::Scatter
    }
}

/// Scatter count and feature decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScatterOutcome {
    /// Scatters anywhere on the grid
    pub count: u32,
    /// Feature trigger threshold met
    pub triggered: bool,
    /// Free spins awarded by this trigger (0 when not triggered)
    pub free_spins_awarded: u32,
}

/// Complete evaluation of one grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Sum of every winning line's payout
    pub total_win: Money,
    /// Payline wins in payline order, then the scatter line (if any)
    pub winning_lines: Vec<WinningLine>,
    /// Scatter outcome
    pub scatter: ScatterOutcome,
}

impl SpinResult {
    pub fn is_win(&self) -> bool {
        !self.total_win.is_zero()
    }

    pub fn triggers_feature(&self) -> bool {
        self.scatter.triggered
    }

    pub fn line_wins(&self) -> impl Iterator<Item = &WinningLine> {
        self.winning_lines.iter().filter(|w| !w.is_scatter())
    }

    pub fn scatter_win(&self) -> Option<&WinningLine> {
        self.winning_lines.iter().find(|w| w.is_scatter())
    }
}
