//! Visible symbol grid (reel-major)

use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;
use crate::error::{InputError, SlotError, SlotResult};
use crate::symbols::SymbolId;

/// Reels × rows of symbol ids, `reels[reel][row]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    reels: Vec<Vec<SymbolId>>,
}

impl Grid {
    pub fn new(reels: Vec<Vec<SymbolId>>) -> Self {
        Self { reels }
    }

    /// Resolve a reel-major grid of symbol names against a config
    pub fn from_names<S: AsRef<str>>(config: &SlotConfig, reels: &[Vec<S>]) -> SlotResult<Self> {
        let reels = reels
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|name| {
                        let name = name.as_ref();
                        config
                            .symbol_id(name)
                            .ok_or_else(|| SlotError::from(InputError::UnknownSymbol(name.to_string())))
                    })
                    .collect::<SlotResult<Vec<_>>>()
            })
            .collect::<SlotResult<Vec<_>>>()?;
        Ok(Self { reels })
    }

    /// Build from visible rows (row-major), the way paytables are usually drawn
    pub fn from_rows(rows: &[Vec<SymbolId>]) -> Self {
        let reel_count = rows.first().map(|r| r.len()).unwrap_or(0);
        let reels = (0..reel_count)
            .map(|reel| rows.iter().filter_map(|row| row.get(reel).copied()).collect())
            .collect();
        Self { reels }
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn reel(&self, reel: usize) -> Option<&[SymbolId]> {
        self.reels.get(reel).map(Vec::as_slice)
    }

    pub fn symbol_at(&self, reel: usize, row: usize) -> Option<SymbolId> {
        self.reels.get(reel).and_then(|r| r.get(row)).copied()
    }

    /// Every cell as (reel, row, symbol)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, SymbolId)> + '_ {
        self.reels.iter().enumerate().flat_map(|(reel, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(row, &symbol)| (reel, row, symbol))
        })
    }

    pub fn names<'a>(&self, config: &'a SlotConfig) -> Vec<Vec<&'a str>> {
        self.reels
            .iter()
            .map(|column| column.iter().map(|&id| config.symbols().name_of(id)).collect())
            .collect()
    }

    /// Reject grids whose shape or symbols do not belong to `config`
    pub fn check_against(&self, config: &SlotConfig) -> SlotResult<()> {
        let expected_reels = config.reel_count();
        let expected_rows = config.row_count();
        if self.reels.len() != expected_reels {
            return Err(InputError::ReelCount {
                expected: expected_reels,
                actual: self.reels.len(),
            }
            .into());
        }
        for (reel, column) in self.reels.iter().enumerate() {
            if column.len() != expected_rows {
                return Err(InputError::RowCount {
                    reel,
                    expected: expected_rows,
                    actual: column.len(),
                }
                .into());
            }
        }
        let symbol_count = config.symbols().len();
        if let Some((reel, row, id)) = self.cells().find(|&(_, _, id)| id.0 as usize >= symbol_count) {
            return Err(InputError::UnknownSymbolId { id: id.0, reel, row }.into());
        }
        Ok(())
    }
}
