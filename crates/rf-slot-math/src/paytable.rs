//! Payline definitions

use serde::{Deserialize, Serialize};

/// A payline: one row index per reel, read left to right
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payline {
    /// Row positions for each reel (e.g. [0, 1, 2, 2, 1, 0] for a "V" shape)
    pub rows: Vec<u8>,
}

impl Payline {
    pub fn new(rows: Vec<u8>) -> Self {
        Self { rows }
    }

    /// Same row across all reels
    pub fn straight(row: u8, reel_count: u8) -> Self {
        Self {
            rows: vec![row; reel_count as usize],
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (reel, row) cells of the first `count` reels
    pub fn path(&self, count: usize) -> Vec<(u8, u8)> {
        self.rows
            .iter()
            .take(count)
            .enumerate()
            .map(|(reel, &row)| (reel as u8, row))
            .collect()
    }
}
