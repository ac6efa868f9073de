//! Reel strips and grid sampling
//!
//! Weighting is purely by repetition: a symbol appearing four times on a strip
//! is four times as likely as one appearing once. There is no separate weight
//! table, so the strips alone determine the game's true RTP.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;
use crate::error::{InputError, SlotResult};
use crate::grid::Grid;
use crate::symbols::SymbolId;

/// A reel strip of resolved symbol ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelStrip {
    /// Symbol ids in strip order
    pub symbols: Vec<SymbolId>,
    /// Reel index
    pub reel_index: usize,
}

impl ReelStrip {
    pub fn new(reel_index: usize, symbols: Vec<SymbolId>) -> Self {
        Self {
            symbols,
            reel_index,
        }
    }

    /// Symbol at position (wraps around)
    pub fn symbol_at(&self, position: usize) -> Option<SymbolId> {
        if self.symbols.is_empty() {
            return None;
        }
        Some(self.symbols[position % self.symbols.len()])
    }

    /// Repetition count of `symbol`, its sampling weight
    pub fn weight_of(&self, symbol: SymbolId) -> usize {
        self.symbols.iter().filter(|&&s| s == symbol).count()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// How visible rows are drawn from a strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// Each visible cell is an independent uniform draw from the strip
    #[default]
    Independent,
    /// One uniform stop per reel; rows read consecutively, wrapping
    Window,
}

/// Pull interface for grids: a local sampler, a remote authority adapter, a script
pub trait GridSource {
    fn next_grid(&mut self, config: &SlotConfig) -> SlotResult<Grid>;
}

/// Seed length of [`ReelSampler`]
pub const SEED_LEN: usize = 32;

/// Cryptographically strong, reproducible reel sampler
///
/// The 32-byte seed is kept so an audit can replay every grid the sampler
/// produced. The sampler is owned per engine; share grids, not samplers.
pub struct ReelSampler {
    rng: ChaCha20Rng,
    seed: [u8; SEED_LEN],
}

impl ReelSampler {
    /// Fresh seed from the OS-seeded thread RNG
    pub fn from_entropy() -> Self {
        let mut seed = [0u8; SEED_LEN];
        rand::rng().fill_bytes(&mut seed);
        Self::from_seed(seed)
    }

    /// Replay a recorded seed
    pub fn from_seed(seed: [u8; SEED_LEN]) -> Self {
        Self {
            rng: ChaCha20Rng::from_seed(seed),
            seed,
        }
    }

    /// Replay a recorded seed given as 64 hex characters
    pub fn from_hex_seed(hex_seed: &str) -> SlotResult<Self> {
        let bytes = hex::decode(hex_seed.trim())
            .map_err(|e| InputError::InvalidSeed(e.to_string()))?;
        let seed: [u8; SEED_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            InputError::InvalidSeed(format!("expected {SEED_LEN} bytes, got {}", b.len()))
        })?;
        Ok(Self::from_seed(seed))
    }

    /// Derive a full seed from a small number (tests, simulations)
    pub fn from_u64(value: u64) -> Self {
        let mut seed = [0u8; SEED_LEN];
        ChaCha20Rng::seed_from_u64(value).fill_bytes(&mut seed);
        Self::from_seed(seed)
    }

    pub fn seed(&self) -> [u8; SEED_LEN] {
        self.seed
    }

    pub fn seed_hex(&self) -> String {
        hex::encode(self.seed)
    }

    /// Draw one grid from the config's strips
    pub fn sample(&mut self, config: &SlotConfig) -> Grid {
        let rows = config.row_count();
        let mode = config.sampling();
        let reels = config
            .reel_strips()
            .iter()
            .map(|strip| self.draw_reel(strip, rows, mode))
            .collect();
        Grid::new(reels)
    }

    fn draw_reel(&mut self, strip: &ReelStrip, rows: usize, mode: SamplingMode) -> Vec<SymbolId> {
        let len = strip.len();
        if len == 0 {
            return Vec::new();
        }
        match mode {
            SamplingMode::Independent => (0..rows)
                .map(|_| strip.symbols[self.rng.random_range(0..len)])
                .collect(),
            SamplingMode::Window => {
                let stop = self.rng.random_range(0..len);
                (0..rows)
                    .filter_map(|row| strip.symbol_at(stop + row))
                    .collect()
            }
        }
    }
}

impl GridSource for ReelSampler {
    fn next_grid(&mut self, config: &SlotConfig) -> SlotResult<Grid> {
        Ok(self.sample(config))
    }
}
