//! Error types for slot math

use thiserror::Error;

/// A single load-time invariant violation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Reel count must be at least 1")]
    ZeroReels,

    #[error("Row count must be at least 1")]
    ZeroRows,

    #[error("Duplicate symbol name: {0}")]
    DuplicateSymbol(String),

    #[error("More than one wild symbol: {0:?}")]
    MultipleWilds(Vec<String>),

    #[error("More than one scatter symbol: {0:?}")]
    MultipleScatters(Vec<String>),

    #[error("Symbol {symbol}: pay count {count} outside {min}..={max}")]
    PayCountOutOfRange {
        symbol: String,
        count: u8,
        min: u8,
        max: u16,
    },

    #[error("Symbol {symbol}: pay for {count} is lower than for a smaller count")]
    DecreasingPays { symbol: String, count: u8 },

    #[error("No paylines defined")]
    NoPaylines,

    #[error("Payline {index}: length {actual}, expected {expected}")]
    PaylineLength {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Payline {index}: row {row} on reel {reel} is outside 0..{rows}")]
    PaylineRowOutOfRange {
        index: usize,
        reel: usize,
        row: u8,
        rows: u8,
    },

    #[error("Reel strip count {actual}, expected {expected}")]
    ReelStripCount { expected: usize, actual: usize },

    #[error("Reel strip {reel} is empty")]
    EmptyReelStrip { reel: usize },

    #[error("Reel strip {reel} has {len} stops, fewer than {rows} visible rows")]
    ReelStripTooShort { reel: usize, len: usize, rows: u8 },

    #[error("Reel strip {reel} references unknown symbol {name}")]
    UnknownStripSymbol { reel: usize, name: String },

    #[error("Reel strip {reel} has no scatter, the scatter feature is unreachable there")]
    StripMissingScatter { reel: usize },

    #[error("Scatter feature configured but no scatter symbol defined")]
    ScatterFeatureWithoutScatter,

    #[error("Scatter trigger count must be at least 1")]
    ZeroTriggerCount,

    #[error("Scatter trigger count {trigger_count} exceeds the {positions} grid positions")]
    TriggerCountUnreachable {
        trigger_count: u8,
        positions: usize,
    },

    #[error("Bet level {index} is zero")]
    ZeroBetLevel { index: usize },
}

/// Configuration load errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration ({} violations): {}", .0.len(), list_violations(.0))]
    Invalid(Vec<ConfigViolation>),
}

impl ConfigError {
    /// Violations carried by an `Invalid` error (empty for parse/IO errors)
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::Invalid(v) => v,
            _ => &[],
        }
    }
}

fn list_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Per-call input rejected by the evaluator or engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Grid has {actual} reels, expected {expected}")]
    ReelCount { expected: usize, actual: usize },

    #[error("Grid reel {reel} has {actual} rows, expected {expected}")]
    RowCount {
        reel: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown symbol name: {0}")]
    UnknownSymbol(String),

    #[error("Unknown symbol id {id} at reel {reel}, row {row}")]
    UnknownSymbolId { id: u16, reel: usize, row: usize },

    #[error("Negative stake: {0}")]
    NegativeStake(i64),

    #[error("Stake {0} is not an offered bet level")]
    StakeNotOffered(u64),

    #[error("Invalid RNG seed: {0}")]
    InvalidSeed(String),
}

/// Top-level slot math error
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Arithmetic overflow: {context}")]
    ArithmeticOverflow { context: &'static str },
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;
