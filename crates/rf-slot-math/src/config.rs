//! Slot game configuration
//!
//! A [`SlotDefinition`] is the declarative, serializable description of a game
//! (JSON or YAML). [`SlotConfig::from_definition`] validates it once and yields
//! the immutable handle the evaluator and sampler work from. Validation never
//! stops at the first problem: every violated invariant is reported.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ConfigError, ConfigViolation};
use crate::money::Money;
use crate::paytable::Payline;
use crate::reels::{ReelStrip, SamplingMode};
use crate::symbols::{MIN_LINE_MATCH, Symbol, SymbolId, SymbolKind, SymbolSet};

/// Grid specification (reels × rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of reels (columns)
    pub reels: u8,
    /// Number of visible rows per reel
    pub rows: u8,
}

impl GridSpec {
    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.reels as usize * self.rows as usize
    }
}

/// Scatter-triggered feature award
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterFeature {
    /// Scatters anywhere on the grid needed to trigger
    pub trigger_count: u8,
    /// Free spins awarded per trigger
    #[serde(default = "default_free_spins")]
    pub free_spins_awarded: u32,
}

fn default_free_spins() -> u32 {
    10
}

impl Default for ScatterFeature {
    fn default() -> Self {
        Self {
            trigger_count: 3,
            free_spins_awarded: default_free_spins(),
        }
    }
}

/// Declarative game description, as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDefinition {
    /// Game name
    pub name: String,
    /// Number of reels
    pub reels: u8,
    /// Visible rows per reel
    pub rows: u8,
    /// Symbol table with pays
    pub symbols: Vec<Symbol>,
    /// Paylines, numbered by position
    pub paylines: Vec<Payline>,
    /// One strip of symbol names per reel
    pub reel_strips: Vec<Vec<String>>,
    /// Scatter feature (None = scatters only pay)
    #[serde(default)]
    pub scatter_feature: Option<ScatterFeature>,
    /// How visible rows are drawn from strips
    #[serde(default)]
    pub sampling: SamplingMode,
    /// Offered stakes (empty = any stake)
    #[serde(default)]
    pub bet_levels: Vec<Money>,
}

/// Validated, immutable slot configuration
#[derive(Debug, Clone)]
pub struct SlotConfig {
    definition: SlotDefinition,
    grid: GridSpec,
    symbols: SymbolSet,
    reel_strips: Vec<ReelStrip>,
    fingerprint: String,
}

impl SlotConfig {
    /// Validate a definition, collecting every violation
    pub fn from_definition(definition: SlotDefinition) -> Result<Self, ConfigError> {
        let mut violations = Vec::new();

        let grid = GridSpec {
            reels: definition.reels,
            rows: definition.rows,
        };
        if grid.reels == 0 {
            violations.push(ConfigViolation::ZeroReels);
        }
        if grid.rows == 0 {
            violations.push(ConfigViolation::ZeroRows);
        }

        check_symbols(&definition.symbols, grid, &mut violations);
        check_paylines(&definition.paylines, grid, &mut violations);

        let symbols = SymbolSet::new(definition.symbols.clone());
        let reel_strips = resolve_strips(&definition, &symbols, &mut violations);

        if let Some(feature) = definition.scatter_feature {
            if feature.trigger_count == 0 {
                violations.push(ConfigViolation::ZeroTriggerCount);
            } else if grid.total_positions() > 0
                && usize::from(feature.trigger_count) > grid.total_positions()
            {
                violations.push(ConfigViolation::TriggerCountUnreachable {
                    trigger_count: feature.trigger_count,
                    positions: grid.total_positions(),
                });
            }
            match symbols.scatter_id() {
                None => violations.push(ConfigViolation::ScatterFeatureWithoutScatter),
                Some(scatter) => {
                    for strip in &reel_strips {
                        if strip.weight_of(scatter) == 0 && !strip.is_empty() {
                            violations.push(ConfigViolation::StripMissingScatter {
                                reel: strip.reel_index,
                            });
                        }
                    }
                }
            }
        }

        for (index, level) in definition.bet_levels.iter().enumerate() {
            if level.is_zero() {
                violations.push(ConfigViolation::ZeroBetLevel { index });
            }
        }

        if !violations.is_empty() {
            log::warn!(
                "Rejected slot config '{}': {} violations",
                definition.name,
                violations.len()
            );
            return Err(ConfigError::Invalid(violations));
        }

        let fingerprint = fingerprint_of(&definition)?;
        log::info!(
            "Loaded slot config '{}' ({}x{}, {} paylines, {} symbols, fingerprint {})",
            definition.name,
            grid.reels,
            grid.rows,
            definition.paylines.len(),
            symbols.len(),
            &fingerprint[..12]
        );

        Ok(Self {
            definition,
            grid,
            symbols,
            reel_strips,
            fingerprint,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::from_definition(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::from_definition(serde_yml::from_str(yaml)?)
    }

    /// Load a `.json`, `.yaml` or `.yml` file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Export the definition as pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.definition)?)
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn reel_count(&self) -> usize {
        self.grid.reels as usize
    }

    pub fn row_count(&self) -> usize {
        self.grid.rows as usize
    }

    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn symbol_id(&self, name: &str) -> Option<SymbolId> {
        self.symbols.id_of(name)
    }

    pub fn is_wild(&self, id: SymbolId) -> bool {
        self.symbols.is_wild(id)
    }

    pub fn is_scatter(&self, id: SymbolId) -> bool {
        self.symbols.is_scatter(id)
    }

    pub fn lookup(&self, id: SymbolId, count: u8) -> Option<crate::money::Multiplier> {
        self.symbols.lookup(id, count)
    }

    pub fn paylines(&self) -> &[Payline] {
        &self.definition.paylines
    }

    pub fn reel_strips(&self) -> &[ReelStrip] {
        &self.reel_strips
    }

    pub fn scatter_feature(&self) -> Option<ScatterFeature> {
        self.definition.scatter_feature
    }

    pub fn sampling(&self) -> SamplingMode {
        self.definition.sampling
    }

    pub fn bet_levels(&self) -> &[Money] {
        &self.definition.bet_levels
    }

    /// Whether `stake` is offered (always true without bet levels)
    pub fn offers_stake(&self, stake: Money) -> bool {
        self.definition.bet_levels.is_empty() || self.definition.bet_levels.contains(&stake)
    }

    /// SHA-256 of the canonical JSON definition, hex encoded
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn definition(&self) -> &SlotDefinition {
        &self.definition
    }
}

fn fingerprint_of(definition: &SlotDefinition) -> Result<String, ConfigError> {
    let canonical = serde_json::to_vec(definition)?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}

fn check_symbols(symbols: &[Symbol], grid: GridSpec, violations: &mut Vec<ConfigViolation>) {
    let mut seen = HashSet::new();
    for symbol in symbols {
        if !seen.insert(symbol.name.as_str()) {
            violations.push(ConfigViolation::DuplicateSymbol(symbol.name.clone()));
        }
    }

    let named = |kind: SymbolKind| -> Vec<String> {
        symbols
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.name.clone())
            .collect()
    };
    let wilds = named(SymbolKind::Wild);
    if wilds.len() > 1 {
        violations.push(ConfigViolation::MultipleWilds(wilds));
    }
    let scatters = named(SymbolKind::Scatter);
    if scatters.len() > 1 {
        violations.push(ConfigViolation::MultipleScatters(scatters));
    }

    for symbol in symbols {
        let (min, max) = match symbol.kind {
            SymbolKind::Scatter => (1, grid.total_positions() as u16),
            _ => (MIN_LINE_MATCH, u16::from(grid.reels)),
        };
        let mut previous = None;
        for (&count, &pay) in &symbol.pays {
            if count < min || u16::from(count) > max {
                violations.push(ConfigViolation::PayCountOutOfRange {
                    symbol: symbol.name.clone(),
                    count,
                    min,
                    max,
                });
            }
            if previous.is_some_and(|p| pay < p) {
                violations.push(ConfigViolation::DecreasingPays {
                    symbol: symbol.name.clone(),
                    count,
                });
            }
            previous = Some(pay);
        }
    }
}

fn check_paylines(paylines: &[Payline], grid: GridSpec, violations: &mut Vec<ConfigViolation>) {
    if paylines.is_empty() {
        violations.push(ConfigViolation::NoPaylines);
    }
    for (index, line) in paylines.iter().enumerate() {
        if line.len() != grid.reels as usize {
            violations.push(ConfigViolation::PaylineLength {
                index,
                expected: grid.reels as usize,
                actual: line.len(),
            });
        }
        for (reel, &row) in line.rows.iter().enumerate() {
            if row >= grid.rows {
                violations.push(ConfigViolation::PaylineRowOutOfRange {
                    index,
                    reel,
                    row,
                    rows: grid.rows,
                });
            }
        }
    }
}

fn resolve_strips(
    definition: &SlotDefinition,
    symbols: &SymbolSet,
    violations: &mut Vec<ConfigViolation>,
) -> Vec<ReelStrip> {
    if definition.reel_strips.len() != definition.reels as usize {
        violations.push(ConfigViolation::ReelStripCount {
            expected: definition.reels as usize,
            actual: definition.reel_strips.len(),
        });
    }

    let mut strips = Vec::with_capacity(definition.reel_strips.len());
    for (reel, names) in definition.reel_strips.iter().enumerate() {
        if names.is_empty() {
            violations.push(ConfigViolation::EmptyReelStrip { reel });
        } else if names.len() < definition.rows as usize {
            violations.push(ConfigViolation::ReelStripTooShort {
                reel,
                len: names.len(),
                rows: definition.rows,
            });
        }

        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            match symbols.id_of(name) {
                Some(id) => ids.push(id),
                None => violations.push(ConfigViolation::UnknownStripSymbol {
                    reel,
                    name: name.clone(),
                }),
            }
        }
        strips.push(ReelStrip::new(reel, ids));
    }
    strips
}
