//! Symbol definitions and the validated symbol set

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Multiplier;

/// Smallest match count that can pay on a payline
pub const MIN_LINE_MATCH: u8 = 3;

/// Index of a symbol in its [`SymbolSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u16);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// Regular paying symbol
    #[default]
    Regular,
    /// Wild - substitutes for regular symbols on paylines
    Wild,
    /// Scatter - pays and triggers features regardless of position
    Scatter,
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Symbol name used in strips and grids (e.g. "KING", "WILD")
    pub name: String,
    /// Human readable name
    #[serde(default)]
    pub display_name: String,
    /// Symbol type
    #[serde(default)]
    pub kind: SymbolKind,
    /// Pay multipliers keyed by match count
    #[serde(default)]
    pub pays: BTreeMap<u8, Multiplier>,
}

impl Symbol {
    /// Create a regular symbol with pays for 3, 4, 5... of a kind
    pub fn regular(name: impl Into<String>, pays: &[u64]) -> Self {
        Self::with_kind(name, SymbolKind::Regular, pays)
    }

    /// Create a wild symbol
    pub fn wild(name: impl Into<String>, pays: &[u64]) -> Self {
        Self::with_kind(name, SymbolKind::Wild, pays)
    }

    /// Create a scatter symbol
    pub fn scatter(name: impl Into<String>, pays: &[u64]) -> Self {
        Self::with_kind(name, SymbolKind::Scatter, pays)
    }

    fn with_kind(name: impl Into<String>, kind: SymbolKind, pays: &[u64]) -> Self {
        let name = name.into();
        let pays = pays
            .iter()
            .zip(MIN_LINE_MATCH..)
            .filter_map(|(&units, count)| Multiplier::whole(units).map(|m| (count, m)))
            .collect();
        Self {
            display_name: name.clone(),
            name,
            kind,
            pays,
        }
    }

    /// Exact pay for a match count
    pub fn get_pay(&self, match_count: u8) -> Option<Multiplier> {
        self.pays.get(&match_count).copied()
    }

    /// Pay of the highest defined count not above `count`
    pub fn get_pay_at_most(&self, count: u8) -> Option<Multiplier> {
        self.pays.range(..=count).next_back().map(|(_, &m)| m)
    }

    pub fn is_special(&self) -> bool {
        self.kind != SymbolKind::Regular
    }
}

/// Validated, indexed symbol table
#[derive(Debug, Clone)]
pub struct SymbolSet {
    symbols: Vec<Symbol>,
    wild: Option<SymbolId>,
    scatter: Option<SymbolId>,
}

impl SymbolSet {
    /// Build from definitions already checked for duplicates and special-symbol uniqueness
    pub(crate) fn new(symbols: Vec<Symbol>) -> Self {
        let find = |kind: SymbolKind| {
            symbols
                .iter()
                .position(|s| s.kind == kind)
                .map(|i| SymbolId(i as u16))
        };
        let wild = find(SymbolKind::Wild);
        let scatter = find(SymbolKind::Scatter);
        Self {
            symbols,
            wild,
            scatter,
        }
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn id_of(&self, name: &str) -> Option<SymbolId> {
        self.symbols
            .iter()
            .position(|s| s.name == name)
            .map(|i| SymbolId(i as u16))
    }

    pub fn name_of(&self, id: SymbolId) -> &str {
        self.get(id).map(|s| s.name.as_str()).unwrap_or("?")
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u16), s))
    }

    pub fn wild_id(&self) -> Option<SymbolId> {
        self.wild
    }

    pub fn scatter_id(&self) -> Option<SymbolId> {
        self.scatter
    }

    pub fn is_wild(&self, id: SymbolId) -> bool {
        self.wild == Some(id)
    }

    pub fn is_scatter(&self, id: SymbolId) -> bool {
        self.scatter == Some(id)
    }

    /// Pay multiplier for `count` matches of `id`, `None` when nothing pays
    pub fn lookup(&self, id: SymbolId, count: u8) -> Option<Multiplier> {
        self.get(id).and_then(|s| s.get_pay(count))
    }
}
