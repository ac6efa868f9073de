//! Exact monetary arithmetic
//!
//! Stakes and payouts are integer minor units; pay multipliers are fixed-point
//! hundredths. Floating point never touches money.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{InputError, SlotError, SlotResult};

/// Fixed-point scale of [`Multiplier`] (two decimal places)
pub const MULTIPLIER_SCALE: u64 = 100;

/// Non-negative amount in minor currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Convert a signed amount, rejecting negatives
    pub fn try_from_minor(minor: i64) -> SlotResult<Self> {
        u64::try_from(minor)
            .map(Self)
            .map_err(|_| InputError::NegativeStake(minor).into())
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Money) -> SlotResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(SlotError::ArithmeticOverflow {
                context: "money addition",
            })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payout factor per one unit of stake, in hundredths
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "RawMultiplier")]
pub struct Multiplier(u64);

impl Multiplier {
    pub const ZERO: Multiplier = Multiplier(0);

    pub fn whole(units: u64) -> Option<Self> {
        units.checked_mul(MULTIPLIER_SCALE).map(Self)
    }

    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    pub const fn hundredths(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `stake × self`, rounded toward zero to the minor unit
    pub fn apply(self, stake: Money) -> SlotResult<Money> {
        let scaled = stake
            .minor()
            .checked_mul(self.0)
            .ok_or(SlotError::ArithmeticOverflow {
                context: "payout multiplication",
            })?;
        Ok(Money(scaled / MULTIPLIER_SCALE))
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / MULTIPLIER_SCALE;
        let frac = self.0 % MULTIPLIER_SCALE;
        if frac == 0 {
            write!(f, "{whole}")
        } else if frac % 10 == 0 {
            write!(f, "{whole}.{}", frac / 10)
        } else {
            write!(f, "{whole}.{frac:02}")
        }
    }
}

impl FromStr for Multiplier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("not a non-negative decimal: {s:?}"));
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("at most two decimal places allowed: {s:?}"));
        }
        let whole: u64 = whole
            .parse()
            .map_err(|_| format!("multiplier out of range: {s:?}"))?;
        let frac_hundredths = match frac.len() {
            0 => 0,
            1 => u64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => frac.parse::<u64>().unwrap_or(0),
        };
        whole
            .checked_mul(MULTIPLIER_SCALE)
            .and_then(|v| v.checked_add(frac_hundredths))
            .map(Self)
            .ok_or_else(|| format!("multiplier out of range: {s:?}"))
    }
}

impl Serialize for Multiplier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % MULTIPLIER_SCALE == 0 {
            serializer.serialize_u64(self.0 / MULTIPLIER_SCALE)
        } else {
            serializer.serialize_str(&self.to_string())
        }
    }
}

/// Wire forms accepted for a multiplier in config files
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMultiplier {
    Whole(u64),
    Decimal(f64),
    Text(String),
}

impl TryFrom<RawMultiplier> for Multiplier {
    type Error = String;

    fn try_from(raw: RawMultiplier) -> Result<Self, Self::Error> {
        match raw {
            RawMultiplier::Whole(units) => {
                Multiplier::whole(units).ok_or_else(|| format!("multiplier out of range: {units}"))
            }
            RawMultiplier::Decimal(value) => {
                if !value.is_finite() || value < 0.0 {
                    return Err(format!("multiplier must be finite and non-negative: {value}"));
                }
                let scaled = value * MULTIPLIER_SCALE as f64;
                let rounded = scaled.round();
                if (scaled - rounded).abs() > 1e-6 {
                    return Err(format!("at most two decimal places allowed: {value}"));
                }
                if rounded > u64::MAX as f64 {
                    return Err(format!("multiplier out of range: {value}"));
                }
                Ok(Multiplier(rounded as u64))
            }
            RawMultiplier::Text(text) => text.parse(),
        }
    }
}
