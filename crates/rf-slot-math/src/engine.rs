//! Spin session engine
//!
//! Drives the pull loop: grid source → evaluator → session state. The engine
//! owns free-spin bookkeeping and session statistics; evaluation itself stays
//! a pure function in [`crate::evaluator`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;
use crate::error::{InputError, SlotError, SlotResult};
use crate::evaluator::evaluate;
use crate::grid::Grid;
use crate::money::Money;
use crate::reels::{GridSource, ReelSampler};
use crate::spin::SpinResult;

/// One played spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// 1-based spin number within the session
    pub index: u64,
    /// Grid that was evaluated
    pub grid: Grid,
    /// Evaluation result
    pub result: SpinResult,
    /// Whether this spin was a free spin
    pub free_spin: bool,
    /// Stake the result was computed at
    pub stake: Money,
    /// Stake taken from the player (zero on free spins)
    pub stake_debited: Money,
    /// Free spins left after this spin, including any just awarded
    pub free_spins_remaining: u32,
}

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub paid_spins: u64,
    pub free_spins: u64,
    pub total_staked: Money,
    pub total_won: Money,
    pub winning_spins: u64,
    pub features_triggered: u64,
    pub biggest_win: Money,
}

impl SessionStats {
    /// Return to player as a percentage of stake (display only)
    pub fn rtp(&self) -> f64 {
        if self.total_staked.is_zero() {
            0.0
        } else {
            self.total_won.minor() as f64 / self.total_staked.minor() as f64 * 100.0
        }
    }

    /// Share of spins that won anything, as a percentage
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.winning_spins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    fn record(&mut self, outcome: &SpinOutcome) -> SlotResult<()> {
        let mut next = self.clone();
        next.total_spins += 1;
        if outcome.free_spin {
            next.free_spins += 1;
        } else {
            next.paid_spins += 1;
        }
        next.total_staked = next.total_staked.checked_add(outcome.stake_debited)?;
        next.total_won = next.total_won.checked_add(outcome.result.total_win)?;
        if outcome.result.is_win() {
            next.winning_spins += 1;
        }
        if outcome.result.triggers_feature() {
            next.features_triggered += 1;
        }
        next.biggest_win = next.biggest_win.max(outcome.result.total_win);
        *self = next;
        Ok(())
    }
}

/// Active free-spin round
#[derive(Debug, Clone)]
struct FreeSpinState {
    remaining: u32,
    total: u32,
    stake: Money,
    total_win: Money,
}

/// Spin session over a shared configuration
pub struct SlotEngine<S: GridSource> {
    config: Arc<SlotConfig>,
    source: S,
    stats: SessionStats,
    free_spin_state: Option<FreeSpinState>,
}

impl SlotEngine<ReelSampler> {
    /// Engine drawing grids locally from a fresh entropy seed
    pub fn with_sampler(config: Arc<SlotConfig>) -> Self {
        Self::new(config, ReelSampler::from_entropy())
    }
}

impl<S: GridSource> SlotEngine<S> {
    pub fn new(config: Arc<SlotConfig>, source: S) -> Self {
        Self {
            config,
            source,
            stats: SessionStats::default(),
            free_spin_state: None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN
    // ═══════════════════════════════════════════════════════════════════════════

    /// Play one spin
    ///
    /// Outside free spins `stake` must be an offered bet level and is debited.
    /// During free spins nothing is debited and the triggering stake is used.
    /// On error the session state is left untouched.
    pub fn spin(&mut self, stake: Money) -> SlotResult<SpinOutcome> {
        let (free_spin, stake) = match &self.free_spin_state {
            Some(fs) => {
                if stake != fs.stake {
                    log::warn!(
                        "Free spin ignores requested stake {}, playing at triggering stake {}",
                        stake,
                        fs.stake
                    );
                }
                (true, fs.stake)
            }
            None => {
                if !self.config.offers_stake(stake) {
                    return Err(InputError::StakeNotOffered(stake.minor()).into());
                }
                (false, stake)
            }
        };

        let grid = self.source.next_grid(&self.config)?;
        let result = evaluate(&self.config, &grid, stake)?;

        let mut free_spin_state = self.free_spin_state.clone();
        if let Some(fs) = free_spin_state.as_mut() {
            fs.remaining = fs.remaining.saturating_sub(1);
            fs.total_win = fs.total_win.checked_add(result.total_win)?;
        }

        let awarded = result.scatter.free_spins_awarded;
        if result.triggers_feature() && awarded > 0 {
            match free_spin_state.as_mut() {
                Some(fs) => {
                    let overflow = || SlotError::ArithmeticOverflow {
                        context: "free spin count",
                    };
                    fs.remaining = fs.remaining.checked_add(awarded).ok_or_else(overflow)?;
                    fs.total = fs.total.checked_add(awarded).ok_or_else(overflow)?;
                    log::info!("Free spins retriggered: +{} ({} remaining)", awarded, fs.remaining);
                }
                None => {
                    log::info!("Free spins triggered: {} at stake {}", awarded, stake);
                    free_spin_state = Some(FreeSpinState {
                        remaining: awarded,
                        total: awarded,
                        stake,
                        total_win: Money::ZERO,
                    });
                }
            }
        }

        let free_spins_remaining = free_spin_state.as_ref().map_or(0, |fs| fs.remaining);
        let outcome = SpinOutcome {
            index: self.stats.total_spins + 1,
            grid,
            result,
            free_spin,
            stake,
            stake_debited: if free_spin { Money::ZERO } else { stake },
            free_spins_remaining,
        };
        self.stats.record(&outcome)?;

        if let Some(fs) = &free_spin_state {
            if fs.remaining == 0 {
                log::info!("Free spins complete: {} spins won {}", fs.total, fs.total_win);
                free_spin_state = None;
            }
        }
        self.free_spin_state = free_spin_state;

        log::debug!(
            "Spin {}: stake {}{} won {} ({} lines, {} scatters)",
            outcome.index,
            outcome.stake,
            if outcome.free_spin { " (free)" } else { "" },
            outcome.result.total_win,
            outcome.result.winning_lines.len(),
            outcome.result.scatter.count
        );

        Ok(outcome)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STATE
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &Arc<SlotConfig> {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }

    /// Check if currently in free spins
    pub fn in_free_spins(&self) -> bool {
        self.free_spin_state.is_some()
    }

    pub fn free_spins_remaining(&self) -> u32 {
        self.free_spin_state.as_ref().map_or(0, |fs| fs.remaining)
    }

    /// Win accumulated in the current free-spin round
    pub fn free_spins_total_win(&self) -> Money {
        self.free_spin_state
            .as_ref()
            .map_or(Money::ZERO, |fs| fs.total_win)
    }
}
