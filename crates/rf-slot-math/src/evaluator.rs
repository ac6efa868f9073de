//! Outcome evaluation
//!
//! A pure function of (config, grid, stake). Every payline is evaluated on its
//! own and all qualifying lines are reported; the scatter is counted over the
//! whole grid. No state survives between calls, so any number of
//! threads can evaluate against one shared [`SlotConfig`].

use crate::config::SlotConfig;
use crate::error::{SlotError, SlotResult};
use crate::grid::Grid;
use crate::money::Money;
use crate::paytable::Payline;
use crate::spin::{LineKind, ScatterOutcome, SpinResult, WinningLine};
use crate::symbols::SymbolId;

/// Evaluate a grid at the given stake
///
/// Fails on a grid that does not match the config's shape or symbol set, and
/// on payout arithmetic that would overflow. A losing grid is `Ok` with an
/// empty line list.
pub fn evaluate(config: &SlotConfig, grid: &Grid, stake: Money) -> SlotResult<SpinResult> {
    grid.check_against(config)?;

    let mut winning_lines = Vec::new();
    for (index, payline) in config.paylines().iter().enumerate() {
        if let Some(win) = evaluate_payline(config, grid, payline, index, stake)? {
            winning_lines.push(win);
        }
    }

    let (scatter, scatter_line) = evaluate_scatter(config, grid, stake)?;
    if let Some(line) = scatter_line {
        winning_lines.push(line);
    }

    let total_win = winning_lines
        .iter()
        .try_fold(Money::ZERO, |total, line| total.checked_add(line.payout))?;

    Ok(SpinResult {
        total_win,
        winning_lines,
        scatter,
    })
}

/// Paid symbol and run length of a left-aligned line
///
/// A leading Wild run adopts the first non-Wild symbol after it and the run
/// continues over that symbol and further Wilds. The Scatter is never
/// substituted: a Wild run that meets it stands alone, and a line starting on
/// it has no match at all.
pub fn line_match(config: &SlotConfig, symbols: &[SymbolId]) -> Option<(SymbolId, usize)> {
    let first = *symbols.first()?;
    if config.is_scatter(first) {
        return None;
    }

    let wild_run = symbols.iter().take_while(|&&s| config.is_wild(s)).count();
    let anchor = match symbols.get(wild_run) {
        None => return Some((first, wild_run)),
        Some(&next) if config.is_scatter(next) => {
            return if wild_run > 0 { Some((first, wild_run)) } else { None };
        }
        Some(&next) => next,
    };

    let count = wild_run
        + symbols[wild_run..]
            .iter()
            .take_while(|&&s| s == anchor || config.is_wild(s))
            .count();
    Some((anchor, count))
}

fn evaluate_payline(
    config: &SlotConfig,
    grid: &Grid,
    payline: &Payline,
    index: usize,
    stake: Money,
) -> SlotResult<Option<WinningLine>> {
    let symbols: Vec<SymbolId> = payline
        .rows
        .iter()
        .enumerate()
        .filter_map(|(reel, &row)| grid.symbol_at(reel, row as usize))
        .collect();

    let Some((symbol, count)) = line_match(config, &symbols) else {
        return Ok(None);
    };
    let Some(multiplier) = u8::try_from(count)
        .ok()
        .and_then(|count| config.lookup(symbol, count))
    else {
        return Ok(None);
    };
    let payout = multiplier.apply(stake)?;
    if payout.is_zero() {
        return Ok(None);
    }

    log::trace!(
        "Payline {}: {} x{} pays {}",
        index,
        config.symbols().name_of(symbol),
        count,
        payout
    );

    Ok(Some(WinningLine {
        kind: LineKind::Payline { index },
        symbol,
        count: count as u32,
        payout,
        positions: payline.path(count),
    }))
}

fn evaluate_scatter(
    config: &SlotConfig,
    grid: &Grid,
    stake: Money,
) -> SlotResult<(ScatterOutcome, Option<WinningLine>)> {
    let Some(scatter) = config.symbols().scatter_id() else {
        return Ok((ScatterOutcome::default(), None));
    };

    let positions: Vec<(u8, u8)> = grid
        .cells()
        .filter(|&(_, _, id)| id == scatter)
        .map(|(reel, row, _)| (reel as u8, row as u8))
        .collect();
    let count = u32::try_from(positions.len()).map_err(|_| SlotError::ArithmeticOverflow {
        context: "scatter count",
    })?;
    // Pay tiers are keyed by u8, larger counts fall into the top tier
    let tier = u8::try_from(count).unwrap_or(u8::MAX);

    let feature = config.scatter_feature();
    let triggered = feature.is_some_and(|f| count >= u32::from(f.trigger_count));
    let free_spins_awarded = match feature {
        Some(f) if triggered => f.free_spins_awarded,
        _ => 0,
    };

    let payout = match config.symbol(scatter).and_then(|s| s.get_pay_at_most(tier)) {
        Some(multiplier) => multiplier.apply(stake)?,
        None => Money::ZERO,
    };

    let outcome = ScatterOutcome {
        count,
        triggered,
        free_spins_awarded,
    };
    if !triggered && payout.is_zero() {
        return Ok((outcome, None));
    }

    log::trace!(
        "Scatter x{} pays {}{}",
        count,
        payout,
        if triggered { " (feature triggered)" } else { "" }
    );

    let line = WinningLine {
        kind: LineKind::Scatter,
        symbol: scatter,
        count,
        payout,
        positions,
    };
    Ok((outcome, Some(line)))
}
