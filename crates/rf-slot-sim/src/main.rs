//! Slot math command line
//!
//! Usage:
//!   slot-sim validate [config]                          - Validate a game config
//!   slot-sim evaluate [config] --grid g.json --stake 2  - Evaluate one grid
//!   slot-sim simulate [config] --spins N --stake 1      - Seeded RTP simulation
//!
//! Without a config path the built-in Frosty Fortunes game is used.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rf_slot_math::{
    ConfigError, Grid, LineKind, Money, ReelSampler, SimulationParams, SlotConfig, evaluate,
    presets, simulate,
};
use serde_json::json;

#[derive(Parser)]
#[command(name = "slot-sim", about = "Slot game config validator, evaluator and simulator")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a config, listing every violation
    Validate {
        /// JSON or YAML game definition
        config: Option<PathBuf>,
    },
    /// Evaluate one grid at a stake
    Evaluate {
        /// JSON or YAML game definition
        config: Option<PathBuf>,
        /// JSON file with a reel-major grid of symbol names
        #[arg(short, long)]
        grid: PathBuf,
        /// Stake in minor units
        #[arg(short, long, allow_negative_numbers = true)]
        stake: i64,
    },
    /// Estimate RTP over seeded spins
    Simulate {
        /// JSON or YAML game definition
        config: Option<PathBuf>,
        /// Paid spins to play
        #[arg(short = 'n', long, default_value_t = 100_000)]
        spins: u64,
        /// Stake in minor units
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        stake: i64,
        /// 64 hex characters; fresh entropy when omitted
        #[arg(long)]
        seed: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate { config } => validate(config.as_deref()),
        Commands::Evaluate {
            config,
            grid,
            stake,
        } => evaluate_grid(config.as_deref(), &grid, stake),
        Commands::Simulate {
            config,
            spins,
            stake,
            seed,
        } => run_simulation(config.as_deref(), spins, stake, seed.as_deref()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(path: Option<&Path>) -> Result<SlotConfig> {
    match path {
        Some(path) => SlotConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => presets::frosty_fortunes().context("Built-in game failed to load"),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

fn validate(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(path) => match SlotConfig::load(path) {
            Ok(config) => config,
            Err(ConfigError::Invalid(violations)) => {
                eprintln!("{} is invalid:", path.display());
                for violation in &violations {
                    eprintln!("  - {violation}");
                }
                bail!("{} violations", violations.len());
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to load {}", path.display())),
        },
        None => load_config(None)?,
    };

    println!("Game:        {}", config.name());
    println!("Fingerprint: {}", config.fingerprint());
    println!(
        "Grid:        {} reels x {} rows, {} paylines",
        config.reel_count(),
        config.row_count(),
        config.paylines().len()
    );
    match config.scatter_feature() {
        Some(feature) => println!(
            "Feature:     {} scatters award {} free spins",
            feature.trigger_count, feature.free_spins_awarded
        ),
        None => println!("Feature:     none"),
    }
    if !config.bet_levels().is_empty() {
        let levels: Vec<String> = config.bet_levels().iter().map(|m| m.to_string()).collect();
        println!("Bet levels:  {}", levels.join(", "));
    }

    println!("Strip weights:");
    for strip in config.reel_strips() {
        let weights: Vec<String> = config
            .symbols()
            .iter()
            .filter_map(|(id, symbol)| match strip.weight_of(id) {
                0 => None,
                w => Some(format!("{}={}", symbol.name, w)),
            })
            .collect();
        println!(
            "  reel {} ({} stops): {}",
            strip.reel_index,
            strip.len(),
            weights.join(" ")
        );
    }
    Ok(())
}

fn evaluate_grid(path: Option<&Path>, grid_path: &Path, stake: i64) -> Result<()> {
    let config = load_config(path)?;
    let stake = Money::try_from_minor(stake)?;

    let text = std::fs::read_to_string(grid_path)
        .with_context(|| format!("Failed to read grid {}", grid_path.display()))?;
    let names: Vec<Vec<String>> =
        serde_json::from_str(&text).context("Grid must be a JSON array of reels of symbol names")?;
    let grid = Grid::from_names(&config, &names)?;

    let result = evaluate(&config, &grid, stake)?;
    let symbols = config.symbols();
    let lines: Vec<_> = result
        .winning_lines
        .iter()
        .map(|line| {
            let payline = match line.kind {
                LineKind::Payline { index } => json!(index),
                LineKind::Scatter => json!("scatter"),
            };
            json!({
                "payline": payline,
                "symbol": symbols.name_of(line.symbol),
                "count": line.count,
                "payout": line.payout,
                "positions": line.positions,
            })
        })
        .collect();

    let output = json!({
        "stake": stake,
        "total_win": result.total_win,
        "winning_lines": lines,
        "scatter": result.scatter,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_simulation(path: Option<&Path>, spins: u64, stake: i64, seed: Option<&str>) -> Result<()> {
    let config = Arc::new(load_config(path)?);
    let stake = Money::try_from_minor(stake)?;
    if !config.offers_stake(stake) {
        bail!("Stake {} is not one of the offered bet levels", stake);
    }
    let seed = seed
        .map(|s| ReelSampler::from_hex_seed(s).map(|sampler| sampler.seed()))
        .transpose()?;

    let report = simulate(config, &SimulationParams { spins, stake, seed })?;
    log::info!("Replay with --seed {}", report.seed);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
