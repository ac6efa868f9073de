//! # rf-slot-math: Slot Outcome Evaluation Engine
//!
//! Deterministic, exact-money evaluation of payline slot games. Given a grid
//! and a stake, computes every payline win (with wild substitution), the
//! scatter count and feature trigger, and the total payout.
//!
//! ## Features
//!
//! - **Declarative Config**: JSON/YAML game definitions validated once at load
//! - **Exact Money**: integer minor units, fixed-point multipliers, checked math
//! - **Reel Sampler**: ChaCha20 sampling with a recorded seed for audit replay
//! - **Session Engine**: free spins at the triggering stake, retriggers, stats
//! - **Simulation**: seeded RTP estimation with per-symbol tallies
//!
//! ## Architecture
//!
//! ```text
//! SlotDefinition ──validate──> SlotConfig (Arc, shared read-only)
//!                                   │
//!     GridSource (ReelSampler | remote authority)
//!           │
//!           v
//!         Grid ──evaluate(config, grid, stake)──> SpinResult
//!                                   │
//!                              SlotEngine → SessionStats
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod grid;
pub mod money;
pub mod paytable;
pub mod presets;
pub mod reels;
pub mod simulation;
pub mod spin;
pub mod symbols;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use evaluator::*;
pub use grid::*;
pub use money::*;
pub use paytable::*;
pub use reels::*;
pub use simulation::*;
pub use spin::*;
pub use symbols::*;
