//! Probability distributions of dice expressions such as `2d6+1d4` or `(2d6+1d4)*2`.
//!
//! An expression is [parse]d once into an [Expr] tree, evaluated either exactly
//! ([evaluate_exact]) or by sampling ([evaluate_monte_carlo]), and the resulting outcome
//! sequence is reduced by [summarize].
//!
//! ```
//! use dice_dist::{distribution, Config};
//!
//! let summary = distribution("1d6 + 1d6", &Config::default()).unwrap();
//! assert_eq!((summary.min, summary.max), (2.0, 12.0));
//! assert_eq!(summary.weighting.label(), "Probability");
//! ```

mod common;
pub mod config;
mod error;
pub mod exact;
pub mod parse;
pub mod sample;
pub mod stringify;
pub mod summary;

pub use common::{BinaryOperator, Float, Int, NonZeroUInt, UInt};
pub use config::{Config, ConfigError, EvalMode};
pub use error::{Error, Result};
pub use exact::{evaluate_exact, OverflowError};
pub use parse::{
    ast::{DiceRoll, Expr},
    parse, ParseError,
};
pub use sample::{evaluate_monte_carlo, Roller};
pub use summary::{summarize, Bin, Summary, Weighting};

/// Evaluates `expr` in the mode `config` selects. The roller is only used by Monte Carlo.
pub fn evaluate<R: Roller>(expr: &Expr, config: &Config, roller: R) -> Result<Vec<Float>> {
    log::debug!("evaluating {} in {} mode", expr, config.mode());
    Ok(match config.mode() {
        EvalMode::Exact => evaluate_exact(expr, config.max_exact_outcomes())?,
        EvalMode::MonteCarlo => evaluate_monte_carlo(expr, config.simulation_count(), roller),
    })
}

/// Parses, evaluates and summarizes `expression`, sampling from the thread-local RNG.
pub fn distribution(expression: &str, config: &Config) -> Result<Summary> {
    distribution_with(expression, config, rand::thread_rng())
}

/// Like [distribution], but Monte Carlo mode samples from `roller`. Pass a seeded
/// [rand::rngs::StdRng] for reproducible summaries.
pub fn distribution_with<R: Roller>(expression: &str, config: &Config, roller: R) -> Result<Summary> {
    let expr = parse(expression)?;
    let outcomes = evaluate(&expr, config, roller)?;
    Ok(summarize(&outcomes, config.mode().weighting()))
}
