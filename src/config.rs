//! Evaluation settings shared by the library pipeline and the REPL.
//!
//! `Config::from_env` reads `DICE_MODE`, `DICE_SIMULATIONS` and `DICE_MAX_OUTCOMES`.

use crate::summary::Weighting;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

pub const SIMULATION_RANGE: RangeInclusive<usize> = 100..=1_000_000;
pub const DEFAULT_SIMULATIONS: usize = 10_000;
pub const DEFAULT_MAX_OUTCOMES: usize = 1_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown evaluation mode {0:?}; expected 'exact' or 'monte-carlo'")]
    UnknownMode(String),
    #[error("simulation count must be between 100 and 1000000, got {0}")]
    SimulationCount(usize),
    #[error("{var}: cannot parse {value:?} as a number")]
    InvalidNumber { var: &'static str, value: String },
    #[error("the exact outcome limit must be positive")]
    ZeroMaxOutcomes,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum EvalMode {
    #[default]
    Exact,
    MonteCarlo,
}

impl EvalMode {
    pub const fn weighting(self) -> Weighting {
        match self {
            Self::Exact => Weighting::EqualWeight,
            Self::MonteCarlo => Weighting::Sampled,
        }
    }
}

impl fmt::Display for EvalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::MonteCarlo => "monte-carlo",
        })
    }
}

impl FromStr for EvalMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "monte-carlo" | "montecarlo" | "mc" => Ok(Self::MonteCarlo),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Config {
    mode: EvalMode,
    simulation_count: usize,
    max_exact_outcomes: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: EvalMode::default(),
            simulation_count: DEFAULT_SIMULATIONS,
            max_exact_outcomes: Some(DEFAULT_MAX_OUTCOMES),
        }
    }
}

impl Config {
    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    pub fn simulation_count(&self) -> usize {
        self.simulation_count
    }

    pub fn max_exact_outcomes(&self) -> Option<usize> {
        self.max_exact_outcomes
    }

    pub fn with_mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_simulation_count(mut self, count: usize) -> Result<Self, ConfigError> {
        if !SIMULATION_RANGE.contains(&count) {
            return Err(ConfigError::SimulationCount(count));
        }
        self.simulation_count = count;
        Ok(self)
    }

    /// `None` lifts the cap on exact enumeration entirely.
    pub fn with_max_exact_outcomes(mut self, max: Option<usize>) -> Result<Self, ConfigError> {
        if max == Some(0) {
            return Err(ConfigError::ZeroMaxOutcomes);
        }
        self.max_exact_outcomes = max;
        Ok(self)
    }

    /// Builds a config from the process environment, falling back to defaults for unset
    /// variables. Set but malformed variables are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(mode) = lookup("DICE_MODE") {
            config = config.with_mode(mode.parse()?);
        }
        if let Some(count) = lookup("DICE_SIMULATIONS") {
            config = config.with_simulation_count(parse_number("DICE_SIMULATIONS", &count)?)?;
        }
        if let Some(max) = lookup("DICE_MAX_OUTCOMES") {
            let max = if max.trim().eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_number("DICE_MAX_OUTCOMES", &max)?)
            };
            config = config.with_max_exact_outcomes(max)?;
        }

        Ok(config)
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .replace('_', "")
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}
