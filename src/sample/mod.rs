mod roller;
mod sampler;

use crate::common::Float;
use crate::parse::ast;

pub use roller::Roller;
pub use sampler::{DefaultRoller, Sampler};

#[cfg(test)]
pub(crate) use roller::ScriptedRoller;

/// Draws `simulation_count` independent samples of `expr`.
///
/// Pass `&mut rng` to keep using a seeded generator afterwards.
pub fn evaluate_monte_carlo<R: Roller>(
    expr: &ast::Expr,
    simulation_count: usize,
    roller: R,
) -> Vec<Float> {
    Sampler::new(roller).sample(expr, simulation_count)
}
