mod enumerator;
mod error;

use crate::common::Float;
use crate::parse::ast;

type EResult<T> = Result<T, OverflowError>;

pub use enumerator::Enumerator;
pub use error::OverflowError;

/// Enumerates every equally weighted outcome of `expr`.
///
/// The result has `expr.outcome_count()` entries. Evaluation fails before allocating
/// anything if that count is above `max_outcomes`.
pub fn evaluate_exact(expr: &ast::Expr, max_outcomes: Option<usize>) -> EResult<Vec<Float>> {
    Enumerator::new(max_outcomes).evaluate(expr)
}
