use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowError {
    #[error("exact evaluation would produce {outcomes} outcomes, over the limit of {limit}; try Monte Carlo mode instead")]
    TooManyOutcomes { outcomes: usize, limit: usize },
    #[error("exact evaluation would produce too many outcomes to count; try Monte Carlo mode instead")]
    Uncountable,
}
