use super::{error::OverflowError, EResult};
use crate::common::*;
use crate::parse::{
    ast,
    visit::{Accept, ExprVisitor},
};
use log::{debug, trace};

/// Walks an expression and enumerates its full outcome sequence.
///
/// Every entry of the result carries the same weight, `1 / len`.
#[derive(Debug, Default, Copy, Clone)]
pub struct Enumerator {
    max_outcomes: Option<usize>,
}

impl Enumerator {
    pub fn new(max_outcomes: Option<usize>) -> Self {
        Self { max_outcomes }
    }

    fn check_outcomes(&self, outcomes: Option<usize>) -> EResult<usize> {
        let outcomes = outcomes.ok_or(OverflowError::Uncountable)?;
        match self.max_outcomes {
            Some(limit) if outcomes > limit => Err(OverflowError::TooManyOutcomes { outcomes, limit }),
            _ => Ok(outcomes),
        }
    }

    pub fn evaluate(&mut self, expr: &ast::Expr) -> EResult<Vec<Float>> {
        let outcomes = self.check_outcomes(expr.outcome_count())?;
        debug!("enumerating {} outcomes of {}", outcomes, expr);
        expr.accept(self)
    }

    fn combine(&self, lhs: &[Float], op: BinaryOperator, rhs: &[Float]) -> EResult<Vec<Float>> {
        let len = self.check_outcomes(lhs.len().checked_mul(rhs.len()))?;
        let mut ret = Vec::with_capacity(len);
        for &a in lhs {
            ret.extend(rhs.iter().map(|&b| op.apply(a, b)));
        }
        Ok(ret)
    }
}

impl ExprVisitor for Enumerator {
    type Output = EResult<Vec<Float>>;

    fn visit_roll(&mut self, roll: &ast::DiceRoll) -> Self::Output {
        if roll.is_constant() {
            return Ok(vec![roll.min()]);
        }

        let faces: Vec<Float> = (1..=roll.sides.get()).map(Float::from).collect();
        let mut outcomes = faces.clone();
        for _ in 1..roll.count.get() {
            outcomes = self.combine(&outcomes, BinaryOperator::Add, &faces)?;
            trace!("folded a d{} into {} outcomes", roll.sides, outcomes.len());
        }
        Ok(outcomes)
    }

    fn visit_binary(&mut self, l: &ast::Expr, op: &BinaryOperator, r: &ast::Expr) -> Self::Output {
        let left = l.accept(self)?;
        let right = r.accept(self)?;
        self.combine(&left, *op, &right)
    }
}
