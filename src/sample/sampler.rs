use super::roller::Roller;
use crate::common::*;
use crate::parse::{
    ast,
    visit::{Accept, ExprVisitor},
};
use log::debug;

pub type DefaultRoller = rand::prelude::ThreadRng;

pub struct Sampler<R = DefaultRoller> {
    roller: R,
}

impl<R: Roller> Sampler<R> {
    pub fn new(roller: R) -> Self {
        Self { roller }
    }

    /// Walks the tree once, rolling every leaf.
    pub fn sample_one(&mut self, expr: &ast::Expr) -> Float {
        expr.accept(self)
    }

    pub fn sample(&mut self, expr: &ast::Expr, simulation_count: usize) -> Vec<Float> {
        debug!("sampling {} {} times", expr, simulation_count);
        (0..simulation_count).map(|_| self.sample_one(expr)).collect()
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Roller> ExprVisitor for Sampler<R> {
    type Output = Float;

    fn visit_roll(&mut self, roll: &ast::DiceRoll) -> Float {
        if roll.is_constant() {
            return roll.min();
        }
        self.roller.roll_sum(roll.count, roll.sides)
    }

    fn visit_binary(&mut self, l: &ast::Expr, op: &BinaryOperator, r: &ast::Expr) -> Float {
        let left = l.accept(self);
        let right = r.accept(self);
        op.apply(left, right)
    }
}
