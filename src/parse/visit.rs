use crate::common::*;
use crate::parse::ast;

pub trait ExprVisitor {
    type Output;

    fn visit<T: ?Sized>(&mut self, node: &T) -> Self::Output
    where
        T: Accept<Self>,
    {
        node.accept(self)
    }

    fn visit_roll(&mut self, roll: &ast::DiceRoll) -> Self::Output;

    fn visit_binary(&mut self, l: &ast::Expr, op: &BinaryOperator, r: &ast::Expr) -> Self::Output;
}

pub trait Accept<V: ExprVisitor + ?Sized> {
    fn accept(&self, v: &mut V) -> V::Output;
}

impl<V: ExprVisitor + ?Sized> Accept<V> for ast::DiceRoll {
    fn accept(&self, v: &mut V) -> V::Output {
        v.visit_roll(self)
    }
}

impl<V: ExprVisitor + ?Sized> Accept<V> for ast::Expr {
    fn accept(&self, v: &mut V) -> V::Output {
        match self {
            Self::Roll(x) => v.visit_roll(x),
            Self::Binary(l, op, r) => v.visit_binary(l, op, r),
        }
    }
}
