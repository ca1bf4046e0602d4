use crate::common::BinaryOperator;
use crate::parse::ast::{DiceRoll, Expr};
use crate::parse::visit::{Accept, ExprVisitor};
use std::fmt;

pub trait Stringify {
    fn separator(&self) -> &'static str {
        ""
    }

    fn str_roll(&mut self, roll: &DiceRoll) -> String {
        if roll.is_constant() {
            roll.count.to_string()
        } else {
            format!("{}d{}", roll.count, roll.sides)
        }
    }

    /// `l_nested` and `r_nested` mark operands that must be wrapped in parentheses.
    fn str_binary(
        &mut self,
        l: String,
        op: &BinaryOperator,
        r: String,
        l_nested: bool,
        r_nested: bool,
    ) -> String {
        let sep = self.separator();
        let l = if l_nested { format!("({l})") } else { l };
        let r = if r_nested { format!("({r})") } else { r };
        format!("{l}{sep}{op}{sep}{r}")
    }
}

/// Renders an expression in the compact notation the parser reads, e.g. `(2d6+1d4)*2`.
#[derive(Debug, Default, Copy, Clone)]
pub struct SimpleStringifier;

impl Stringify for SimpleStringifier {}

/// Same as [SimpleStringifier] but with spaces around operators.
#[derive(Debug, Default, Copy, Clone)]
pub struct SpacedStringifier;

impl Stringify for SpacedStringifier {
    fn separator(&self) -> &'static str {
        " "
    }
}

struct StringifyVisitor<'s, S: ?Sized>(&'s mut S);

impl<S: Stringify + ?Sized> ExprVisitor for StringifyVisitor<'_, S> {
    type Output = String;

    fn visit_roll(&mut self, roll: &DiceRoll) -> String {
        self.0.str_roll(roll)
    }

    // A binary right operand always needs parentheses to reparse. A `+`/`-` left operand
    // of `*` or `/` gets them too, so conventional precedence reads the same tree.
    fn visit_binary(&mut self, l: &Expr, op: &BinaryOperator, r: &Expr) -> String {
        use BinaryOperator::*;

        let l_nested = matches!(op, Mul | Div) && matches!(l, Expr::Binary(_, Add | Sub, _));
        let r_nested = matches!(r, Expr::Binary(..));
        let l_str = l.accept(self);
        let r_str = r.accept(self);
        self.0.str_binary(l_str, op, r_str, l_nested, r_nested)
    }
}

pub fn stringify<S: Stringify + ?Sized>(stringifier: &mut S, expr: &Expr) -> String {
    StringifyVisitor(stringifier).visit(expr)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&stringify(&mut SimpleStringifier, self))
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SimpleStringifier.str_roll(self))
    }
}
