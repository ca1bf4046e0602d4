use crate::common::*;

/// `count` independent dice with faces `1..=sides`, summed.
///
/// A single-sided roll is a constant: `5` parses to `5d1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DiceRoll {
    pub count: NonZeroUInt,
    pub sides: NonZeroUInt,
}

impl DiceRoll {
    pub const fn new(count: NonZeroUInt, sides: NonZeroUInt) -> Self {
        Self { count, sides }
    }

    pub const fn constant(value: NonZeroUInt) -> Self {
        Self::new(value, NonZeroUInt::MIN)
    }

    pub const fn is_constant(&self) -> bool {
        self.sides.get() == 1
    }

    pub fn min(&self) -> Float {
        self.count.get() as Float
    }

    pub fn max(&self) -> Float {
        self.count.get() as Float * self.sides.get() as Float
    }

    /// `sides^count`, or `None` if it does not fit in a `usize`.
    pub fn outcome_count(&self) -> Option<usize> {
        let sides = usize::try_from(self.sides.get()).ok()?;
        sides.checked_pow(self.count.get())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Roll(DiceRoll),
    Binary(Box<Expr>, BinaryOperator, Box<Expr>),
}

impl Expr {
    pub fn new_roll(count: NonZeroUInt, sides: NonZeroUInt) -> Self {
        Self::Roll(DiceRoll::new(count, sides))
    }

    pub fn new_binary(op: BinaryOperator, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary(Box::new(lhs), op, Box::new(rhs))
    }

    /// Length of the exact outcome sequence: the product of `sides^count` over every leaf.
    pub fn outcome_count(&self) -> Option<usize> {
        match self {
            Self::Roll(roll) => roll.outcome_count(),
            Self::Binary(l, _, r) => l.outcome_count()?.checked_mul(r.outcome_count()?),
        }
    }

    /// The smallest and largest value the expression can take.
    ///
    /// A divisor whose range contains zero makes both ends unbounded.
    pub fn bounds(&self) -> (Float, Float) {
        match self {
            Self::Roll(roll) => (roll.min(), roll.max()),
            Self::Binary(l, op, r) => {
                let (a, b) = l.bounds();
                let (c, d) = r.bounds();
                match op {
                    BinaryOperator::Add => (a + c, b + d),
                    BinaryOperator::Sub => (a - d, b - c),
                    BinaryOperator::Div if c <= 0.0 && d >= 0.0 => {
                        (Float::NEG_INFINITY, Float::INFINITY)
                    }
                    _ => {
                        let corners = [op.apply(a, c), op.apply(a, d), op.apply(b, c), op.apply(b, d)];
                        corners
                            .iter()
                            .fold((Float::INFINITY, Float::NEG_INFINITY), |(lo, hi), &x| {
                                (lo.min(x), hi.max(x))
                            })
                    }
                }
            }
        }
    }
}
