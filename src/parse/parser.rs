use super::{ast::*, lexer::*};
use crate::common::*;
use logos_iter::LogosIter;
use std::fmt;
use std::num::IntErrorKind;
use std::ops::Range;

type PResult<T = Expr> = Result<T, ParseError>;

/// Groups nested deeper than this are rejected instead of recursing further.
const MAX_DEPTH: usize = 128;

/// Upper bound on dice and constants in one expression. Keeps every tree walk shallow.
pub const MAX_TERMS: usize = 1000;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Invalid dice expression at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

impl ParseError {
    /// Moves the span from the stripped input back onto the text the caller passed in.
    /// `offsets[i]` is the source position of stripped byte `i`, with one trailing entry
    /// for the end of the source.
    pub(crate) fn remap(mut self, offsets: &[usize]) -> Self {
        let at = |i: usize| offsets.get(i).copied().unwrap_or_default();
        let start = at(self.span.start.min(offsets.len() - 1));
        let end = match self.span.end.checked_sub(1) {
            Some(last) if self.span.end > self.span.start => at(last) + 1,
            _ => start,
        };
        self.span = start..end;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    Empty,
    UnexpectedToken {
        found: TokenKind,
        expected: Vec<TokenKind>,
    },
    UnexpectedEnd {
        expected: Vec<TokenKind>,
    },
    UnknownCharacter,
    MissingCount,
    Zero,
    TooLarge,
    EmptyGroup,
    TooDeep,
    TooManyTerms,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "expression is empty"),
            Self::UnexpectedToken { found, expected } => {
                write!(f, "unexpected token: found {}, expected ", found)?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedEnd { expected } => {
                write!(f, "unexpected end of input, expected ")?;
                fmt_expected(expected, f)
            }
            Self::UnknownCharacter => write!(f, "unrecognized character"),
            Self::MissingCount => write!(f, "dice must be written as <count>d<sides>"),
            Self::Zero => write!(f, "dice counts, sides and constants must be positive"),
            Self::TooLarge => write!(f, "number is too large"),
            Self::EmptyGroup => write!(f, "parentheses cannot be empty"),
            Self::TooDeep => write!(f, "parentheses nested more than {} deep", MAX_DEPTH),
            Self::TooManyTerms => write!(f, "more than {} dice and constants", MAX_TERMS),
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let len = expected.len();

    if expected.is_empty() {
        Ok(())
    } else if len == 1 {
        f.write_str(expected[0].as_str())
    } else if len == 2 {
        write!(f, "{} or {}", expected[0], expected[1])
    } else {
        for exp in &expected[..len - 1] {
            write!(f, "{}, ", exp)?;
        }
        write!(f, "or {}", expected[len - 1])
    }
}

fn parse_positive(s: &str) -> Result<NonZeroUInt, ParseErrorKind> {
    s.parse::<NonZeroUInt>().map_err(|e| match e.kind() {
        IntErrorKind::Zero => ParseErrorKind::Zero,
        IntErrorKind::PosOverflow => ParseErrorKind::TooLarge,
        _ => ParseErrorKind::UnknownCharacter,
    })
}

fn parse_dice(s: &str) -> Result<DiceRoll, ParseErrorKind> {
    let (count, sides) = s.split_once('d').ok_or(ParseErrorKind::MissingCount)?;
    Ok(DiceRoll::new(parse_positive(count)?, parse_positive(sides)?))
}

/// Reads operators strictly left to right: `1+2*3` is `(1+2)*3`.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    depth: usize,
    terms: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            lexer: lexer(s),
            depth: 0,
            terms: 0,
        }
    }

    pub fn parse(mut self) -> PResult {
        if self.lexer.peek().is_none() {
            return self.error(ParseErrorKind::Empty);
        }

        let expr = self.parse_chain()?;
        if self.lexer.peek().is_some() {
            return self.unexpected_token(TokenKind::BINARY_OPS.to_vec());
        }
        Ok(expr)
    }

    fn peek(&mut self) -> Option<TokenKind> {
        self.lexer.peek().copied()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.peek().map_or(false, |peeked| peeked == kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.peek().map_or(false, |peeked| options.contains(&peeked))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.lexer.next();
            Ok(())
        } else {
            self.unexpected_token(vec![expected])
        }
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        })
    }

    fn unexpected_token<T>(&mut self, expected: Vec<TokenKind>) -> PResult<T> {
        match self.lexer.next() {
            None => self.error(ParseErrorKind::UnexpectedEnd { expected }),
            Some(TokenKind::Error) => self.error(ParseErrorKind::UnknownCharacter),
            Some(TokenKind::ErrMissingCount) => self.error(ParseErrorKind::MissingCount),
            Some(found) => self.error(ParseErrorKind::UnexpectedToken { found, expected }),
        }
    }

    fn parse_chain(&mut self) -> PResult {
        let mut lhs = self.parse_atom()?;

        while self.matches_any(TokenKind::BINARY_OPS) {
            let op = self.lexer.next().and_then(|t| t.as_binary_op());
            let Some(op) = op else {
                return self.unexpected_token(TokenKind::BINARY_OPS.to_vec());
            };
            let rhs = self.parse_atom()?;

            lhs = Expr::new_binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_atom(&mut self) -> PResult {
        match self.peek() {
            Some(TokenKind::LeftParen) => self.parse_group(),
            Some(TokenKind::Integer) => {
                self.count_term()?;
                self.parse_integer()
            }
            Some(TokenKind::Dice) => {
                self.count_term()?;
                self.parse_dice()
            }
            _ => self.unexpected_token(TokenKind::ATOMS.to_vec()),
        }
    }

    fn count_term(&mut self) -> PResult<()> {
        self.terms += 1;
        if self.terms > MAX_TERMS {
            self.lexer.next();
            self.error(ParseErrorKind::TooManyTerms)
        } else {
            Ok(())
        }
    }

    // `(...)` is an implicit `1d(...)`: a single roll of the nested expression.
    fn parse_group(&mut self) -> PResult {
        self.consume(TokenKind::LeftParen)?;
        if self.depth >= MAX_DEPTH {
            return self.error(ParseErrorKind::TooDeep);
        }
        if self.matches(TokenKind::RightParen) {
            self.lexer.next();
            return self.error(ParseErrorKind::EmptyGroup);
        }

        self.depth += 1;
        let inner = self.parse_chain()?;
        self.depth -= 1;

        if self.matches(TokenKind::RightParen) {
            self.lexer.next();
            Ok(inner)
        } else {
            let mut expected = TokenKind::BINARY_OPS.to_vec();
            expected.push(TokenKind::RightParen);
            self.unexpected_token(expected)
        }
    }

    fn parse_integer(&mut self) -> PResult {
        self.consume(TokenKind::Integer)?;
        match parse_positive(self.lexer.slice()) {
            Ok(value) => Ok(Expr::Roll(DiceRoll::constant(value))),
            Err(kind) => self.error(kind),
        }
    }

    fn parse_dice(&mut self) -> PResult {
        self.consume(TokenKind::Dice)?;
        match parse_dice(self.lexer.slice()) {
            Ok(roll) => Ok(Expr::Roll(roll)),
            Err(kind) => self.error(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! dice {
        ($count:literal, $sides:literal) => {
            Expr::new_roll(
                NonZeroUInt::new($count).unwrap(),
                NonZeroUInt::new($sides).unwrap(),
            )
        };
        ($value:literal) => {
            dice!($value, 1)
        };
    }

    fn parse(s: &str) -> PResult {
        Parser::new(s).parse()
    }

    fn check(s: &str, expected: Expr) {
        assert_eq!(parse(s).unwrap(), expected);
    }

    fn check_err(s: &str, expected: ParseErrorKind) {
        assert_eq!(parse(s).unwrap_err().kind, expected);
    }

    #[test]
    fn test_parse_terms() {
        check("1d20", dice!(1, 20));
        check("14d4", dice!(14, 4));
        check("5", dice!(5));
        check("5d1", dice!(5));
    }

    #[test]
    fn test_parse_left_to_right() {
        check(
            "1d6+2d4",
            Expr::new_binary(BinaryOperator::Add, dice!(1, 6), dice!(2, 4)),
        );
        check(
            "1+2*3",
            Expr::new_binary(
                BinaryOperator::Mul,
                Expr::new_binary(BinaryOperator::Add, dice!(1), dice!(2)),
                dice!(3),
            ),
        );
        check(
            "8/2-1d4",
            Expr::new_binary(
                BinaryOperator::Sub,
                Expr::new_binary(BinaryOperator::Div, dice!(8), dice!(2)),
                dice!(1, 4),
            ),
        );
    }

    #[test]
    fn test_parse_groups() {
        check(
            "(2d6+1d4)*2",
            Expr::new_binary(
                BinaryOperator::Mul,
                Expr::new_binary(BinaryOperator::Add, dice!(2, 6), dice!(1, 4)),
                dice!(2),
            ),
        );
        check(
            "1+(2*3)",
            Expr::new_binary(
                BinaryOperator::Add,
                dice!(1),
                Expr::new_binary(BinaryOperator::Mul, dice!(2), dice!(3)),
            ),
        );
        check("((1d8))", dice!(1, 8));
    }

    #[test]
    fn test_parse_errors() {
        use TokenKind::*;

        check_err("", ParseErrorKind::Empty);
        check_err("d6", ParseErrorKind::MissingCount);
        check_err("1x6", ParseErrorKind::UnknownCharacter);
        check_err("0d6", ParseErrorKind::Zero);
        check_err("2d0", ParseErrorKind::Zero);
        check_err("0", ParseErrorKind::Zero);
        check_err("99999999999", ParseErrorKind::TooLarge);
        check_err("()", ParseErrorKind::EmptyGroup);
        check_err(
            "1d6+",
            ParseErrorKind::UnexpectedEnd {
                expected: vec![Integer, Dice, LeftParen],
            },
        );
        check_err(
            "1d6+*2",
            ParseErrorKind::UnexpectedToken {
                found: Star,
                expected: vec![Integer, Dice, LeftParen],
            },
        );
        check_err(
            "(1d6",
            ParseErrorKind::UnexpectedEnd {
                expected: vec![Plus, Minus, Star, Slash, RightParen],
            },
        );
        check_err(
            "1d6)",
            ParseErrorKind::UnexpectedToken {
                found: RightParen,
                expected: vec![Plus, Minus, Star, Slash],
            },
        );
    }

    #[test]
    fn test_parse_too_deep() {
        let s = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        check_err(&s, ParseErrorKind::TooDeep);

        let s = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        check(&s, dice!(1));
    }

    #[test]
    fn test_parse_too_many_terms() {
        let s = vec!["1"; MAX_TERMS].join("+");
        assert!(parse(&s).is_ok());

        let s = vec!["1d2"; MAX_TERMS / 2 + 1].join("-1+");
        check_err(&s, ParseErrorKind::TooManyTerms);

        let s = format!("({})*2", vec!["1"; MAX_TERMS].join("+"));
        check_err(&s, ParseErrorKind::TooManyTerms);

        check_err(&vec!["1d2"; 10_000].join("-1+"), ParseErrorKind::TooManyTerms);
        check_err(&vec!["1"; 200_000].join("+"), ParseErrorKind::TooManyTerms);
    }

    #[test]
    fn test_error_message() {
        let err = parse("1x6").unwrap_err();
        assert!(err.to_string().starts_with("Invalid dice expression"));
        assert_eq!(err.span.start, 1);
    }
}
