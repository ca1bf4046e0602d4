use crate::common::BinaryOperator;
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub(crate) type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub(crate) fn lexer(s: &str) -> Lexer<'_> {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]+d[0-9]+")]
    Dice,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[regex(r"d[0-9]*")]
    ErrMissingCount,

    #[error]
    Error,
}

impl TokenKind {
    pub const BINARY_OPS: &'static [Self] = &[Self::Plus, Self::Minus, Self::Star, Self::Slash];

    pub const ATOMS: &'static [Self] = &[Self::Integer, Self::Dice, Self::LeftParen];

    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer => "<integer>",
            Dice => "<dice>",
            LeftParen => "'('",
            RightParen => "')'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            ErrMissingCount | Error => "<error>",
        }
    }

    pub fn as_binary_op(&self) -> Option<BinaryOperator> {
        use BinaryOperator::*;
        Some(match self {
            Self::Plus => Add,
            Self::Minus => Sub,
            Self::Star => Mul,
            Self::Slash => Div,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(s: &str, expected: &[TokenKind]) {
        let actual: Vec<_> = TokenKind::lexer(s).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_lex_terms() {
        use TokenKind::*;
        check("2d6", &[Dice]);
        check("12", &[Integer]);
        check("2d6+1d4", &[Dice, Plus, Dice]);
        check("(2d6+1d4)*2", &[LeftParen, Dice, Plus, Dice, RightParen, Star, Integer]);
        check("10/3-1", &[Integer, Slash, Integer, Minus, Integer]);
    }

    #[test]
    fn test_lex_errors() {
        use TokenKind::*;
        check("d6", &[ErrMissingCount]);
        check("d", &[ErrMissingCount]);
    }
}
