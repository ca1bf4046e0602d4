pub mod ast;
mod lexer;
mod parser;
pub mod visit;

pub use lexer::TokenKind;
pub use parser::{ParseError, ParseErrorKind, MAX_TERMS};

/// Parses dice notation into an expression tree.
///
/// Whitespace is ignored, operators chain left to right, and a bare integer is a constant.
/// Error spans are byte offsets into `s` itself.
///
/// # Examples
/// ```
/// # use dice_dist::parse;
/// let expr = parse("(2d6 + 1d4) * 2").unwrap();
/// assert_eq!(expr.to_string(), "(2d6+1d4)*2");
/// assert_eq!(expr.outcome_count(), Some(144));
/// ```
pub fn parse(s: &str) -> Result<ast::Expr, ParseError> {
    let (stripped, offsets) = strip_whitespace(s);
    let expr = parser::Parser::new(&stripped)
        .parse()
        .map_err(|err| err.remap(&offsets))?;
    log::debug!("parsed {:?} as {}", s, expr);
    Ok(expr)
}

fn strip_whitespace(s: &str) -> (String, Vec<usize>) {
    let mut stripped = String::with_capacity(s.len());
    let mut offsets = Vec::with_capacity(s.len() + 1);
    for (i, c) in s.char_indices().filter(|(_, c)| !c.is_whitespace()) {
        stripped.push(c);
        offsets.extend(i..i + c.len_utf8());
    }
    offsets.push(s.len());
    (stripped, offsets)
}
