//! Lexer for SVG path data using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\x0C,]+")]
pub enum Token {
    #[regex(r"[MmLlHhVvCcSsQqTtAaZz]", |lex| lex.slice().chars().next())]
    Command(char),

    #[regex(r"[-+]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][-+]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
}

/// Lex path data into tokens with spans
///
/// Unlike the style lexer, unrecognized input is kept as an `Err` item so
/// the parser can report where the path data went wrong.
pub fn lex(input: &str) -> impl Iterator<Item = (Result<Token, ()>, Span)> + '_ {
    Token::lexer(input).spanned()
}
