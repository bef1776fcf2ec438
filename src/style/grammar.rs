//! Parser for inline style declarations using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::StyleParseError;

use super::lexer::{Span, Token};

/// Byte ranges of one `property: value` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: Span,
    pub value: Span,
}

/// Parse lexed style tokens into declarations
pub fn parse(
    input: &str,
    tokens: Vec<(Token, Span)>,
) -> Result<Vec<Declaration>, Vec<StyleParseError>> {
    let len = input.len();

    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    style_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> Span {
    e.start()..e.end()
}

fn style_parser<'a, I>() -> impl Parser<'a, I, Vec<Declaration>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let property = just(Token::Word)
        .map_with(|_, e| span_range(&e.span()))
        .labelled("property name");

    // Values run up to the next semicolon and may contain colons
    let value = any()
        .filter(|tok: &Token| *tok != Token::Semicolon)
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .map_with(|_, e| span_range(&e.span()))
        .labelled("value");

    let declaration = property
        .then_ignore(just(Token::Colon))
        .then(value)
        .map(|(property, value)| Declaration { property, value });

    // Stray semicolons between declarations are ignored
    let item = declaration
        .map(Some)
        .or(just(Token::Semicolon).to(None));

    item.repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|items: Vec<Option<Declaration>>| items.into_iter().flatten().collect())
}
