//! Lexer for inline style declarations using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\x0C]+")]
pub enum Token {
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,

    // Quoted strings may contain separators
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r#"'([^'\\]|\\.)*'"#)]
    String,

    // Only ASCII whitespace separates tokens; other spaces belong to words
    #[regex(r#"[^;:"' \t\n\r\x0C]+"#)]
    Word,
}

/// Lex style source into tokens with spans
///
/// Unrecognized input, such as an unterminated string, is kept as an `Err`
/// item so it can be reported with its position.
pub fn lex(input: &str) -> impl Iterator<Item = (Result<Token, ()>, Span)> + '_ {
    Token::lexer(input).spanned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).filter_map(|(tok, _)| tok.ok()).collect()
    }

    #[test]
    fn test_declaration() {
        assert_eq!(
            tokens("color: red;"),
            vec![Token::Word, Token::Colon, Token::Word, Token::Semicolon]
        );
    }

    #[test]
    fn test_custom_property_and_percentage() {
        let spans: Vec<_> = lex("--bleed-vertical-adjust: 6%").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..23, 23..24, 25..27]);
    }

    #[test]
    fn test_quoted_string_keeps_separators() {
        assert_eq!(
            tokens(r#"content: "a;b""#),
            vec![Token::Word, Token::Colon, Token::String]
        );
    }

    #[test]
    fn test_non_ascii_space_is_part_of_word() {
        assert_eq!(
            lex("color:\u{a0}red").collect::<Vec<_>>(),
            vec![(Ok(Token::Word), 0..5), (Ok(Token::Colon), 5..6), (Ok(Token::Word), 6..11)]
        );
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert!(lex(r#"content: "abc"#).any(|(tok, _)| tok.is_err()));
    }
}
