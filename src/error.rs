//! Errors for inline style declarations

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::style::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("style error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    /// A style given as a mapping holds another mapping instead of a value
    #[error("style property '{property}' must have a text value")]
    NestedValue { property: String },
}

impl StyleParseError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (span, message, expected) = match self {
            StyleParseError::Syntax {
                span,
                message,
                expected,
            } => (span.clone(), message.clone(), expected.as_slice()),
            // Mapping styles have no source text to point into
            StyleParseError::NestedValue { .. } => return format!("Error: {}\n", self),
        };

        let expected_str = if expected.is_empty() {
            String::new()
        } else {
            format!("\nExpected: {}", expected.join(", "))
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(format!("{}{}", message, expected_str))
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for StyleParseError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::{RichPattern, RichReason};

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found {
                Some(tok) => format!("Unexpected {}", format_token(tok)),
                None => "Unexpected end of input".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                RichPattern::Token(tok) => Some(format_token(tok)),
                RichPattern::Label(label) => Some(label.to_string()),
                RichPattern::EndOfInput => Some("end of input".to_string()),
                RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                RichPattern::Any => Some("any token".to_string()),
                RichPattern::SomethingElse => None,
            })
            .collect();

        StyleParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Semicolon => "';'".to_string(),
        Token::Colon => "':'".to_string(),
        Token::String => "quoted string".to_string(),
        Token::Word => "word".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_points_at_span() {
        let err = StyleParseError::Syntax {
            span: 6..9,
            message: "Unexpected word".to_string(),
            expected: vec!["':'".to_string()],
        };
        let report = err.format("color red", "style");
        assert!(report.contains("Unexpected word"));
        assert!(report.contains("style"));
    }

    #[test]
    fn test_nested_value_message() {
        let err = StyleParseError::NestedValue {
            property: "fill".to_string(),
        };
        assert_eq!(err.to_string(), "style property 'fill' must have a text value");
        assert_eq!(
            err.format("", "style"),
            "Error: style property 'fill' must have a text value\n"
        );
    }
}
