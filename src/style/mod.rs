//! Inline `style` attribute handling
//!
//! Styles are parsed into an ordered property map so single properties can be
//! added or replaced, then written back as `prop: value;` declarations.

pub mod grammar;
pub mod lexer;

use indexmap::IndexMap;

use crate::error::StyleParseError;

/// Ordered mapping from CSS property name to value
pub type StyleMap = IndexMap<String, String>;

/// Parse an inline style attribute into an ordered property map
///
/// Later declarations of the same property replace the value but keep the
/// position of the first one.
pub fn parse_style_attribute(raw: &str) -> Result<StyleMap, StyleParseError> {
    let mut tokens = Vec::new();
    for (tok, span) in lexer::lex(raw) {
        match tok {
            Ok(tok) => tokens.push((tok, span)),
            Err(()) => {
                let message = if raw[span.clone()].starts_with(['"', '\'']) {
                    "Unterminated string"
                } else {
                    "Unexpected input"
                };
                return Err(StyleParseError::Syntax {
                    span,
                    message: message.to_string(),
                    expected: vec![],
                });
            }
        }
    }

    let declarations = grammar::parse(raw, tokens).map_err(|mut errs| errs.remove(0))?;

    let mut style = StyleMap::new();
    for decl in declarations {
        style.insert(
            raw[decl.property].trim().to_string(),
            raw[decl.value].trim().to_string(),
        );
    }
    Ok(style)
}

/// Serialize a property map as `prop: value;` declarations joined by spaces
pub fn serialize_style_array(style: &StyleMap) -> String {
    style
        .iter()
        .map(|(property, value)| format!("{}: {};", property, value))
        .collect::<Vec<_>>()
        .join(" ")
}
