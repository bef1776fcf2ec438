//! SVG generation from assembled documents

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::warn;

use crate::attributes::{AttributeValue, Attributes};
use crate::document::{SvgDocument, SvgPath};

use super::SvgConfig;

/// Build SVG markup incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    root: Vec<(String, String)>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            root: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    fn indent_str(&self) -> String {
        match self.config.indent {
            Some(width) => " ".repeat(width * self.indent),
            None => String::new(),
        }
    }

    fn newline(&self) -> &str {
        if self.config.is_pretty() {
            "\n"
        } else {
            ""
        }
    }

    /// Add attributes to the root element
    ///
    /// Nested mappings are flattened into hyphenated names, so
    /// `data: { theme: dark }` becomes `data-theme="dark"`. Names that are
    /// not valid XML names are dropped.
    pub fn add_root_attributes(&mut self, attributes: &Attributes) {
        let mut flat = Vec::new();
        flatten_attributes(None, attributes, &mut flat);
        for (name, value) in flat {
            if is_xml_name(&name) {
                self.root.push((name, value));
            } else {
                warn!(attribute = %name, "skipping attribute with invalid name");
            }
        }
    }

    /// Add a path element
    pub fn add_path(&mut self, path: &SvgPath) {
        let class_attr = path
            .class
            .as_deref()
            .map(|c| format!(r#" class="{}""#, escape_xml(c)))
            .unwrap_or_default();

        self.elements.push(format!(
            r#"{}<path{} d="{}"/>"#,
            self.indent_str(),
            class_attr,
            escape_xml(&path.d)
        ));
    }

    /// Build the final SVG string
    pub fn build(self) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        for (name, value) in &self.root {
            svg.push_str(&format!(r#" {}="{}""#, name, escape_xml(value)));
        }
        svg.push('>');
        svg.push_str(nl);

        for element in &self.elements {
            svg.push_str(element);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg.push_str(nl);
        svg
    }
}

fn flatten_attributes(prefix: Option<&str>, attributes: &Attributes, out: &mut Vec<(String, String)>) {
    for (name, value) in attributes.iter() {
        let name = match prefix {
            Some(prefix) => format!("{}-{}", prefix, name),
            None => name.to_string(),
        };
        match value {
            AttributeValue::Text(text) => out.push((name, text.clone())),
            AttributeValue::Map(nested) => flatten_attributes(Some(name.as_str()), nested, out),
        }
    }
}

/// Whether `name` can be written as an XML attribute name
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

/// Render a document to SVG markup
pub fn render_svg(document: &SvgDocument, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_root_attributes(document.attributes());
    for path in document.paths() {
        builder.add_path(path);
    }
    builder.build()
}

/// Render a document as a base64 `data:` URI
pub fn to_data_uri(document: &SvgDocument, config: &SvgConfig) -> String {
    let svg = render_svg(document, config);
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
