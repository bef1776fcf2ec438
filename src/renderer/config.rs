//! Output options for rendered heading SVGs

/// Spaces per nesting level in pretty-printed output
pub const DEFAULT_INDENT: usize = 2;

/// How [`render_svg`](super::render_svg) lays out its markup
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Emit the `<?xml ...?>` declaration a standalone `.svg` file needs
    pub standalone: bool,
    /// Spaces per nesting level; `None` writes the document on one line
    pub indent: Option<usize>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            indent: Some(DEFAULT_INDENT),
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup meant to be inlined into HTML, without the XML declaration
    pub fn fragment(mut self) -> Self {
        self.standalone = false;
        self
    }

    /// Everything on a single line, e.g. for data URIs
    pub fn compact(mut self) -> Self {
        self.indent = None;
        self
    }

    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.indent.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standalone_and_indented() {
        let config = SvgConfig::default();
        assert!(config.standalone);
        assert_eq!(config.indent, Some(2));
        assert!(config.is_pretty());
    }

    #[test]
    fn test_inline_fragment() {
        let config = SvgConfig::new().fragment().compact();
        assert!(!config.standalone);
        assert!(!config.is_pretty());
    }

    #[test]
    fn test_indent_width() {
        assert_eq!(SvgConfig::new().compact().with_indent(4).indent, Some(4));
    }
}
