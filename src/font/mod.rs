//! Font loading
//!
//! Fonts are SVG font documents read from the active theme. A loaded font is
//! paired with the size it will be rendered at in a [`FontHandle`], which is
//! immutable and cheap to clone, so a parsed font can be shared between
//! callers through [`CachingFontLoader`].

pub mod svg_font;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info};

pub use svg_font::{Glyph, SvgFont};

/// Errors that can occur while loading a font resource
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// The font file is missing or unreadable
    #[error("failed to read font '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The font document is not well-formed XML
    #[error("malformed font document at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// No `<font-face>` element, so there are no metrics
    #[error("font document has no <font-face> element")]
    MissingFontFace,

    /// A metric attribute that is not a number
    #[error("invalid value '{value}' for font metric '{name}'")]
    InvalidMetric { name: &'static str, value: String },

    /// The font defines no glyphs at all
    #[error("font document defines no glyphs")]
    NoGlyphs,
}

/// A loaded font at a fixed rendering size
#[derive(Debug, Clone)]
pub struct FontHandle {
    font: Arc<SvgFont>,
    size: f64,
    letter_spacing: f64,
    line_height: f64,
}

impl FontHandle {
    pub fn new(font: Arc<SvgFont>, size: f64) -> Self {
        Self {
            font,
            size,
            letter_spacing: 0.0,
            line_height: 1.0,
        }
    }

    /// Set extra spacing between letters, in multiples of the font's `m` advance
    pub fn with_letter_spacing(mut self, letter_spacing: f64) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    /// Set the distance between lines, as a multiple of the line box
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn font(&self) -> &SvgFont {
        &self.font
    }

    /// Identifier used to look up calibrations
    pub fn font_id(&self) -> &str {
        &self.font.id
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn letter_spacing(&self) -> f64 {
        self.letter_spacing
    }

    pub fn line_height(&self) -> f64 {
        self.line_height
    }
}

/// Load an SVG font from disk at the given size
pub fn load_font(path: &Path, size: f64) -> Result<FontHandle, FontLoadError> {
    let font = read_svg_font(path)?;
    Ok(FontHandle::new(Arc::new(font), size))
}

fn read_svg_font(path: &Path) -> Result<SvgFont, FontLoadError> {
    let source = std::fs::read_to_string(path).map_err(|source| FontLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let fallback_id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("font");

    let font = SvgFont::parse(&source, fallback_id)?;
    info!(
        path = %path.display(),
        font = %font.id,
        glyphs = font.glyph_count(),
        "loaded SVG font"
    );
    Ok(font)
}

/// Source of font handles
pub trait FontLoader {
    fn load(&self, path: &Path, size: f64) -> Result<FontHandle, FontLoadError>;
}

/// Reads and parses the font file on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFontLoader;

impl FontLoader for FsFontLoader {
    fn load(&self, path: &Path, size: f64) -> Result<FontHandle, FontLoadError> {
        load_font(path, size)
    }
}

/// Parses each font file once and shares it between callers
///
/// Fonts are keyed by path; the size is applied per handle. Failed loads are
/// not cached.
#[derive(Debug, Default)]
pub struct CachingFontLoader {
    fonts: RwLock<HashMap<PathBuf, Arc<SvgFont>>>,
}

impl CachingFontLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fonts currently cached
    pub fn len(&self) -> usize {
        self.fonts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FontLoader for CachingFontLoader {
    fn load(&self, path: &Path, size: f64) -> Result<FontHandle, FontLoadError> {
        let cached = self.fonts.read().get(path).cloned();
        if let Some(font) = cached {
            debug!(path = %path.display(), "font cache hit");
            return Ok(FontHandle::new(font, size));
        }

        let font = Arc::new(read_svg_font(path)?);
        let font = self
            .fonts
            .write()
            .entry(path.to_path_buf())
            .or_insert(font)
            .clone();
        Ok(FontHandle::new(font, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_font() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/theme/fonts/furore/furore.svg")
    }

    #[test]
    fn test_load_font() {
        let handle = load_font(&fixture_font(), 100.0).unwrap();
        assert_eq!(handle.font_id(), "furore");
        assert_eq!(handle.size(), 100.0);
        assert_eq!(handle.letter_spacing(), 0.0);
        assert_eq!(handle.line_height(), 1.0);
    }

    #[test]
    fn test_missing_file() {
        let err = load_font(Path::new("does/not/exist.svg"), 100.0).unwrap_err();
        match err {
            FontLoadError::Io { path, .. } => assert_eq!(path, Path::new("does/not/exist.svg")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_caching_loader_shares_parsed_font() {
        let loader = CachingFontLoader::new();
        assert!(loader.is_empty());

        let a = loader.load(&fixture_font(), 100.0).unwrap();
        let b = loader.load(&fixture_font(), 50.0).unwrap();
        assert_eq!(loader.len(), 1);
        assert!(std::ptr::eq(a.font(), b.font()));
        assert_eq!(b.size(), 50.0);
    }

    #[test]
    fn test_caching_loader_does_not_cache_failures() {
        let loader = CachingFontLoader::new();
        assert!(loader.load(Path::new("missing.svg"), 100.0).is_err());
        assert!(loader.is_empty());
    }

    #[test]
    fn test_caching_loader_concurrent_loads() {
        let loader = Arc::new(CachingFontLoader::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let loader = Arc::clone(&loader);
                std::thread::spawn(move || loader.load(&fixture_font(), 10.0 * (i + 1) as f64).unwrap())
            })
            .collect();

        let fonts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(loader.len(), 1);
        assert!(fonts.iter().all(|f| f.font_id() == "furore"));
        assert_eq!(fonts[7].size(), 80.0);
    }

    #[test]
    fn test_handle_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FontHandle>();
        assert_send_sync::<CachingFontLoader>();
    }
}
