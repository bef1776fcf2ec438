//! Heading SVG - render heading text as standalone SVG outlines
//!
//! This library converts short runs of heading text into SVG documents in
//! which every glyph is a filled `<path>`, plus a decorative "bleed"
//! rectangle that stylesheets can paint under the text. Fonts come from the
//! active theme as SVG font files.
//!
//! # Example
//!
//! ```rust,no_run
//! use heading_svg::{render_svg, Attributes, HeadingConfig, HeadingTextToSvg, StaticTheme};
//!
//! let generator = HeadingTextToSvg::new(StaticTheme::new("themes/site"), HeadingConfig::default());
//! let doc = generator
//!     .generate("Hello", Attributes::new().with("class", "title"))
//!     .unwrap();
//! let svg = render_svg(&doc, &generator.config().svg);
//! assert!(svg.contains("<svg"));
//! ```

pub mod attributes;
pub mod calibration;
pub mod document;
pub mod error;
pub mod font;
pub mod geometry;
pub mod number;
pub mod outline;
pub mod path;
pub mod renderer;
pub mod style;
pub mod theme;

pub use attributes::{compose_attributes, merge_deep, AttributeValue, Attributes};
pub use calibration::{Calibration, CalibrationError, CalibrationTable};
pub use document::{assemble, SvgDocument, SvgPath};
pub use error::StyleParseError;
pub use font::{load_font, CachingFontLoader, FontHandle, FontLoadError, FontLoader, FsFontLoader};
pub use geometry::{correct, synthesize_bleed, BleedGeometry, CorrectedGeometry, TextMetrics};
pub use outline::{GlyphConversionError, GlyphOutliner};
pub use path::{PathData, PathError};
pub use renderer::{render_svg, to_data_uri, SvgConfig};
pub use style::{parse_style_attribute, serialize_style_array, StyleMap};
pub use theme::{ActiveTheme, StaticTheme, ThemeManager, DEFAULT_FONT_PATH};

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during the generate pipeline
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The theme font could not be loaded
    #[error("font error: {0}")]
    FontLoad(#[from] FontLoadError),

    /// Text could not be converted to outlines
    #[error("glyph conversion error: {0}")]
    GlyphConversion(#[from] GlyphConversionError),

    /// The caller's style attribute is malformed
    #[error("invalid style: {0}")]
    StyleParse(#[from] StyleParseError),

    /// No correction constants were measured for this font and size
    #[error("no calibration for font '{font}' at size {size}")]
    Uncalibrated { font: String, size: f64 },
}

/// Configuration for the complete generate pipeline
#[derive(Debug, Clone)]
pub struct HeadingConfig {
    /// Font resource, relative to the active theme directory
    pub font_path: PathBuf,
    /// Rendering size in font-size units
    pub font_size: f64,
    /// Extra letter spacing, in multiples of the font's `m` advance
    pub letter_spacing: f64,
    /// Line height as a multiple of the line box
    pub line_height: f64,
    /// Correction constants per font and size
    pub calibrations: CalibrationTable,
    /// SVG output configuration
    pub svg: SvgConfig,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            font_size: 100.0,
            letter_spacing: 0.0,
            line_height: 1.0,
            calibrations: CalibrationTable::default(),
            svg: SvgConfig::default(),
        }
    }
}

impl HeadingConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font resource path, relative to the theme
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = path.into();
        self
    }

    /// Set the rendering size
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Set the letter spacing
    pub fn with_letter_spacing(mut self, letter_spacing: f64) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    /// Set the line height
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    /// Replace the calibration table
    pub fn with_calibrations(mut self, calibrations: CalibrationTable) -> Self {
        self.calibrations = calibrations;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }
}

/// Run the pipeline on an already loaded outliner
///
/// Outlines and metrics come from `outliner`; `calibration` must be the one
/// measured for the outliner's font and size.
pub fn generate_with<O: GlyphOutliner + ?Sized>(
    outliner: &O,
    calibration: &Calibration,
    text: &str,
    attributes: Attributes,
) -> Result<SvgDocument, GenerateError> {
    let raw = outliner.to_path_data(text)?;
    let metrics = outliner.measure(text)?;

    let corrected = correct(&raw, metrics, calibration);
    let bleed = synthesize_bleed(corrected.width, corrected.height, calibration);
    let attributes = compose_attributes(corrected.width, corrected.height, calibration, attributes)?;

    debug!(
        width = corrected.width,
        height = corrected.rendered_height(calibration),
        "assembled heading document"
    );
    Ok(assemble(&corrected.path, &bleed, attributes))
}

/// Converts heading text to SVG using the active theme's font
pub struct HeadingTextToSvg<T, L = CachingFontLoader> {
    theme: T,
    loader: L,
    config: HeadingConfig,
}

impl<T: ThemeManager> HeadingTextToSvg<T, CachingFontLoader> {
    /// Create a generator that parses each font once
    pub fn new(theme: T, config: HeadingConfig) -> Self {
        Self::with_loader(theme, CachingFontLoader::new(), config)
    }
}

impl<T: ThemeManager, L: FontLoader> HeadingTextToSvg<T, L> {
    /// Create a generator with a specific font loader
    pub fn with_loader(theme: T, loader: L, config: HeadingConfig) -> Self {
        Self {
            theme,
            loader,
            config,
        }
    }

    pub fn config(&self) -> &HeadingConfig {
        &self.config
    }

    /// Location of the configured font inside the active theme
    pub fn font_path(&self) -> PathBuf {
        self.theme.active_theme().resource(&self.config.font_path)
    }

    /// Load the configured font at the configured size
    pub fn load_font(&self) -> Result<FontHandle, FontLoadError> {
        let handle = self.loader.load(&self.font_path(), self.config.font_size)?;
        Ok(handle
            .with_letter_spacing(self.config.letter_spacing)
            .with_line_height(self.config.line_height))
    }

    /// Convert `text` to an SVG document with `attributes` merged onto the root
    pub fn generate(&self, text: &str, attributes: Attributes) -> Result<SvgDocument, GenerateError> {
        let font = self.load_font()?;
        let calibration = self
            .config
            .calibrations
            .lookup(font.font_id(), font.size())
            .ok_or_else(|| GenerateError::Uncalibrated {
                font: font.font_id().to_string(),
                size: font.size(),
            })?;

        info!(
            theme = %self.theme.active_theme().name,
            font = font.font_id(),
            size = font.size(),
            "generating heading SVG"
        );
        generate_with(&font, calibration, text, attributes)
    }

    /// Convert `text` straight to SVG markup
    pub fn render(&self, text: &str, attributes: Attributes) -> Result<String, GenerateError> {
        let doc = self.generate(text, attributes)?;
        Ok(render_svg(&doc, &self.config.svg))
    }
}
