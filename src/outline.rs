//! Glyph outline conversion
//!
//! [`GlyphOutliner`] is the seam between the geometry pipeline and whatever
//! turns text into outlines. [`FontHandle`] implements it for SVG fonts; tests
//! use fakes that return fixed path data and metrics.

use thiserror::Error;
use tracing::debug;

use crate::font::{FontHandle, Glyph};
use crate::geometry::TextMetrics;
use crate::path::{PathData, PathError, Transform};

/// Path data for a run of text, before any calibration
pub type RawGlyphPathData = PathData;

/// Text box for a run of text, before any calibration
pub type RawTextMetrics = TextMetrics;

/// Errors that can occur while converting text to outlines
#[derive(Debug, Error)]
pub enum GlyphConversionError {
    /// The font's units-per-em cannot be used to scale outlines
    #[error("font '{font}' has unusable units-per-em {units_per_em}")]
    DegenerateFont { font: String, units_per_em: f64 },

    /// A glyph's path data could not be parsed
    #[error("outline for glyph {glyph:?} is malformed: {source}")]
    MalformedPath {
        glyph: char,
        #[source]
        source: PathError,
    },
}

/// Converts text to outlines and measures it
pub trait GlyphOutliner {
    /// Path data for `text`, laid out on a single baseline per line
    fn to_path_data(&self, text: &str) -> Result<RawGlyphPathData, GlyphConversionError>;

    /// Bounding box of `text`
    fn measure(&self, text: &str) -> Result<RawTextMetrics, GlyphConversionError>;
}

impl FontHandle {
    /// Font units to render units
    fn scale(&self) -> Result<f64, GlyphConversionError> {
        let units_per_em = self.font().units_per_em;
        if units_per_em > 0.0 && units_per_em.is_finite() {
            Ok(self.size() / units_per_em)
        } else {
            Err(GlyphConversionError::DegenerateFont {
                font: self.font_id().to_string(),
                units_per_em,
            })
        }
    }

    /// Height of one line in font units
    fn line_units(&self) -> f64 {
        self.font().ascent + self.font().descent
    }

    /// Glyph for `ch`, or the font's missing glyph
    ///
    /// Fonts without a `<missing-glyph>` render unknown characters as blank
    /// space of the default advance.
    fn resolve_glyph(&self, ch: char) -> Option<&Glyph> {
        self.font().glyph(ch).or_else(|| self.font().missing_glyph())
    }

    /// Distance the pen moves after `glyph`, in render units
    fn advance(&self, glyph: Option<&Glyph>, scale: f64) -> f64 {
        let advance = glyph.map_or(self.font().default_advance, |g| g.advance);
        advance * scale + self.font().em * self.letter_spacing() * scale
    }
}

impl GlyphOutliner for FontHandle {
    fn to_path_data(&self, text: &str) -> Result<RawGlyphPathData, GlyphConversionError> {
        let scale = self.scale()?;
        let line = self.line_units();
        let mut pen_x = 0.0;
        let mut line_y = line;
        let mut path = PathData::new();

        for ch in text.chars() {
            if ch == '\n' {
                pen_x = 0.0;
                line_y += self.line_height() * line;
                continue;
            }

            let glyph = self.resolve_glyph(ch);
            if let Some(d) = glyph.and_then(|g| g.d.as_deref()) {
                let outline = PathData::parse(d)
                    .map_err(|source| GlyphConversionError::MalformedPath { glyph: ch, source })?;
                // Font outlines are y-up; flip them onto the line's baseline.
                let placement = Transform::scale(scale, -scale)
                    .then(&Transform::translate(pen_x, line_y * scale * 2.0));
                path.extend(outline.transformed(&placement));
            }
            pen_x += self.advance(glyph, scale);
        }

        debug!(
            font = self.font_id(),
            chars = text.chars().count(),
            segments = path.segments().len(),
            "converted text to outlines"
        );
        Ok(path)
    }

    fn measure(&self, text: &str) -> Result<RawTextMetrics, GlyphConversionError> {
        let scale = self.scale()?;
        let line_box = self.line_units() * scale * 2.0;
        let mut width: f64 = 0.0;
        let mut line_width = 0.0;
        let mut height = line_box;

        for ch in text.chars() {
            if ch == '\n' {
                width = width.max(line_width);
                height += line_box * self.line_height();
                line_width = 0.0;
                continue;
            }
            line_width += self.advance(self.resolve_glyph(ch), scale);
        }

        // Only the widest line counts
        width = width.max(line_width);
        Ok(TextMetrics::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::font::SvgFont;

    const FONT: &str = r#"<svg><font id="box" horiz-adv-x="500">
      <font-face units-per-em="1000" ascent="800" descent="-200"/>
      <glyph unicode="a" horiz-adv-x="400" d="M 0 0 h 300 v 500 h -300 z"/>
      <glyph unicode="m" horiz-adv-x="600" d="M 0 0 H 600 V 500 H 0 Z"/>
      <glyph unicode=" " horiz-adv-x="200"/>
      <glyph unicode="x" d="M 0 0 Q"/>
      <glyph unicode="o" horiz-adv-x="300" d="M0 0a5 5 0 01 10 0z"/>
    </font></svg>"#;

    fn handle(size: f64) -> FontHandle {
        FontHandle::new(Arc::new(SvgFont::parse(FONT, "box").unwrap()), size)
    }

    #[test]
    fn test_measure_single_line() {
        let metrics = handle(100.0).measure("aa").unwrap();
        assert!((metrics.width - 80.0).abs() < 1e-9);
        assert!((metrics.height - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_measure_keeps_widest_line() {
        let metrics = handle(100.0).measure("a\nmm").unwrap();
        assert!((metrics.width - 120.0).abs() < 1e-9);
        assert!((metrics.height - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_letter_spacing_uses_em() {
        let metrics = handle(100.0)
            .with_letter_spacing(0.5)
            .measure("a")
            .unwrap();
        // 400 + 600 * 0.5 font units at 0.1
        assert!((metrics.width - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_glyph_uses_default_advance() {
        let metrics = handle(100.0).measure("?").unwrap();
        assert!((metrics.width - 50.0).abs() < 1e-9);
        assert!(handle(100.0).to_path_data("?").unwrap().is_empty());
    }

    #[test]
    fn test_outlines_are_flipped_and_advanced() {
        let path = handle(100.0).to_path_data("a a").unwrap();
        assert_eq!(
            path.to_svg_d(),
            "M 0 120 h 30 v -50 h -30 z M 60 120 h 30 v -50 h -30 z"
        );
    }

    #[test]
    fn test_arc_outline_with_packed_flags() {
        let path = handle(100.0).to_path_data("o").unwrap();
        assert_eq!(path.to_svg_d(), "M 0 120 a 0.5 0.5 0 0 0 1 0 z");
    }

    #[test]
    fn test_empty_text() {
        let h = handle(100.0);
        assert!(h.to_path_data("").unwrap().is_empty());
        let metrics = h.measure("").unwrap();
        assert_eq!(metrics.width, 0.0);
    }

    #[test]
    fn test_malformed_glyph() {
        let err = handle(100.0).to_path_data("ax").unwrap_err();
        assert!(matches!(
            err,
            GlyphConversionError::MalformedPath { glyph: 'x', .. }
        ));
    }

    #[test]
    fn test_degenerate_font() {
        let source = r#"<svg><font id="zero"><font-face units-per-em="0"/><glyph unicode="a"/></font></svg>"#;
        let handle = FontHandle::new(Arc::new(SvgFont::parse(source, "zero").unwrap()), 100.0);
        assert!(matches!(
            handle.measure("a"),
            Err(GlyphConversionError::DegenerateFont { .. })
        ));
    }
}
