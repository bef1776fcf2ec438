//! Font-specific corrections applied to raw outline output

use tracing::debug;

use crate::calibration::Calibration;
use crate::path::PathData;

use super::TextMetrics;

/// Glyph path and text box after calibration
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedGeometry {
    /// Glyph outlines shifted to the viewbox origin
    pub path: PathData,
    /// Corrected text width
    pub width: f64,
    /// Corrected text height, without room for the bleed
    pub height: f64,
}

impl CorrectedGeometry {
    /// Full height of the rendered SVG, including room for the bleed
    pub fn rendered_height(&self, calibration: &Calibration) -> f64 {
        self.height * calibration.vertical_adjust
    }
}

/// Apply a calibration to raw path data and metrics
///
/// Results are not range-checked: a zero or negative width or height is
/// passed through as is.
pub fn correct(raw: &PathData, metrics: TextMetrics, calibration: &Calibration) -> CorrectedGeometry {
    let [dx, dy] = calibration.translate;
    let width = metrics.width + calibration.width_offset;
    let height = metrics.height * calibration.height_scale;

    debug!(
        raw_width = metrics.width,
        raw_height = metrics.height,
        width,
        height,
        "corrected text geometry"
    );

    CorrectedGeometry {
        path: raw.translated(dx, dy),
        width,
        height,
    }
}
