//! The decorative bleed rectangle drawn under the text
//!
//! The bleed is a plain rectangle whose top edge sits just above the
//! baseline of the corrected text. Stylesheets target it through the
//! [`BLEED_CLASS`] class to paint backgrounds or underlines that extend past
//! the glyphs.

use crate::calibration::Calibration;
use crate::number::format_number;
use crate::path::{PathData, PathSegment};

use super::Point;

/// CSS class given to the bleed path
pub const BLEED_CLASS: &str = "bleed";

/// The synthesized bleed rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct BleedGeometry {
    pub path: PathData,
    /// y-coordinate of the top edge
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BleedGeometry {
    pub fn class(&self) -> &'static str {
        BLEED_CLASS
    }
}

/// Build the bleed rectangle for text of the given corrected size
pub fn synthesize_bleed(width: f64, height: f64, calibration: &Calibration) -> BleedGeometry {
    let top = height * calibration.bleed_offset;
    let bleed_height = calibration.bleed_height;

    let path = PathData::from_segments(vec![
        PathSegment::MoveTo {
            relative: false,
            to: Point::new(0.0, top),
        },
        PathSegment::HorizontalTo {
            relative: true,
            x: width,
        },
        PathSegment::VerticalTo {
            relative: true,
            y: bleed_height,
        },
        PathSegment::HorizontalTo {
            relative: true,
            x: -width,
        },
        PathSegment::Close { relative: true },
    ]);

    BleedGeometry {
        path,
        top,
        width,
        height: bleed_height,
    }
}

/// The bleed allowance as a CSS percentage, e.g. `6%` for an adjust of 1.06
pub fn vertical_adjust_percent(calibration: &Calibration) -> String {
    format!("{}%", format_number((calibration.vertical_adjust - 1.0) * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationTable;

    fn furore() -> Calibration {
        CalibrationTable::default()
            .lookup("furore", 100.0)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_bleed_path() {
        let bleed = synthesize_bleed(50.0, 69.996, &furore());
        assert_eq!(bleed.path.to_svg_d(), "M 0 67.89612 h 50 v 10 h -50 z");
        assert!((bleed.top - 67.89612).abs() < 1e-9);
        assert_eq!(bleed.class(), "bleed");
    }

    #[test]
    fn test_negative_width_passes_through() {
        let bleed = synthesize_bleed(-7.0, 0.0, &furore());
        assert_eq!(bleed.path.to_svg_d(), "M 0 0 h -7 v 10 h 7 z");
    }

    #[test]
    fn test_vertical_adjust_percent() {
        assert_eq!(vertical_adjust_percent(&furore()), "6%");
    }
}
