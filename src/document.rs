//! The in-memory SVG document

use crate::attributes::Attributes;
use crate::geometry::BleedGeometry;
use crate::path::PathData;

/// One `<path>` element
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    pub d: String,
    pub class: Option<String>,
}

/// Root attributes and paths, in paint order
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    attributes: Attributes,
    paths: Vec<SvgPath>,
}

impl SvgDocument {
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn paths(&self) -> &[SvgPath] {
        &self.paths
    }
}

/// Assemble the document: glyph outlines first, the bleed rectangle second
pub fn assemble(glyphs: &PathData, bleed: &BleedGeometry, attributes: Attributes) -> SvgDocument {
    SvgDocument {
        attributes,
        paths: vec![
            SvgPath {
                d: glyphs.to_svg_d(),
                class: None,
            },
            SvgPath {
                d: bleed.path.to_svg_d(),
                class: Some(bleed.class().to_string()),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationTable;
    use crate::geometry::synthesize_bleed;

    #[test]
    fn test_paths_in_order() {
        let calibration = CalibrationTable::default()
            .lookup("furore", 100.0)
            .cloned()
            .unwrap();
        let glyphs = PathData::parse("M 0 0 h 10 v 10 z").unwrap();
        let bleed = synthesize_bleed(10.0, 10.0, &calibration);
        let doc = assemble(&glyphs, &bleed, Attributes::new().with("x", "0"));

        assert_eq!(doc.paths().len(), 2);
        assert_eq!(doc.paths()[0].d, "M 0 0 h 10 v 10 z");
        assert_eq!(doc.paths()[0].class, None);
        assert_eq!(doc.paths()[1].class.as_deref(), Some("bleed"));
        assert_eq!(doc.attributes().get_text("x"), Some("0"));
    }

    #[test]
    fn test_empty_glyph_path_is_kept() {
        let calibration = CalibrationTable::default()
            .lookup("furore", 100.0)
            .cloned()
            .unwrap();
        let bleed = synthesize_bleed(0.0, 0.0, &calibration);
        let doc = assemble(&PathData::new(), &bleed, Attributes::new());
        assert_eq!(doc.paths()[0].d, "");
        assert_eq!(doc.paths().len(), 2);
    }
}
