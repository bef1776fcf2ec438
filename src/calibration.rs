//! Calibration tables for font-specific geometry corrections
//!
//! The outline converter reports text boxes with extra space around the
//! glyphs, so the rendered geometry is nudged with constants that were found
//! by eye for one font at one size. Each set of constants lives in a
//! [`Calibration`] keyed by `(font, size)`; a font or size change needs a new
//! entry rather than edits to the pipeline.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing calibration tables
#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("Failed to read calibration file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse calibration TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Correction constants for one font at one size
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Calibration {
    /// Font identifier, matched against the loaded font's id
    pub font: String,
    /// Font size the constants were measured at
    pub size: f64,
    /// Shift applied to the glyph path so it sits flush with the top-left
    /// corner of the viewbox
    pub translate: [f64; 2],
    /// Added to the measured text width
    pub width_offset: f64,
    /// Multiplier for the measured text height
    pub height_scale: f64,
    /// Fraction of the corrected height where the bleed rectangle starts
    pub bleed_offset: f64,
    /// Height of the bleed rectangle
    pub bleed_height: f64,
    /// How much taller the rendered SVG is than the corrected text height
    pub vertical_adjust: f64,
}

impl Calibration {
    /// Whether these constants were measured for the given font and size
    pub fn matches(&self, font: &str, size: f64) -> bool {
        self.font == font && (self.size - size).abs() < f64::EPSILON
    }
}

/// A set of calibrations, one per font and size
#[derive(Debug, Clone)]
pub struct CalibrationTable {
    /// Optional name for the table
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub entries: Vec<Calibration>,
}

/// TOML structure for deserializing calibration tables
#[derive(Deserialize)]
struct TomlCalibrationTable {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    calibration: Vec<Calibration>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Built-in calibration for the Furore heading font at 100 units
///
/// If the font size changes, every value below has to be measured again.
const DEFAULT_CALIBRATIONS: &str = r##"
[metadata]
name = "default"
description = "Furore heading font"

[[calibration]]
font = "furore"
size = 100.0
# Aligns the glyphs with the left and top edges of the viewbox
translate = [-5.0, -50.0]
# Furore reports extra space around characters
width-offset = -7.0
height-scale = 0.5833
# Bleed rectangle starts just above the baseline and is 10 units tall
bleed-offset = 0.97
bleed-height = 10.0
vertical-adjust = 1.06
"##;

impl CalibrationTable {
    /// Load a calibration table from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CalibrationError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a calibration table from a TOML string
    pub fn from_str(content: &str) -> Result<Self, CalibrationError> {
        let parsed: TomlCalibrationTable = toml::from_str(content)?;

        Ok(CalibrationTable {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            entries: parsed.calibration,
        })
    }

    /// Find the calibration measured for `font` at `size`
    pub fn lookup(&self, font: &str, size: f64) -> Option<&Calibration> {
        self.entries.iter().find(|c| c.matches(font, size))
    }
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::from_str(DEFAULT_CALIBRATIONS).expect("Default calibrations should be valid TOML")
    }
}
