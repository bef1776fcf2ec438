//! Geometry correction for rendered heading text
//!
//! Takes the raw outline and metrics produced by the outline converter and
//! turns them into render-space geometry: the shifted glyph path, the
//! corrected text box and the bleed rectangle underneath it.

pub mod bleed;
pub mod corrector;
mod types;

pub use bleed::{synthesize_bleed, vertical_adjust_percent, BleedGeometry, BLEED_CLASS};
pub use corrector::{correct, CorrectedGeometry};
pub use types::{Point, TextMetrics};
