//! SVG markup output for assembled documents
//!
//! This module turns an [`SvgDocument`](crate::document::SvgDocument) into an
//! SVG string or a `data:` URI that can be used directly in CSS.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, to_data_uri};
