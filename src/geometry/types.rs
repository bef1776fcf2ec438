//! Core geometric types

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a run of text, as reported by the outline converter
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

impl TextMetrics {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
