//! Number formatting for attribute values and path data
//!
//! Geometry is computed in `f64`, but the values written into markup are
//! rounded to a fixed number of significant digits so that float noise such
//! as `6.000000000000005` renders as `6`.

/// Significant digits kept when formatting numbers for markup
pub const SIGNIFICANT_DIGITS: i32 = 14;

/// Format a number for use in SVG markup
///
/// Keeps [`SIGNIFICANT_DIGITS`] significant digits, trims trailing zeros and
/// never emits a negative zero.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - magnitude).max(0) as usize;
    let formatted = format!("{:.*}", decimals, value);

    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
