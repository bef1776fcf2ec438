//! SVG root attributes and how caller overrides are merged into them

use indexmap::IndexMap;

use crate::calibration::Calibration;
use crate::error::StyleParseError;
use crate::geometry::vertical_adjust_percent;
use crate::number::format_number;
use crate::style::{parse_style_attribute, serialize_style_array, StyleMap};

/// Custom property carrying the bleed allowance to stylesheets
pub const BLEED_ADJUST_PROPERTY: &str = "--bleed-vertical-adjust";

/// Default `preserveAspectRatio` of the root element
pub const PRESERVE_ASPECT_RATIO: &str = "xMaxYMax meet";

/// An attribute value: plain text or a nested mapping
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Map(Attributes),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&Attributes> {
        match self {
            AttributeValue::Map(m) => Some(m),
            AttributeValue::Text(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Text(format_number(n))
    }
}

impl From<Attributes> for AttributeValue {
    fn from(m: Attributes) -> Self {
        AttributeValue::Map(m)
    }
}

/// Ordered attribute mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(IndexMap<String, AttributeValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a value; a replaced key keeps its position
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Value of `name` if it is plain text
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// Merge `overlay` into `base`, overlay winning at every nesting level
///
/// Mappings present on both sides are merged recursively; any other value in
/// `overlay` replaces the one in `base`. Keys only in `overlay` are appended
/// in their original order.
pub fn merge_deep(base: Attributes, overlay: Attributes) -> Attributes {
    let mut merged = base.0;
    for (name, value) in overlay.0 {
        let value = match (merged.get_mut(&name), value) {
            (Some(AttributeValue::Map(existing)), AttributeValue::Map(incoming)) => {
                AttributeValue::Map(merge_deep(std::mem::take(existing), incoming))
            }
            (_, value) => value,
        };
        merged.insert(name, value);
    }
    Attributes(merged)
}

/// Default root attributes for text of the given corrected size
pub fn default_attributes(width: f64, height: f64, calibration: &Calibration) -> Attributes {
    let rendered_height = height * calibration.vertical_adjust;
    Attributes::new()
        .with("width", width)
        .with("height", rendered_height)
        .with(
            "viewBox",
            format!(
                "0 0 {} {}",
                format_number(width),
                format_number(rendered_height)
            ),
        )
        .with("x", "0")
        .with("y", "0")
        .with("preserveAspectRatio", PRESERVE_ASPECT_RATIO)
}

/// Build the root attributes: defaults, caller overrides, then the style
///
/// The bleed allowance is always written into the style as
/// [`BLEED_ADJUST_PROPERTY`], replacing any caller value.
pub fn compose_attributes(
    width: f64,
    height: f64,
    calibration: &Calibration,
    caller: Attributes,
) -> Result<Attributes, StyleParseError> {
    let mut merged = merge_deep(default_attributes(width, height, calibration), caller);

    let mut style = match merged.get("style") {
        None => StyleMap::new(),
        Some(AttributeValue::Text(raw)) => parse_style_attribute(raw)?,
        Some(AttributeValue::Map(map)) => style_from_map(map)?,
    };
    style.insert(
        BLEED_ADJUST_PROPERTY.to_string(),
        vertical_adjust_percent(calibration),
    );
    merged.insert("style", serialize_style_array(&style));

    Ok(merged)
}

fn style_from_map(map: &Attributes) -> Result<StyleMap, StyleParseError> {
    map.iter()
        .map(|(property, value)| match value {
            AttributeValue::Text(v) => Ok((property.to_string(), v.clone())),
            AttributeValue::Map(_) => Err(StyleParseError::NestedValue {
                property: property.to_string(),
            }),
        })
        .collect()
}
