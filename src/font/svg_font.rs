//! SVG font documents
//!
//! An SVG font describes each glyph as a `<glyph>` element carrying path
//! data in font units (y pointing up) and a horizontal advance. Only the
//! parts needed to lay out a single run of text are kept.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::FontLoadError;

/// Units per em assumed when `<font-face>` does not declare it
const DEFAULT_UNITS_PER_EM: f64 = 1000.0;

/// A single glyph outline
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Raw path data in font units, if the glyph has an outline
    pub d: Option<String>,
    /// Horizontal advance in font units
    pub advance: f64,
}

/// A parsed SVG font
#[derive(Debug, Clone, PartialEq)]
pub struct SvgFont {
    pub id: String,
    pub units_per_em: f64,
    pub ascent: f64,
    pub descent: f64,
    /// Advance used by glyphs that do not declare their own
    pub default_advance: f64,
    /// Advance of `m`, the unit for letter spacing
    pub em: f64,
    glyphs: HashMap<char, Glyph>,
    missing_glyph: Option<Glyph>,
}

impl SvgFont {
    /// Parse an SVG font document
    ///
    /// `fallback_id` names the font when its `<font>` element has no `id`.
    pub fn parse(source: &str, fallback_id: &str) -> Result<Self, FontLoadError> {
        let mut reader = Reader::from_str(source);

        let mut id: Option<String> = None;
        let mut default_advance = 0.0;
        let mut face: Option<(f64, f64, f64)> = None;
        // Glyph advances can fall back to the font default, which may be
        // declared after the glyphs are seen, so they are resolved at the end.
        let mut raw_glyphs: Vec<(char, Option<String>, Option<f64>)> = Vec::new();
        let mut missing: Option<(Option<String>, Option<f64>)> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    let attrs = read_attributes(&e, &reader)?;
                    match e.local_name().as_ref() {
                        b"font" => {
                            id = attrs.get("id").cloned();
                            if let Some(adv) = attrs.get("horiz-adv-x") {
                                default_advance = parse_metric("horiz-adv-x", adv)?;
                            }
                        }
                        b"font-face" => {
                            let units_per_em = match attrs.get("units-per-em") {
                                Some(v) => parse_metric("units-per-em", v)?,
                                None => DEFAULT_UNITS_PER_EM,
                            };
                            let ascent = optional_metric(&attrs, "ascent")?.unwrap_or(0.0);
                            let descent = optional_metric(&attrs, "descent")?.unwrap_or(0.0);
                            face = Some((units_per_em, ascent, descent));
                        }
                        b"glyph" => {
                            let mut chars = attrs.get("unicode").map(|u| u.chars()).into_iter().flatten();
                            // Ligatures map several characters to one glyph and
                            // cannot be addressed one character at a time.
                            if let (Some(ch), None) = (chars.next(), chars.next()) {
                                let advance = optional_metric(&attrs, "horiz-adv-x")?;
                                raw_glyphs.push((ch, attrs.get("d").cloned(), advance));
                            }
                        }
                        b"missing-glyph" => {
                            let advance = optional_metric(&attrs, "horiz-adv-x")?;
                            missing = Some((attrs.get("d").cloned(), advance));
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(source) => {
                    return Err(FontLoadError::Xml {
                        position: reader.error_position(),
                        source,
                    })
                }
            }
        }

        let (units_per_em, ascent, descent) = face.ok_or(FontLoadError::MissingFontFace)?;
        if raw_glyphs.is_empty() && missing.is_none() {
            return Err(FontLoadError::NoGlyphs);
        }

        let glyphs: HashMap<char, Glyph> = raw_glyphs
            .into_iter()
            .map(|(ch, d, advance)| {
                let glyph = Glyph {
                    d,
                    advance: advance.unwrap_or(default_advance),
                };
                (ch, glyph)
            })
            .collect();
        let missing_glyph = missing.map(|(d, advance)| Glyph {
            d,
            advance: advance.unwrap_or(default_advance),
        });
        let em = glyphs.get(&'m').map(|g| g.advance).unwrap_or(0.0);

        Ok(SvgFont {
            id: id.unwrap_or_else(|| fallback_id.to_string()),
            units_per_em,
            ascent,
            descent,
            default_advance,
            em,
            glyphs,
            missing_glyph,
        })
    }

    /// Look up the glyph for a character
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// The font's `<missing-glyph>`, if it declares one
    pub fn missing_glyph(&self) -> Option<&Glyph> {
        self.missing_glyph.as_ref()
    }

    /// Number of addressable glyphs
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

fn read_attributes(
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<HashMap<String, String>, FontLoadError> {
    let xml_error = |source: quick_xml::Error| FontLoadError::Xml {
        position: reader.buffer_position(),
        source,
    };

    let mut attrs = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error(err.into()))?;
        let key = reader
            .decoder()
            .decode(attr.key.local_name().as_ref())
            .map_err(|err| xml_error(err.into()))?
            .into_owned();
        let raw = reader
            .decoder()
            .decode(&attr.value)
            .map_err(|err| xml_error(err.into()))?;
        let value = quick_xml::escape::unescape(&raw)
            .map_err(|err| xml_error(err.into()))?
            .into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn parse_metric(name: &'static str, value: &str) -> Result<f64, FontLoadError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| FontLoadError::InvalidMetric {
            name,
            value: value.to_string(),
        })
}

fn optional_metric(
    attrs: &HashMap<String, String>,
    name: &'static str,
) -> Result<Option<f64>, FontLoadError> {
    attrs.get(name).map(|v| parse_metric(name, v)).transpose()
}
