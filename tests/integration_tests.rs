//! End-to-end tests against the fixture theme

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use heading_svg::{
    render_svg, AttributeValue, Attributes, CalibrationTable, FontLoadError, FsFontLoader,
    GenerateError, HeadingConfig, HeadingTextToSvg, StaticTheme, SvgConfig,
};
use pretty_assertions::assert_eq;

fn theme_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/theme")
}

fn generator() -> HeadingTextToSvg<StaticTheme> {
    HeadingTextToSvg::new(StaticTheme::new(theme_dir()), HeadingConfig::default())
}

#[test]
fn test_hi_matches_worked_example() {
    let doc = generator().generate("Hi", Attributes::new()).unwrap();
    let attrs = doc.attributes();

    let keys: Vec<_> = attrs.keys().collect();
    assert_eq!(
        keys,
        vec!["width", "height", "viewBox", "x", "y", "preserveAspectRatio", "style"]
    );
    assert_eq!(attrs.get_text("width"), Some("50"));
    assert_eq!(attrs.get_text("height"), Some("74.19576"));
    assert_eq!(attrs.get_text("viewBox"), Some("0 0 50 74.19576"));
    assert_eq!(doc.paths()[1].d, "M 0 67.89612 h 50 v 10 h -50 z");
}

#[test]
fn test_width_and_style_overrides() {
    let attrs = Attributes::new()
        .with("width", "200")
        .with("style", "fill: red");
    let doc = generator().generate("Hi", attrs).unwrap();

    assert_eq!(doc.attributes().get_text("width"), Some("200"));
    assert_eq!(doc.attributes().get_text("height"), Some("74.19576"));
    assert_eq!(
        doc.attributes().get_text("style"),
        Some("fill: red; --bleed-vertical-adjust: 6%;")
    );
}

#[test]
fn test_nested_caller_attributes() {
    let attrs = Attributes::new().with("data", Attributes::new().with("heading", "1"));
    let doc = generator().generate("Hi", attrs).unwrap();
    let data = doc
        .attributes()
        .get("data")
        .and_then(AttributeValue::as_map)
        .unwrap();
    assert_eq!(data.get_text("heading"), Some("1"));

    let svg = render_svg(&doc, &SvgConfig::new().compact());
    assert!(svg.contains(r#" data-heading="1""#));
}

#[test]
fn test_repeat_calls_are_identical() {
    let generator = generator();
    let a = generator.generate("Test", Attributes::new()).unwrap();
    let b = generator.generate("Test", Attributes::new()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_empty_text() {
    let doc = generator().generate("", Attributes::new()).unwrap();
    assert_eq!(doc.paths()[0].d, "");
    assert_eq!(doc.attributes().get_text("width"), Some("-7"));
}

#[test]
fn test_unknown_characters_use_missing_glyph() {
    let doc = generator().generate("?", Attributes::new()).unwrap();
    assert!(!doc.paths()[0].d.is_empty());
    // 500 font units at 100/1000, minus the width correction
    assert_eq!(doc.attributes().get_text("width"), Some("43"));
}

#[test]
fn test_multiline_text_is_taller() {
    let one = generator().generate("Hi", Attributes::new()).unwrap();
    let two = generator().generate("Hi\nHi", Attributes::new()).unwrap();
    let height = |doc: &heading_svg::SvgDocument| -> f64 {
        doc.attributes().get_text("height").unwrap().parse().unwrap()
    };
    assert!((height(&two) - 2.0 * height(&one)).abs() < 1e-9);
}

#[test]
fn test_fs_loader() {
    let generator = HeadingTextToSvg::with_loader(
        StaticTheme::new(theme_dir()),
        FsFontLoader,
        HeadingConfig::default(),
    );
    assert!(generator.generate("Hi", Attributes::new()).is_ok());
}

#[test]
fn test_missing_theme_font() {
    let generator = HeadingTextToSvg::new(
        StaticTheme::new(theme_dir().join("nowhere")),
        HeadingConfig::default(),
    );
    let err = generator.generate("Hi", Attributes::new()).unwrap_err();
    assert!(matches!(err, GenerateError::FontLoad(FontLoadError::Io { .. })));
}

#[test]
fn test_custom_calibration_table() {
    let table = CalibrationTable::from_str(
        r##"
[[calibration]]
font = "furore"
size = 50.0
translate = [0.0, 0.0]
width-offset = 0.0
height-scale = 1.0
bleed-offset = 1.0
bleed-height = 5.0
vertical-adjust = 1.5
"##,
    )
    .unwrap();
    let config = HeadingConfig::new()
        .with_font_size(50.0)
        .with_calibrations(table);
    let generator = HeadingTextToSvg::new(StaticTheme::new(theme_dir()), config);
    let doc = generator.generate("Hi", Attributes::new()).unwrap();

    assert_eq!(doc.attributes().get_text("width"), Some("28.5"));
    assert_eq!(doc.attributes().get_text("height"), Some("90"));
    assert_eq!(doc.paths()[1].d, "M 0 60 h 28.5 v 5 h -28.5 z");
    assert_eq!(
        doc.attributes().get_text("style"),
        Some("--bleed-vertical-adjust: 50%;")
    );
}

#[test]
fn test_concurrent_generation_shares_font() {
    let generator = Arc::new(generator());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || generator.generate("Hi", Attributes::new()).unwrap())
        })
        .collect();

    let docs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(docs.windows(2).all(|pair| pair[0] == pair[1]));
}
