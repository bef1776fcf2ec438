//! Heading SVG CLI
//!
//! Usage:
//!   heading-svg [OPTIONS] <TEXT>
//!
//! Options:
//!   -t, --theme <DIR>          Theme directory holding the font (default: .)
//!   -f, --font <PATH>          Font file relative to the theme
//!   -s, --size <N>             Font size (default: 100)
//!   -c, --calibration <FILE>   Calibration table (TOML format)
//!   -a, --attr <KEY=VALUE>     Root attribute, repeatable; dotted keys nest
//!       --style <CSS>          Inline style for the root element
//!       --fragment             Omit the XML declaration
//!       --compact              Do not indent output
//!       --data-uri             Print a base64 data: URI instead of markup
//!   -d, --debug                Log pipeline details to stderr
//!   -h, --help                 Print help

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heading_svg::{
    render_svg, to_data_uri, AttributeValue, Attributes, CalibrationTable, GenerateError,
    HeadingConfig, HeadingTextToSvg, StaticTheme, SvgConfig, DEFAULT_FONT_PATH,
};

#[derive(Parser)]
#[command(name = "heading-svg")]
#[command(about = "Render heading text as SVG outlines with a bleed rectangle")]
struct Cli {
    /// Text to render; `\n` starts a new line
    text: String,

    /// Theme directory holding the font
    #[arg(short, long, default_value = ".")]
    theme: PathBuf,

    /// Font file relative to the theme directory
    #[arg(short, long, default_value = DEFAULT_FONT_PATH)]
    font: PathBuf,

    /// Font size; must have a calibration entry
    #[arg(short, long, default_value_t = 100.0)]
    size: f64,

    /// Calibration table replacing the built-in one (TOML format)
    #[arg(short, long)]
    calibration: Option<PathBuf>,

    /// Root attribute as KEY=VALUE; dotted keys build nested attributes
    #[arg(short, long = "attr", value_name = "KEY=VALUE", value_parser = parse_attr)]
    attrs: Vec<(String, String)>,

    /// Inline style for the root element
    #[arg(long)]
    style: Option<String>,

    /// Omit the XML declaration
    #[arg(long)]
    fragment: bool,

    /// Do not indent output
    #[arg(long)]
    compact: bool,

    /// Print a base64 data: URI instead of markup
    #[arg(long)]
    data_uri: bool,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    debug: bool,
}

fn parse_attr(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// Insert `value` under a dotted key, creating nested mappings on the way
fn insert_dotted(attrs: &mut Attributes, key: &str, value: String) {
    match key.split_once('.') {
        Some((head, rest)) => {
            let mut nested = attrs
                .get(head)
                .and_then(AttributeValue::as_map)
                .cloned()
                .unwrap_or_default();
            insert_dotted(&mut nested, rest, value);
            attrs.insert(head, nested);
        }
        None => attrs.insert(key, value),
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "heading_svg=debug,warn" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    // Load calibration table
    let calibrations = match &cli.calibration {
        Some(path) => match CalibrationTable::from_file(path) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("Error loading calibration '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => CalibrationTable::default(),
    };

    let mut attributes = Attributes::new();
    for (key, value) in &cli.attrs {
        insert_dotted(&mut attributes, key, value.clone());
    }
    if let Some(style) = &cli.style {
        attributes.insert("style", style.as_str());
    }
    let style_source = attributes.get_text("style").map(str::to_string);

    let mut svg_config = SvgConfig::new();
    if cli.fragment {
        svg_config = svg_config.fragment();
    }
    if cli.compact {
        svg_config = svg_config.compact();
    }
    let config = HeadingConfig::new()
        .with_font_path(&cli.font)
        .with_font_size(cli.size)
        .with_calibrations(calibrations)
        .with_svg(svg_config);

    let generator = HeadingTextToSvg::new(StaticTheme::new(&cli.theme), config);
    let text = cli.text.replace("\\n", "\n");

    match generator.generate(&text, attributes) {
        Ok(doc) => {
            let svg_config = &generator.config().svg;
            if cli.data_uri {
                println!("{}", to_data_uri(&doc, svg_config));
            } else {
                print!("{}", render_svg(&doc, svg_config));
                if cli.compact {
                    println!();
                }
            }
        }
        Err(GenerateError::StyleParse(e)) => {
            match &style_source {
                Some(source) => eprint!("{}", e.format(source, "style")),
                None => eprintln!("Error: invalid style: {}", e),
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attr() {
        assert_eq!(
            parse_attr("class=title"),
            Ok(("class".to_string(), "title".to_string()))
        );
        assert_eq!(
            parse_attr("data-x=a=b"),
            Ok(("data-x".to_string(), "a=b".to_string()))
        );
        assert!(parse_attr("novalue").is_err());
        assert!(parse_attr("=x").is_err());
    }

    #[test]
    fn test_insert_dotted() {
        let mut attrs = Attributes::new();
        insert_dotted(&mut attrs, "data.theme", "dark".to_string());
        insert_dotted(&mut attrs, "data.size", "lg".to_string());
        insert_dotted(&mut attrs, "class", "title".to_string());

        let data = attrs.get("data").and_then(AttributeValue::as_map).unwrap();
        assert_eq!(data.get_text("theme"), Some("dark"));
        assert_eq!(data.get_text("size"), Some("lg"));
        assert_eq!(attrs.get_text("class"), Some("title"));
    }
}
