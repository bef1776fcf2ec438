//! Access to the host theme
//!
//! Fonts ship inside the active theme, so the pipeline only needs to know
//! where that theme lives on disk.

use std::path::{Path, PathBuf};

/// Font resource used when no other path is configured, relative to the theme
pub const DEFAULT_FONT_PATH: &str = "fonts/furore/furore.svg";

/// The theme currently in use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTheme {
    pub name: String,
    pub path: PathBuf,
}

impl ActiveTheme {
    /// Absolute location of a resource shipped with this theme
    pub fn resource(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }
}

/// Supplies the active theme
pub trait ThemeManager {
    fn active_theme(&self) -> ActiveTheme;
}

/// A theme at a fixed directory
#[derive(Debug, Clone)]
pub struct StaticTheme {
    theme: ActiveTheme,
}

impl StaticTheme {
    /// Theme rooted at `path`, named after its directory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("theme")
            .to_string();
        Self::named(name, path)
    }

    pub fn named(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            theme: ActiveTheme {
                name: name.into(),
                path: path.into(),
            },
        }
    }
}

impl ThemeManager for StaticTheme {
    fn active_theme(&self) -> ActiveTheme {
        self.theme.clone()
    }
}
