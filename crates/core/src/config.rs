//! User configuration stored under the platform config directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::filter::{SortKey, View};

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "gamehub";
const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "GAMEHUB";

const DEFAULT_CONFIG: &str = r##"# GameHub configuration

# Initial sort: rating, price-low, price-high, newest or catalog.
default_sort = "rating"

# Tab shown at start-up: catalog, new, top-rated or reviews.
default_view = "catalog"

# Show the block-letter banner above the tabs.
show_banner = true

# Directory for log files (relative paths resolve from the working directory).
# log_dir = "logs"

[theme]
# Hex colours, e.g. "#00bcd4".
# accent = "#00bcd4"
# muted = "#808080"
# highlight = "#303030"
# warning = "#f5c518"
"##;

/// Optional colour overrides, as `#rrggbb` or `#rgb` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ThemeConfig {
    pub accent: Option<String>,
    pub muted: Option<String>,
    pub highlight: Option<String>,
    pub warning: Option<String>,
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sort applied when the catalog first opens.
    pub default_sort: SortKey,
    /// Tab selected at start-up.
    pub default_view: View,
    /// Whether to draw the banner.
    pub show_banner: bool,
    /// Where log files are written.
    pub log_dir: PathBuf,
    /// Colour overrides.
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_sort: SortKey::Rating,
            default_view: View::Catalog,
            show_banner: true,
            log_dir: PathBuf::from("logs"),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from an explicit file, layering `GAMEHUB__*` environment overrides on top.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }
}

/// Path of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Write the commented default config if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    write_default_config(config_path())
}

/// Write the commented default config to `path` unless a file is already there.
pub fn write_default_config(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "Wrote default config");
    Ok(())
}
