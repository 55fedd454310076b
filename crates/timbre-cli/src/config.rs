use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use timbre_search::DEFAULT_PAGE_SIZE;

/// Configuration for timbre.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (TIMBRE_* prefix)
/// 3. Config file (~/.config/timbre/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the track catalog CSV.
    ///
    /// Can be set via:
    /// - CLI: --catalog /path/to/tracks.csv
    /// - ENV: TIMBRE_CATALOG_PATH
    /// - Config: catalog_path = "/path/to/tracks.csv"
    /// - Default: ~/.local/share/timbre/tracks.csv
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Recommendations printed per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Log level, colour and output for twyg.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            page_size: default_page_size(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("timbre");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration, letting `--catalog` win over every other source.
    pub fn load_with_catalog_path(catalog_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load()?;
        if let Some(path) = catalog_path {
            config.catalog_path = path;
        }
        Ok(config)
    }
}

fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("timbre")
        .join("tracks.csv")
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/timbre/config.toml
/// - macOS: ~/Library/Application Support/timbre/config.toml
/// - Windows: %APPDATA%\timbre\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("timbre")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Timbre Configuration File
#
# Priority: CLI arguments > TIMBRE_* environment variables > this file > defaults

# Track catalog with precomputed audio features.
#
# Required columns: uri, genres, release_year, popularity, acousticness,
# danceability, energy, instrumentalness, valence, tempo
#
# Can also be set via:
# - CLI: timbre --catalog /path/to/tracks.csv recommend
# - Environment: TIMBRE_CATALOG_PATH=/path/to/tracks.csv
#
# Default: Platform-specific data directory
#catalog_path = "/path/to/tracks.csv"

# Recommendations shown per page
page_size = 5

# Logging (twyg options)
#[logging]
#coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
