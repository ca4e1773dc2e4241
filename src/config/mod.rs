//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `DOCS_QUERY_` (nested keys separated
//! by `__`, e.g. `DOCS_QUERY_FEED__BASE_URI`).

mod file_config;

pub use file_config::ConfigFileError;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "docs-query.toml";

/// Default documents feed
pub const DEFAULT_FEED_URI: &str = "https://docs.google.com/feeds/documents/private/full";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Feed endpoint settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Filter defaults applied to every composed query
    #[serde(default)]
    pub defaults: QueryDefaults,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Feed endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base URI of the documents feed
    #[serde(default = "default_feed_uri")]
    pub base_uri: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_uri: default_feed_uri(),
        }
    }
}

fn default_feed_uri() -> String {
    DEFAULT_FEED_URI.to_string()
}

/// Defaults for query filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDefaults {
    #[serde(default)]
    pub show_deleted: bool,

    #[serde(default)]
    pub show_folders: bool,

    /// Page size used when none is given
    #[serde(default)]
    pub max_results: Option<u32>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration, layering `path` (if any) and the environment over defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    // Missing keys fall back to the serde defaults on `Config`
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("DOCS_QUERY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find a configuration file in the usual places
///
/// Checks `./docs-query.toml`, then `<config dir>/docs-query/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    default_config_path().filter(|path| path.is_file())
}

/// Per-user configuration path, whether or not it exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("docs-query").join("config.toml"))
}

/// Get the default configuration (from env vars or defaults)
///
/// A malformed environment is logged and replaced by the built-in defaults.
pub fn get_config() -> Config {
    config_or_default(load_config(None))
}

fn config_or_default(result: Result<Config, config::ConfigError>) -> Config {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring invalid configuration, using defaults");
        Config::default()
    })
}
