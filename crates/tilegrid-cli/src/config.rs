//! Configuration file loading for the CLI
//!
//! A configuration is looked up in this order: the `--config` path, the
//! project-local `tilegrid/config.toml`, the platform config directory. When
//! none exists the defaults are used. Whatever is loaded is validated before
//! any layout runs, so bad sizes or colors surface as configuration errors.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use tilegrid::{TilegridError, config::AppConfig};

const LOCAL_CONFIG: &str = "tilegrid/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for TilegridError {
    fn from(err: ConfigError) -> Self {
        TilegridError::Config(err.to_string())
    }
}

/// Where a configuration file came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Explicit,
    Local,
    Platform,
}

/// Load the configuration for a run.
///
/// # Errors
///
/// Returns `TilegridError::Config` if an explicit path doesn't exist, or if
/// the file found cannot be parsed or holds invalid sizes or colors.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TilegridError> {
    let found = match explicit_path {
        Some(path) => Some((Source::Explicit, path.as_ref().to_path_buf())),
        None => discover(),
    };
    let Some((source, path)) = found else {
        debug!("No configuration file found, using default configuration");
        return Ok(AppConfig::default());
    };

    info!(source:?, path = path.display().to_string(); "Loading configuration");
    read_config(&path)
}

/// First existing implicit configuration file
fn discover() -> Option<(Source, PathBuf)> {
    let platform = ProjectDirs::from("com", "tilegrid", "tilegrid")
        .map(|dirs| dirs.config_dir().join("config.toml"));
    if platform.is_none() {
        debug!("Could not determine platform-specific config directory");
    }

    [
        (Source::Local, Some(PathBuf::from(LOCAL_CONFIG))),
        (Source::Platform, platform),
    ]
    .into_iter()
    .find_map(|(source, path)| path.filter(|path| path.exists()).map(|path| (source, path)))
}

fn read_config(path: &Path) -> Result<AppConfig, TilegridError> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_path_buf()).into(),
        _ => TilegridError::Io(err),
    })?;

    let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.message().to_string(),
    })?;

    config
        .layout()
        .validate()
        .map_err(ConfigError::Validation)?;
    let style = config.style();
    style
        .background_color()
        .and(style.box_fill_color())
        .and(style.box_stroke_color())
        .map_err(ConfigError::Validation)?;

    Ok(config)
}
