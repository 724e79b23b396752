//! Global config file source: $XDG_CONFIG_HOME/ddconf/config.toml or ~/.config/ddconf/config.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::PathBuf;
use tracing::debug;

/// Path to the global config file, whether or not it exists.
pub fn global_config_path() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(std::env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("ddconf").join("config.toml"))
}

/// Add the global config file to `builder` if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(path) = global_config_path() else {
        return Ok(builder);
    };

    if !path.is_file() {
        debug!(config_path = %path.display(), "No global configuration file");
        return Ok(builder);
    }

    let path = dunce::canonicalize(&path).unwrap_or(path);
    debug!(config_path = %path.display(), "Using global configuration file");
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
}
