//! Project config file sources: config/ddconf.toml and config/{env}.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Environment variable selecting the environment-specific file.
pub const ENV_VAR: &str = "DDCONF_ENV";

const DEFAULT_ENV: &str = "development";

/// Add project config files to `builder`.
/// Precedence: config/ddconf.toml (base) then config/{DDCONF_ENV}.toml.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    project_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config_dir = project_root.join("config");
    let env_name = std::env::var(ENV_VAR).unwrap_or_else(|_| DEFAULT_ENV.to_string());

    for path in [
        config_dir.join("ddconf.toml"),
        config_dir.join(format!("{}.toml", env_name)),
    ] {
        if path.is_file() {
            debug!(config_path = %path.display(), "Using project configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
    }

    Ok(builder)
}
