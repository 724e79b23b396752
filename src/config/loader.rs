//! Layered loading of [`EngineConfig`].

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, workspace_file};
use crate::config::EngineConfig;
use crate::error::EngineError;
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of environment overrides, e.g. `DDCONF_ASSEMBLY__PARALLELISM=4`.
pub const ENV_PREFIX: &str = "DDCONF";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `project_root`.
    ///
    /// Precedence (lowest to highest): built-in defaults, global config file,
    /// `config/ddconf.toml`, `config/{DDCONF_ENV}.toml`, `DDCONF_*` environment.
    pub fn load(project_root: &Path) -> Result<EngineConfig, EngineError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, project_root)?;
        let builder = builder.add_source(environment());

        let config = Self::finish(builder.build()?)?;
        debug!(project_root = %project_root.display(), "Engine configuration loaded");
        Ok(config)
    }

    /// Load a single TOML file on top of the defaults, without other sources.
    pub fn load_from_file(path: &Path) -> Result<EngineConfig, EngineError> {
        let built = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()?;
        Self::finish(built)
    }

    /// Path of the global configuration file, if one can be derived.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn finish(built: Config) -> Result<EngineConfig, EngineError> {
        let config: EngineConfig = built.try_deserialize()?;
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            EngineError::ConfigError(format!("invalid configuration: {}", messages.join("; ")))
        })?;
        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("assembly.require_descriptors")
        .with_list_parse_key("assembly.ignore_patterns")
}
