//! Merge rules: defaults first, every later source overrides them.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("assembly.parallelism", 1)?
        .set_default("assembly.require_descriptors", Vec::<String>::new())?
        .set_default("assembly.ignore_patterns", vec![".git", ".svn"])?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
