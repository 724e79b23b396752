//! Engine Configuration
//!
//! Settings that shape a configuration pass: which alternate descriptors are
//! honoured, how modules are discovered and loaded, and how logging is set up.
//! Values are layered with the `config` crate (defaults, global file, project
//! files, environment) and validated before use.

use crate::assembly::{AssemblyOptions, ModuleKind};
use crate::descriptor::AltPrefix;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod loader;
mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod global_file;
    pub mod workspace_file;
}

pub use loader::ConfigLoader;

/// Upper bound on assembly worker threads.
pub const MAX_PARALLELISM: usize = 256;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub descriptors: DescriptorSettings,

    #[serde(default)]
    pub assembly: AssemblySettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorSettings {
    /// Comma-separated alternate descriptor prefixes, e.g. `"test,dev"`
    #[serde(default)]
    pub alt_dd_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblySettings {
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Module kinds whose descriptor must be present and valid
    #[serde(default)]
    pub require_descriptors: Vec<ModuleKind>,

    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

fn default_parallelism() -> usize {
    1
}

fn default_ignore_patterns() -> Vec<String> {
    AssemblyOptions::default().ignore_patterns
}

impl Default for AssemblySettings {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            require_descriptors: Vec::new(),
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("descriptors: {0}")]
    Descriptors(String),

    #[error("assembly: {0}")]
    Assembly(String),
}

impl EngineConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(raw) = &self.descriptors.alt_dd_prefix {
            for prefix in raw.split(',').map(str::trim) {
                if prefix.contains(['/', '\\']) || prefix == "." || prefix == ".." {
                    errors.push(ValidationError::Descriptors(format!(
                        "alt_dd_prefix entry '{}' must be a plain file name prefix",
                        prefix
                    )));
                }
            }
        }

        let parallelism = self.assembly.parallelism;
        if parallelism == 0 || parallelism > MAX_PARALLELISM {
            errors.push(ValidationError::Assembly(format!(
                "parallelism must be between 1 and {}, got {}",
                MAX_PARALLELISM, parallelism
            )));
        }

        if self.assembly.require_descriptors.contains(&ModuleKind::Unknown) {
            errors.push(ValidationError::Assembly(
                "require_descriptors cannot include 'unknown'".to_string(),
            ));
        }

        for pattern in &self.assembly.ignore_patterns {
            if pattern.trim().is_empty() {
                errors.push(ValidationError::Assembly(
                    "ignore_patterns cannot contain blank entries".to_string(),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Options for [`crate::assembly::ModuleAssembler`].
    pub fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions {
            alt_prefix: self
                .descriptors
                .alt_dd_prefix
                .as_deref()
                .and_then(AltPrefix::parse),
            parallelism: self.assembly.parallelism.max(1),
            require_descriptors: self.assembly.require_descriptors.clone(),
            ignore_patterns: self.assembly.ignore_patterns.clone(),
        }
    }
}
