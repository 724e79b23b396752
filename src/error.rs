//! Error types for descriptor resolution, unmarshalling, assembly and engine setup.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to determine whether a descriptor candidate exists.
///
/// Distinct from absence: a missing file is never an error.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("failed to probe descriptor candidate {path}: {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LocatorError {
    pub fn probe(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Probe {
            path: path.into(),
            source,
        }
    }
}

/// Why a single schema context rejected the input.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("document has no root element")]
    NoRootElement,

    #[error("expected root element <{expected}>, found <{found}>")]
    RootMismatch { expected: String, found: String },

    #[error("expected namespace {expected:?}, found {found:?}")]
    NamespaceMismatch {
        expected: Option<String>,
        found: Option<String>,
    },

    #[error("document is empty")]
    Empty,

    #[error("structure does not match schema: {0}")]
    Structure(#[from] quick_xml::DeError),
}

/// No candidate schema context could parse the input.
#[derive(Debug, Error)]
pub enum UnmarshalError {
    #[error("failed to read descriptor {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no schema context accepted the document (tried {}): {source}", .attempted.join(", "))]
    NoMatchingContext {
        attempted: Vec<String>,
        #[source]
        source: AttemptError,
    },

    #[error("no schema contexts supplied")]
    NoContexts,
}

impl UnmarshalError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Context ids tried before giving up, in order.
    pub fn attempted(&self) -> &[String] {
        match self {
            Self::NoMatchingContext { attempted, .. } => attempted,
            _ => &[],
        }
    }
}

/// Per-module failure recorded on a `ModuleInfo`.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error(transparent)]
    Locate(#[from] LocatorError),

    #[error(transparent)]
    Unmarshal(#[from] UnmarshalError),
}

/// Fatal failure of a whole configuration pass.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("application root does not exist: {path}")]
    AppRootMissing { path: PathBuf },

    #[error("application root is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("application root is not readable: {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan {path} for modules: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("module '{module}': mandatory descriptor {descriptor} could not be loaded: {source}")]
    MandatoryDescriptor {
        module: String,
        descriptor: &'static str,
        #[source]
        source: ModuleError,
    },

    #[error("module '{module}': mandatory descriptor {descriptor} is missing")]
    MissingDescriptor {
        module: String,
        descriptor: &'static str,
    },

    #[error("module '{uri}' listed in application.xml was not found at {path}")]
    MissingModule { uri: String, path: PathBuf },

    #[error("module '{uri}' listed in application.xml resolves outside the application: {path}")]
    ModuleOutsideApplication { uri: String, path: PathBuf },
}

impl ConfigurationError {
    /// Name of the module the error is attributed to, when there is one.
    pub fn module(&self) -> Option<&str> {
        match self {
            Self::MandatoryDescriptor { module, .. } | Self::MissingDescriptor { module, .. } => {
                Some(module)
            }
            Self::MissingModule { uri, .. } | Self::ModuleOutsideApplication { uri, .. } => {
                Some(uri)
            }
            _ => None,
        }
    }
}

/// Errors raised while setting up the engine itself (configuration, logging).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::ConfigError(err.to_string())
    }
}
