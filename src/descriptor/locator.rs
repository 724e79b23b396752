//! Descriptor locator: resolves a descriptor identity inside a module root.

use crate::descriptor::{AltPrefix, DescriptorIdentity};
use crate::error::LocatorError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of locating a descriptor identity within a module root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDescriptor {
    /// A concrete file; `via_alt` is set when an alternate prefixed file won
    Found { path: PathBuf, via_alt: bool },
    Absent,
}

impl ResolvedDescriptor {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ResolvedDescriptor::Found { path, .. } => Some(path),
            ResolvedDescriptor::Absent => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolvedDescriptor::Found { .. })
    }

    pub fn via_alt(&self) -> bool {
        matches!(self, ResolvedDescriptor::Found { via_alt: true, .. })
    }
}

/// Locate `identity` under `module_root`.
///
/// Alternate names are probed first (when the identity allows it and a prefix
/// is given), then the canonical name. Nothing outside
/// `module_root/identity.directory` is ever consulted.
pub fn locate(
    module_root: &Path,
    identity: &DescriptorIdentity,
    alt_prefix: Option<&AltPrefix>,
) -> Result<ResolvedDescriptor, LocatorError> {
    let dir = module_root.join(identity.directory);

    if identity.alt_prefixable {
        if let Some(alt_prefix) = alt_prefix {
            for name in alt_prefix.candidates(identity.canonical_name) {
                let candidate = dir.join(&name);
                if probe(&candidate)? {
                    info!(
                        descriptor = identity.canonical_name,
                        path = %candidate.display(),
                        "AltDD {} -> {}",
                        identity.canonical_name,
                        candidate.display()
                    );
                    return Ok(ResolvedDescriptor::Found {
                        path: candidate,
                        via_alt: true,
                    });
                }
            }
        }
    }

    let canonical = dir.join(identity.canonical_name);
    if probe(&canonical)? {
        debug!(path = %canonical.display(), "Descriptor found");
        return Ok(ResolvedDescriptor::Found {
            path: canonical,
            via_alt: false,
        });
    }

    debug!(
        module_root = %module_root.display(),
        descriptor = identity.canonical_name,
        "Descriptor absent"
    );
    Ok(ResolvedDescriptor::Absent)
}

/// `Ok(true)` if `path` is an existing regular file.
fn probe(path: &Path) -> Result<bool, LocatorError> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(false),
        Err(e) => Err(LocatorError::probe(path, e)),
    }
}
