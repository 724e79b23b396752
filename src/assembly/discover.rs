//! Module discovery: finds candidate module directories and classifies them.
//!
//! Classification looks at descriptors first and falls back to directory
//! structure (compiled classes, web assets) when no descriptor decides it.

use crate::assembly::ModuleKind;
use crate::descriptor::{
    locate, AltPrefix, DescriptorIdentity, APPLICATION_CLIENT, BEANS, CONNECTOR, EJB_JAR,
    MANIFEST, WEB_APP, WEB_INF,
};
use crate::error::{ConfigurationError, LocatorError};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Descriptor directories never treated as modules of their own.
const RESERVED_DIRS: [&str; 2] = ["META-INF", "WEB-INF"];

/// How a module directory was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discovery {
    pub kind: ModuleKind,
    pub by_convention: bool,
}

/// Classify `dir`, descriptors first, structure second.
///
/// `Ok(None)` means the directory does not look like a module at all.
pub fn discover_module_kind(
    dir: &Path,
    alt_prefix: Option<&AltPrefix>,
    ignore_patterns: &[String],
) -> Result<Option<Discovery>, LocatorError> {
    if let Some(kind) = by_descriptor(dir, alt_prefix)? {
        return Ok(Some(Discovery {
            kind,
            by_convention: false,
        }));
    }

    Ok(by_convention(dir, ignore_patterns)?.map(|kind| Discovery {
        kind,
        by_convention: true,
    }))
}

/// Classify by descriptor presence.
pub fn by_descriptor(
    dir: &Path,
    alt_prefix: Option<&AltPrefix>,
) -> Result<Option<ModuleKind>, LocatorError> {
    let present = |identity: &DescriptorIdentity| -> Result<bool, LocatorError> {
        Ok(locate(dir, identity, alt_prefix)?.is_found())
    };

    if present(&CONNECTOR)? {
        return Ok(Some(ModuleKind::Connector));
    }

    if present(&WEB_APP)? || is_dir(&dir.join(WEB_INF))? || has_extension(dir, "war") {
        return Ok(Some(ModuleKind::Web));
    }

    if present(&EJB_JAR)? || present(&BEANS)? {
        return Ok(Some(ModuleKind::Ejb));
    }

    if present(&APPLICATION_CLIENT)? || has_main_class(dir, alt_prefix)? {
        return Ok(Some(ModuleKind::Client));
    }

    Ok(None)
}

/// Classify by structure: any compiled class makes an EJB module, web assets
/// at the top level make a web module.
pub fn by_convention(
    dir: &Path,
    ignore_patterns: &[String],
) -> Result<Option<ModuleKind>, LocatorError> {
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !should_ignore(entry, ignore_patterns));

    for entry in walker {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if entry.file_type().is_file() && has_extension(entry.path(), "class") {
            debug!(path = %entry.path().display(), "Compiled class found");
            return Ok(Some(ModuleKind::Ejb));
        }
    }

    let entries = fs::read_dir(dir).map_err(|e| LocatorError::probe(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| LocatorError::probe(dir, e))?;
        let path = entry.path();
        if ["jsp", "html", "htm"].iter().any(|ext| has_extension(&path, ext)) {
            debug!(path = %path.display(), "Web asset found");
            return Ok(Some(ModuleKind::Web));
        }
    }

    Ok(None)
}

/// Immediate subdirectories of `app_root` that may hold modules, sorted by name.
pub fn module_directories(
    app_root: &Path,
    ignore_patterns: &[String],
) -> Result<Vec<PathBuf>, ConfigurationError> {
    let walker = WalkDir::new(app_root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut dirs = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| ConfigurationError::Scan {
            path: app_root.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_dir() || should_ignore(&entry, ignore_patterns) {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if RESERVED_DIRS.iter().any(|r| name.eq_ignore_ascii_case(r)) {
            continue;
        }

        dirs.push(entry.into_path());
    }

    Ok(dirs)
}

/// Entries are pruned when their name matches a pattern, so a match on
/// any directory component hides everything beneath it.
fn should_ignore(entry: &DirEntry, ignore_patterns: &[String]) -> bool {
    // the walk root itself is never ignored
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    ignore_patterns.iter().any(|pattern| name == pattern.as_str())
}

fn has_main_class(dir: &Path, alt_prefix: Option<&AltPrefix>) -> Result<bool, LocatorError> {
    let resolved = locate(dir, &MANIFEST, alt_prefix)?;
    let Some(path) = resolved.path() else {
        return Ok(false);
    };

    let manifest = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::InvalidData => return Ok(false),
        Err(e) => return Err(LocatorError::probe(path, e)),
    };

    Ok(manifest.lines().any(|line| {
        line.split_once(':').is_some_and(|(key, value)| {
            key.trim().eq_ignore_ascii_case("Main-Class") && !value.trim().is_empty()
        })
    }))
}

fn is_dir(path: &Path) -> Result<bool, LocatorError> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_dir()),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(false),
        Err(e) => Err(LocatorError::probe(path, e)),
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
}

fn walk_error(dir: &Path, err: walkdir::Error) -> LocatorError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf());
    LocatorError::probe(path, io::Error::from(err))
}
