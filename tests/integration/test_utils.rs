//! Shared test utilities for integration tests
//!
//! Builds exploded application layouts in a temp dir and serializes access to
//! process environment variables.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub const EJB_JAR: &str = r#"<ejb-jar xmlns="https://jakarta.ee/xml/ns/jakartaee" version="4.0">
  <enterprise-beans>
    <session><ejb-name>CartBean</ejb-name></session>
  </enterprise-beans>
</ejb-jar>"#;

pub const TEST_EJB_JAR: &str = r#"<ejb-jar xmlns="https://jakarta.ee/xml/ns/jakartaee" version="4.0">
  <enterprise-beans>
    <session><ejb-name>MockCartBean</ejb-name></session>
  </enterprise-beans>
</ejb-jar>"#;

pub const WEB_XML: &str = r#"<web-app xmlns="http://xmlns.jcp.org/xml/ns/javaee" version="4.0">
  <display-name>Store</display-name>
</web-app>"#;

pub const BROKEN_XML: &str = "<ejb-jar><enterprise-beans><session>";

/// An exploded application directory under construction.
pub struct AppFixture {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl AppFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("app");
        fs::create_dir_all(&root).unwrap();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `contents` at `relative`, creating parent directories.
    pub fn file(&self, relative: &str, contents: &str) -> &Self {
        let path = self.root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }

    pub fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.root.join(relative)).unwrap();
        self
    }
}

/// Restores the listed variables when dropped; holds the env lock meanwhile.
pub struct EnvGuard {
    saved: Vec<(String, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub fn set(vars: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let saved = vars
            .iter()
            .map(|(key, _)| (key.to_string(), std::env::var_os(key)))
            .collect();
        for (key, value) in vars {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
        Self { saved, _lock: lock }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}
