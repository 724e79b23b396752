use crate::assembly::discover::{self, Discovery};
use crate::assembly::{AppInfo, LoadedDescriptor, ModuleDescriptor, ModuleInfo, ModuleKind};
use crate::descriptor::{locate, AltPrefix, ResolvedDescriptor, APPLICATION};
use crate::error::{ConfigurationError, LocatorError, ModuleError, UnmarshalError};
use crate::schema::{Application, ApplicationClient, Connector, EjbJar, ModuleRef, WebApp};
use crate::unmarshal::{unmarshal_file, ConfigTree};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

const ARCHIVE_EXTENSIONS: [&str; 4] = ["jar", "war", "rar", "ear"];

/// Options for one configuration pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyOptions {
    /// Alternate descriptor prefixes, highest precedence first
    pub alt_prefix: Option<AltPrefix>,
    /// Worker threads for per-module work; 1 processes modules sequentially
    pub parallelism: usize,
    /// Module kinds whose descriptor must be present and valid
    pub require_descriptors: Vec<ModuleKind>,
    /// Directory names skipped while discovering modules
    pub ignore_patterns: Vec<String>,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            alt_prefix: None,
            parallelism: 1,
            require_descriptors: Vec::new(),
            ignore_patterns: vec![".git".to_string(), ".svn".to_string()],
        }
    }
}

/// A module that still needs its descriptor loaded.
#[derive(Debug, Clone)]
struct Candidate {
    module_id: String,
    root: PathBuf,
    kind: ModuleKind,
    by_convention: bool,
    context_root: Option<String>,
}

/// Discovery outcome for one module, in discovery order.
enum Planned {
    Pending(Candidate),
    /// Classification failed; nothing left to load
    Recorded(ModuleInfo),
}

/// Builds an [`AppInfo`] from an exploded application directory.
#[derive(Debug, Clone, Default)]
pub struct ModuleAssembler {
    options: AssemblyOptions,
}

impl ModuleAssembler {
    pub fn new(options: AssemblyOptions) -> Self {
        Self { options }
    }

    /// Discover, locate and unmarshal every module under `app_root`.
    ///
    /// Per-module failures are recorded on the returned modules. The pass
    /// only fails as a whole when the root is unusable, when an EAR's
    /// `application.xml` cannot be loaded or names a missing module, or when
    /// a module of a required kind has no usable descriptor. With several
    /// fatal errors the first one in discovery order is returned.
    #[instrument(skip_all, fields(app_root = %app_root.display()))]
    pub fn configure_application(&self, app_root: &Path) -> Result<AppInfo, ConfigurationError> {
        let start = Instant::now();
        info!(
            parallelism = self.options.parallelism,
            alt_prefix = ?self.options.alt_prefix.as_ref().map(ToString::to_string),
            "Configuring application"
        );

        let app_root = check_app_root(app_root)?;
        let (application, planned) = self.plan(&app_root)?;
        let modules = self.run(planned)?;

        let failed = modules.iter().filter(|m| m.is_failed()).count();
        info!(
            module_count = modules.len(),
            failed_count = failed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Application configured"
        );

        Ok(AppInfo {
            app_root,
            application,
            modules,
        })
    }

    fn alt_prefix(&self) -> Option<&AltPrefix> {
        self.options.alt_prefix.as_ref()
    }

    fn plan(
        &self,
        app_root: &Path,
    ) -> Result<(Option<ConfigTree<Application>>, Vec<Planned>), ConfigurationError> {
        let app_id = module_id_for(app_root);

        let resolved = locate(app_root, &APPLICATION, self.alt_prefix()).map_err(|e| {
            ConfigurationError::MandatoryDescriptor {
                module: app_id.clone(),
                descriptor: APPLICATION.canonical_name,
                source: e.into(),
            }
        })?;

        if let ResolvedDescriptor::Found { path, via_alt } = resolved {
            debug!(path = %path.display(), via_alt, "Application descriptor found");
            let tree = unmarshal_file::<Application>(&path).map_err(|e| {
                ConfigurationError::MandatoryDescriptor {
                    module: app_id,
                    descriptor: APPLICATION.canonical_name,
                    source: e.into(),
                }
            })?;
            let planned = self.plan_ear(app_root, &tree.root)?;
            return Ok((Some(tree), planned));
        }

        match discover::by_descriptor(app_root, self.alt_prefix()) {
            Ok(Some(kind)) => {
                let discovery = Discovery {
                    kind,
                    by_convention: false,
                };
                return Ok((None, vec![pending(app_id, app_root, discovery, None)]));
            }
            Ok(None) => {}
            Err(e) => return Ok((None, vec![unclassified(app_id, app_root, e)])),
        }

        let mut planned = Vec::new();
        let mut seen = HashSet::new();
        let mut ids = ModuleIds::default();
        for dir in discover::module_directories(app_root, &self.options.ignore_patterns)? {
            if !seen.insert(canonical(&dir)) {
                debug!(dir = %dir.display(), "Module root already discovered, skipping");
                continue;
            }
            match discover::discover_module_kind(
                &dir,
                self.alt_prefix(),
                &self.options.ignore_patterns,
            ) {
                Ok(Some(discovery)) => {
                    planned.push(pending(ids.assign(&dir), &dir, discovery, None))
                }
                Ok(None) => debug!(dir = %dir.display(), "Not a module, skipping"),
                Err(e) => planned.push(unclassified(ids.assign(&dir), &dir, e)),
            }
        }

        if planned.is_empty() {
            match discover::by_convention(app_root, &self.options.ignore_patterns) {
                Ok(Some(kind)) => {
                    let discovery = Discovery {
                        kind,
                        by_convention: true,
                    };
                    planned.push(pending(app_id, app_root, discovery, None));
                }
                Ok(None) => info!("No modules found"),
                Err(e) => planned.push(unclassified(app_id, app_root, e)),
            }
        }

        Ok((None, planned))
    }

    /// Modules listed by `application.xml`, in declaration order.
    fn plan_ear(
        &self,
        app_root: &Path,
        application: &Application,
    ) -> Result<Vec<Planned>, ConfigurationError> {
        let mut planned = Vec::new();
        let mut seen = HashSet::new();
        let mut ids = ModuleIds::default();

        for reference in application.modules() {
            let uri = reference.uri();
            let root = resolve_module_uri(app_root, uri).ok_or_else(|| {
                ConfigurationError::MissingModule {
                    uri: uri.to_string(),
                    path: app_root.join(uri),
                }
            })?;
            if !root.starts_with(app_root) {
                return Err(ConfigurationError::ModuleOutsideApplication {
                    uri: uri.to_string(),
                    path: root,
                });
            }

            if !seen.insert(root.clone()) {
                warn!(uri, "Module listed more than once in application.xml, skipping");
                continue;
            }

            let (kind, context_root) = match reference {
                ModuleRef::Ejb(_) => (ModuleKind::Ejb, None),
                ModuleRef::Web { context_root, .. } => {
                    (ModuleKind::Web, context_root.map(str::to_string))
                }
                ModuleRef::Connector(_) => (ModuleKind::Connector, None),
                ModuleRef::Client(_) => (ModuleKind::Client, None),
            };
            let discovery = Discovery {
                kind,
                by_convention: false,
            };
            let module_id = ids.assign(Path::new(uri));
            planned.push(pending(module_id, &root, discovery, context_root));
        }

        Ok(planned)
    }

    fn run(&self, planned: Vec<Planned>) -> Result<Vec<ModuleInfo>, ConfigurationError> {
        let mut outcomes = Vec::with_capacity(planned.len());
        let mut pending = Vec::new();

        for (index, item) in planned.into_iter().enumerate() {
            match item {
                Planned::Recorded(info) => outcomes.push((index, Ok(info))),
                Planned::Pending(candidate) => pending.push((index, candidate)),
            }
        }

        let workers = self.options.parallelism.max(1).min(pending.len());
        if workers <= 1 {
            outcomes.extend(
                pending
                    .iter()
                    .map(|(index, candidate)| (*index, self.load(candidate))),
            );
        } else {
            outcomes.extend(self.load_parallel(&pending, workers));
        }

        outcomes.sort_by_key(|(index, _)| *index);
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }

    fn load_parallel(
        &self,
        pending: &[(usize, Candidate)],
        workers: usize,
    ) -> Vec<(usize, Result<ModuleInfo, ConfigurationError>)> {
        debug!(workers, modules = pending.len(), "Loading modules in parallel");
        let next = AtomicUsize::new(0);
        let results = Mutex::new(Vec::with_capacity(pending.len()));

        std::thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    let slot = next.fetch_add(1, Ordering::Relaxed);
                    let Some((index, candidate)) = pending.get(slot) else {
                        break;
                    };
                    let outcome = self.load(candidate);
                    results.lock().push((*index, outcome));
                });
            }
        });

        results.into_inner()
    }

    /// Locate and unmarshal one module's descriptor.
    fn load(&self, candidate: &Candidate) -> Result<ModuleInfo, ConfigurationError> {
        let descriptor = match candidate.kind.descriptor() {
            None => Ok(None),
            Some(identity) => match locate(&candidate.root, identity, self.alt_prefix()) {
                Err(e) => Err(ModuleError::from(e)),
                Ok(ResolvedDescriptor::Absent) => Ok(None),
                Ok(ResolvedDescriptor::Found { path, via_alt }) => {
                    match load_descriptor(candidate.kind, &path) {
                        Ok(tree) => Ok(Some(LoadedDescriptor {
                            path,
                            via_alt,
                            tree,
                        })),
                        Err(e) => Err(ModuleError::from(e)),
                    }
                }
            },
        };

        let required = self.options.require_descriptors.contains(&candidate.kind);
        let descriptor = match (descriptor, candidate.kind.descriptor()) {
            (Err(source), Some(identity)) if required => {
                return Err(ConfigurationError::MandatoryDescriptor {
                    module: candidate.module_id.clone(),
                    descriptor: identity.canonical_name,
                    source,
                })
            }
            (Ok(None), Some(identity)) if required => {
                return Err(ConfigurationError::MissingDescriptor {
                    module: candidate.module_id.clone(),
                    descriptor: identity.canonical_name,
                })
            }
            (descriptor, _) => descriptor,
        };

        match &descriptor {
            Ok(Some(loaded)) => debug!(
                module = %candidate.module_id,
                kind = %candidate.kind,
                context = loaded.tree.context(),
                via_alt = loaded.via_alt,
                "Module configured"
            ),
            Ok(None) => debug!(
                module = %candidate.module_id,
                kind = %candidate.kind,
                "No descriptor, using defaults"
            ),
            Err(e) => warn!(
                module = %candidate.module_id,
                kind = %candidate.kind,
                error = %e,
                "Module descriptor failed to load"
            ),
        }

        Ok(ModuleInfo {
            module_id: candidate.module_id.clone(),
            root: candidate.root.clone(),
            kind: candidate.kind,
            by_convention: candidate.by_convention,
            context_root: candidate.context_root.clone(),
            descriptor,
        })
    }
}

fn load_descriptor(kind: ModuleKind, path: &Path) -> Result<ModuleDescriptor, UnmarshalError> {
    match kind {
        ModuleKind::Ejb => unmarshal_file::<EjbJar>(path).map(ModuleDescriptor::EjbJar),
        ModuleKind::Web => unmarshal_file::<WebApp>(path).map(ModuleDescriptor::WebApp),
        ModuleKind::Connector => unmarshal_file::<Connector>(path).map(ModuleDescriptor::Connector),
        ModuleKind::Client => {
            unmarshal_file::<ApplicationClient>(path).map(ModuleDescriptor::ApplicationClient)
        }
        ModuleKind::Unknown => Err(UnmarshalError::NoContexts),
    }
}

fn pending(
    module_id: String,
    root: &Path,
    discovery: Discovery,
    context_root: Option<String>,
) -> Planned {
    Planned::Pending(Candidate {
        module_id,
        root: root.to_path_buf(),
        kind: discovery.kind,
        by_convention: discovery.by_convention,
        context_root,
    })
}

fn unclassified(module_id: String, root: &Path, error: LocatorError) -> Planned {
    warn!(module = %module_id, error = %error, "Module could not be classified");
    Planned::Recorded(ModuleInfo {
        module_id,
        root: root.to_path_buf(),
        kind: ModuleKind::Unknown,
        by_convention: false,
        context_root: None,
        descriptor: Err(error.into()),
    })
}

fn check_app_root(app_root: &Path) -> Result<PathBuf, ConfigurationError> {
    let metadata = std::fs::metadata(app_root).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigurationError::AppRootMissing {
            path: app_root.to_path_buf(),
        },
        _ => ConfigurationError::Unreadable {
            path: app_root.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_dir() {
        return Err(ConfigurationError::NotADirectory {
            path: app_root.to_path_buf(),
        });
    }

    std::fs::read_dir(app_root).map_err(|e| ConfigurationError::Unreadable {
        path: app_root.to_path_buf(),
        source: e,
    })?;

    dunce::canonicalize(app_root).map_err(|e| ConfigurationError::Unreadable {
        path: app_root.to_path_buf(),
        source: e,
    })
}

/// Canonical exploded directory for an `application.xml` module uri.
/// `beans.jar` may be exploded either as `beans.jar/` or as `beans/`.
fn resolve_module_uri(app_root: &Path, uri: &str) -> Option<PathBuf> {
    let direct = app_root.join(uri);
    if direct.is_dir() {
        return Some(canonical(&direct));
    }

    let stem = Path::new(uri).with_extension("");
    let exploded = app_root.join(stem);
    exploded.is_dir().then(|| canonical(&exploded))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn module_id_for(path: &Path) -> String {
    let name = file_name(path);
    let archive = |ext: &str| ARCHIVE_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext));
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && archive(ext) => stem.to_string(),
        _ => name,
    }
}

/// Module ids handed out during one pass. Ids stay unique: a stripped id that
/// is already taken falls back to the full directory name, then to a counter.
#[derive(Debug, Default)]
struct ModuleIds {
    taken: HashSet<String>,
}

impl ModuleIds {
    fn assign(&mut self, path: &Path) -> String {
        let stripped = module_id_for(path);
        if self.taken.insert(stripped.clone()) {
            return stripped;
        }

        let full = file_name(path);
        if self.taken.insert(full.clone()) {
            return full;
        }

        let mut n = 2;
        loop {
            let candidate = format!("{}#{}", full, n);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
