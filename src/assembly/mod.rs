//! Module Assembler
//!
//! Drives the locator and unmarshaller across every module of an application
//! directory and aggregates the results into an [`AppInfo`]. Per-module
//! failures are recorded on the module instead of aborting the pass, so the
//! outcome of each module is an explicit `Result` inside its [`ModuleInfo`].

mod assembler;
pub mod discover;

pub use assembler::{AssemblyOptions, ModuleAssembler};

use crate::descriptor::{
    DescriptorIdentity, APPLICATION_CLIENT, CONNECTOR, EJB_JAR, WEB_APP,
};
use crate::error::ModuleError;
use crate::schema::{Application, ApplicationClient, Connector, EjbJar, WebApp};
use crate::unmarshal::ConfigTree;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind of deployable module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Ejb,
    Web,
    Connector,
    Client,
    /// Classification itself failed; only ever carries a recorded error
    Unknown,
}

impl ModuleKind {
    /// The descriptor that configures modules of this kind.
    pub fn descriptor(&self) -> Option<&'static DescriptorIdentity> {
        match self {
            ModuleKind::Ejb => Some(&EJB_JAR),
            ModuleKind::Web => Some(&WEB_APP),
            ModuleKind::Connector => Some(&CONNECTOR),
            ModuleKind::Client => Some(&APPLICATION_CLIENT),
            ModuleKind::Unknown => None,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModuleKind::Ejb => "ejb",
            ModuleKind::Web => "web",
            ModuleKind::Connector => "connector",
            ModuleKind::Client => "client",
            ModuleKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A parsed module descriptor, tagged by module kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleDescriptor {
    EjbJar(ConfigTree<EjbJar>),
    WebApp(ConfigTree<WebApp>),
    Connector(ConfigTree<Connector>),
    ApplicationClient(ConfigTree<ApplicationClient>),
}

impl ModuleDescriptor {
    /// Schema context that parsed the descriptor.
    pub fn context(&self) -> &'static str {
        match self {
            ModuleDescriptor::EjbJar(tree) => tree.context,
            ModuleDescriptor::WebApp(tree) => tree.context,
            ModuleDescriptor::Connector(tree) => tree.context,
            ModuleDescriptor::ApplicationClient(tree) => tree.context,
        }
    }
}

/// A descriptor that was located and parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDescriptor {
    pub path: PathBuf,
    pub via_alt: bool,
    pub tree: ModuleDescriptor,
}

/// One discovered module and the outcome of configuring it.
#[derive(Debug)]
pub struct ModuleInfo {
    pub module_id: String,
    pub root: PathBuf,
    pub kind: ModuleKind,
    /// Identified by structure (compiled classes, web assets) rather than a descriptor
    pub by_convention: bool,
    /// Context root declared in `application.xml`, for web modules
    pub context_root: Option<String>,
    /// `Ok(None)` when the module has no descriptor and runs with defaults
    pub descriptor: Result<Option<LoadedDescriptor>, ModuleError>,
}

impl ModuleInfo {
    pub fn is_failed(&self) -> bool {
        self.descriptor.is_err()
    }

    pub fn error(&self) -> Option<&ModuleError> {
        self.descriptor.as_ref().err()
    }

    pub fn loaded(&self) -> Option<&LoadedDescriptor> {
        self.descriptor.as_ref().ok().and_then(Option::as_ref)
    }

    pub fn ejb_jar(&self) -> Option<&ConfigTree<EjbJar>> {
        match self.loaded().map(|l| &l.tree) {
            Some(ModuleDescriptor::EjbJar(tree)) => Some(tree),
            _ => None,
        }
    }

    pub fn web_app(&self) -> Option<&ConfigTree<WebApp>> {
        match self.loaded().map(|l| &l.tree) {
            Some(ModuleDescriptor::WebApp(tree)) => Some(tree),
            _ => None,
        }
    }
}

/// Application-level model produced by one configuration pass.
#[derive(Debug)]
pub struct AppInfo {
    pub app_root: PathBuf,
    /// `application.xml`, when the application is an EAR
    pub application: Option<ConfigTree<Application>>,
    /// Modules in discovery order
    pub modules: Vec<ModuleInfo>,
}

impl AppInfo {
    pub fn of_kind(&self, kind: ModuleKind) -> impl Iterator<Item = &ModuleInfo> {
        self.modules.iter().filter(move |m| m.kind == kind)
    }

    pub fn ejb_jars(&self) -> impl Iterator<Item = &ModuleInfo> {
        self.of_kind(ModuleKind::Ejb)
    }

    pub fn web_apps(&self) -> impl Iterator<Item = &ModuleInfo> {
        self.of_kind(ModuleKind::Web)
    }

    pub fn connectors(&self) -> impl Iterator<Item = &ModuleInfo> {
        self.of_kind(ModuleKind::Connector)
    }

    pub fn clients(&self) -> impl Iterator<Item = &ModuleInfo> {
        self.of_kind(ModuleKind::Client)
    }

    pub fn failed(&self) -> impl Iterator<Item = &ModuleInfo> {
        self.modules.iter().filter(|m| m.is_failed())
    }

    pub fn module(&self, module_id: &str) -> Option<&ModuleInfo> {
        self.modules.iter().find(|m| m.module_id == module_id)
    }
}
