//! `application.xml`: the EAR deployment descriptor

use crate::unmarshal::{Schema, SchemaContext};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Application {
    #[serde(rename = "@version", default)]
    pub version: Option<String>,

    #[serde(default)]
    pub application_name: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub module: Vec<ApplicationModule>,

    #[serde(default)]
    pub library_directory: Option<String>,
}

/// One `<module>` entry; exactly one of the fields is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationModule {
    #[serde(default)]
    pub ejb: Option<String>,
    #[serde(default)]
    pub java: Option<String>,
    #[serde(default)]
    pub connector: Option<String>,
    #[serde(default)]
    pub web: Option<WebModuleRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebModuleRef {
    pub web_uri: String,
    #[serde(default)]
    pub context_root: Option<String>,
}

/// A module reference resolved from an `<module>` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleRef<'a> {
    Ejb(&'a str),
    Web {
        uri: &'a str,
        context_root: Option<&'a str>,
    },
    Connector(&'a str),
    Client(&'a str),
}

impl<'a> ModuleRef<'a> {
    pub fn uri(&self) -> &'a str {
        match *self {
            ModuleRef::Ejb(uri) | ModuleRef::Connector(uri) | ModuleRef::Client(uri) => uri,
            ModuleRef::Web { uri, .. } => uri,
        }
    }
}

impl ApplicationModule {
    pub fn reference(&self) -> Option<ModuleRef<'_>> {
        if let Some(uri) = &self.ejb {
            return Some(ModuleRef::Ejb(uri.trim()));
        }
        if let Some(web) = &self.web {
            return Some(ModuleRef::Web {
                uri: web.web_uri.trim(),
                context_root: web.context_root.as_deref().map(str::trim),
            });
        }
        if let Some(uri) = &self.connector {
            return Some(ModuleRef::Connector(uri.trim()));
        }
        self.java.as_deref().map(|uri| ModuleRef::Client(uri.trim()))
    }
}

impl Application {
    /// Module references in declaration order; entries naming nothing are skipped.
    pub fn modules(&self) -> Vec<ModuleRef<'_>> {
        self.module.iter().filter_map(ApplicationModule::reference).collect()
    }
}

impl Schema for Application {
    const CONTEXTS: &'static [SchemaContext] = platform_contexts!("application");
}
