//! Effective Config Merger
//!
//! Flattens server configuration into one effective key/value view per
//! resource: provider template defaults first, then the base server tree,
//! then each override in order. The output records which layer last set each
//! value so diagnostics can explain where a setting came from.

mod merge;
pub mod properties;
pub mod render;
pub mod templates;

pub use merge::compute_effective;
pub use render::{render_json, render_properties};
pub use templates::{ProviderTemplates, ResourceTemplate};

use crate::descriptor::{locate, AltPrefix, ResolvedDescriptor, OPENEJB_XML, TOMEE_XML};
use crate::error::ModuleError;
use crate::schema::ServerConfig;
use crate::unmarshal::{unmarshal_file, ConfigTree};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Layer that last set an effective value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "layer", content = "name", rename_all = "snake_case")]
pub enum SourceLayer {
    Template,
    Base,
    Override(String),
}

/// One flattened property of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveProperty {
    pub key: String,
    pub value: String,
    pub source: SourceLayer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveResource {
    pub id: String,
    pub kind: Option<String>,
    /// Id of the provider template that supplied defaults, if any
    pub template: Option<String>,
    pub properties: Vec<EffectiveProperty>,
}

impl EffectiveResource {
    /// Case-insensitive property lookup.
    pub fn get(&self, key: &str) -> Option<&EffectiveProperty> {
        self.properties
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
    }
}

/// Merger output: resources in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub resources: Vec<EffectiveResource>,
}

impl EffectiveConfig {
    pub fn resource(&self, id: &str) -> Option<&EffectiveResource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn property(&self, resource: &str, key: &str) -> Option<&EffectiveProperty> {
        self.resource(resource).and_then(|r| r.get(key))
    }

    /// Every property with its owning resource id, in output order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &EffectiveProperty)> {
        self.resources
            .iter()
            .flat_map(|r| r.properties.iter().map(move |p| (r.id.as_str(), p)))
    }
}

/// An override layer applied after the base tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Override {
    /// A server configuration tree, typically an environment-specific file
    Tree {
        name: String,
        tree: ConfigTree<ServerConfig>,
    },
    /// Flat `<resource id>.<property>=value` assignments
    Properties {
        name: String,
        entries: Vec<(String, String)>,
    },
}

impl Override {
    pub fn tree(name: impl Into<String>, tree: ConfigTree<ServerConfig>) -> Self {
        Override::Tree {
            name: name.into(),
            tree,
        }
    }

    pub fn properties<K, V>(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Override::Properties {
            name: name.into(),
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Override::Tree { name, .. } | Override::Properties { name, .. } => name,
        }
    }
}

/// Load the server configuration under `server_root`.
///
/// `conf/tomee.xml` takes precedence over `conf/openejb.xml`; either may be
/// replaced by an alternate file such as `conf/test-tomee.xml`. Returns
/// `Ok(None)` when neither file exists.
pub fn load_server_config(
    server_root: &Path,
    alt_prefix: Option<&AltPrefix>,
) -> Result<Option<ConfigTree<ServerConfig>>, ModuleError> {
    for identity in [&TOMEE_XML, &OPENEJB_XML] {
        if let ResolvedDescriptor::Found { path, via_alt } =
            locate(server_root, identity, alt_prefix)?
        {
            debug!(path = %path.display(), via_alt, "Server configuration found");
            return Ok(Some(unmarshal_file(&path)?));
        }
    }
    Ok(None)
}
