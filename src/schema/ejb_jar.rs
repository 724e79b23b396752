//! `ejb-jar.xml`

use crate::unmarshal::{Schema, SchemaContext};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EjbJar {
    #[serde(rename = "@version", default)]
    pub version: Option<String>,

    #[serde(rename = "@metadata-complete", default)]
    pub metadata_complete: Option<bool>,

    #[serde(default)]
    pub module_name: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub enterprise_beans: EnterpriseBeans,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnterpriseBeans {
    #[serde(default)]
    pub session: Vec<SessionBean>,

    #[serde(default)]
    pub message_driven: Vec<MessageDrivenBean>,

    #[serde(default)]
    pub entity: Vec<EntityBean>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionBean {
    pub ejb_name: String,
    #[serde(default)]
    pub ejb_class: Option<String>,
    #[serde(default)]
    pub session_type: Option<String>,
    #[serde(default)]
    pub business_local: Vec<String>,
    #[serde(default)]
    pub business_remote: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MessageDrivenBean {
    pub ejb_name: String,
    #[serde(default)]
    pub ejb_class: Option<String>,
    #[serde(default)]
    pub messaging_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EntityBean {
    pub ejb_name: String,
    #[serde(default)]
    pub ejb_class: Option<String>,
    #[serde(default)]
    pub persistence_type: Option<String>,
}

impl EjbJar {
    /// Names of all declared beans, in document order per bean kind.
    pub fn bean_names(&self) -> Vec<&str> {
        let beans = &self.enterprise_beans;
        beans
            .session
            .iter()
            .map(|b| b.ejb_name.as_str())
            .chain(beans.message_driven.iter().map(|b| b.ejb_name.as_str()))
            .chain(beans.entity.iter().map(|b| b.ejb_name.as_str()))
            .collect()
    }
}

impl Schema for EjbJar {
    const CONTEXTS: &'static [SchemaContext] = platform_contexts!("ejb-jar");

    /// An empty `ejb-jar.xml` only marks the module as an EJB module.
    fn empty() -> Option<Self> {
        Some(EjbJar::default())
    }
}
