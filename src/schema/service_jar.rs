//! `service-jar.xml`: provider templates supplying default service properties

use crate::effective::properties;
use crate::unmarshal::{Schema, SchemaContext};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceJar {
    #[serde(rename = "ServiceProvider", default)]
    pub providers: Vec<ServiceProvider>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceProvider {
    #[serde(rename = "@id")]
    pub id: String,

    /// `Resource`, `Container`, ...
    #[serde(rename = "@service", default)]
    pub service: Option<String>,

    /// Comma-separated resource types this provider serves
    #[serde(rename = "@types", default)]
    pub types: Option<String>,

    #[serde(rename = "@class-name", default)]
    pub class_name: Option<String>,

    #[serde(rename = "$text", default)]
    pub body: String,
}

impl ServiceProvider {
    pub fn types(&self) -> Vec<String> {
        self.types
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn properties(&self) -> Vec<(String, String)> {
        properties::parse(&self.body)
    }
}

impl Schema for ServiceJar {
    const CONTEXTS: &'static [SchemaContext] = &[
        SchemaContext::new("service-jar", "ServiceJar", None),
        SchemaContext::new(
            "service-jar-ns",
            "ServiceJar",
            Some("http://www.openejb.org/Service/Configuration"),
        ),
    ];
}
