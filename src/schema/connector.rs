//! `ra.xml`

use crate::unmarshal::{Schema, SchemaContext};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Connector {
    #[serde(rename = "@version", default)]
    pub version: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub vendor_name: Option<String>,

    #[serde(default)]
    pub eis_type: Option<String>,

    #[serde(default)]
    pub resourceadapter: Option<ResourceAdapter>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResourceAdapter {
    #[serde(default)]
    pub resourceadapter_class: Option<String>,
}

impl Schema for Connector {
    const CONTEXTS: &'static [SchemaContext] = platform_contexts!("connector");
}
