//! `application-client.xml`

use crate::unmarshal::{Schema, SchemaContext};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationClient {
    #[serde(rename = "@version", default)]
    pub version: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub callback_handler: Option<String>,
}

impl Schema for ApplicationClient {
    const CONTEXTS: &'static [SchemaContext] = platform_contexts!("application-client");

    fn empty() -> Option<Self> {
        Some(ApplicationClient::default())
    }
}
