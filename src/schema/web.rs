//! `WEB-INF/web.xml`

use crate::unmarshal::{Schema, SchemaContext};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebApp {
    #[serde(rename = "@version", default)]
    pub version: Option<String>,

    #[serde(default)]
    pub module_name: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub context_param: Vec<ParamValue>,

    #[serde(default)]
    pub servlet: Vec<Servlet>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParamValue {
    pub param_name: String,
    #[serde(default)]
    pub param_value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Servlet {
    pub servlet_name: String,
    #[serde(default)]
    pub servlet_class: Option<String>,
}

impl Schema for WebApp {
    const CONTEXTS: &'static [SchemaContext] = platform_contexts!("web-app");
}
