//! Server configuration (`openejb.xml` / `tomee.xml`)
//!
//! Services are declared as elements whose text body is a properties block:
//!
//! ```xml
//! <tomee>
//!   <Resource id="OrdersDb" type="DataSource">
//!     JdbcUrl jdbc:hsqldb:file:data/orders
//!     UserName orders
//!   </Resource>
//! </tomee>
//! ```

use crate::effective::properties;
use crate::unmarshal::{Schema, SchemaContext};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServerConfig {
    #[serde(rename = "Container", default)]
    pub containers: Vec<ServiceDeclaration>,

    #[serde(rename = "Resource", default)]
    pub resources: Vec<ServiceDeclaration>,

    #[serde(rename = "Deployments", default)]
    pub deployments: Vec<Deployments>,
}

/// A `<Resource>` or `<Container>` declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceDeclaration {
    #[serde(rename = "@id")]
    pub id: String,

    /// Resource type, e.g. `DataSource` or `javax.sql.DataSource`
    #[serde(rename = "@type", default)]
    pub kind: Option<String>,

    /// Explicit provider template id
    #[serde(rename = "@provider", default)]
    pub provider: Option<String>,

    #[serde(rename = "$text", default)]
    pub body: String,
}

impl ServiceDeclaration {
    /// Properties assigned in the declaration body, in document order.
    pub fn properties(&self) -> Vec<(String, String)> {
        properties::parse(&self.body)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Deployments {
    #[serde(rename = "@dir", default)]
    pub dir: Option<String>,
    #[serde(rename = "@jar", default)]
    pub jar: Option<String>,
}

impl Schema for ServerConfig {
    const CONTEXTS: &'static [SchemaContext] = &[
        SchemaContext::new("tomee", "tomee", None),
        SchemaContext::new("openejb", "openejb", None),
        SchemaContext::new(
            "openejb-system",
            "openejb",
            Some("http://www.openejb.org/System/Configuration"),
        ),
    ];

    fn empty() -> Option<Self> {
        Some(ServerConfig::default())
    }
}
