//! Resource provider templates: default properties per resource kind.

use crate::schema::ServiceJar;
use crate::unmarshal::ConfigTree;
use serde::Serialize;

/// Default properties a provider applies to every resource it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceTemplate {
    /// Provider id, e.g. `Default JDBC Database`
    pub id: String,
    /// Resource kinds (declared `type` values) this template serves
    pub types: Vec<String>,
    /// Default properties in declaration order
    pub defaults: Vec<(String, String)>,
}

impl ResourceTemplate {
    pub fn new(id: impl Into<String>, types: &[&str], defaults: &[(&str, &str)]) -> Self {
        Self {
            id: id.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
            defaults: defaults
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn serves(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(kind))
    }

    pub fn default_for(&self, key: &str) -> Option<&str> {
        self.defaults
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Ordered template table. Earlier templates win type lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderTemplates {
    templates: Vec<ResourceTemplate>,
}

impl ProviderTemplates {
    pub fn new(templates: Vec<ResourceTemplate>) -> Self {
        Self { templates }
    }

    /// The container's stock providers.
    pub fn builtin() -> Self {
        Self::new(vec![
            ResourceTemplate::new(
                "Default JDBC Database",
                &["DataSource", "javax.sql.DataSource", "jakarta.sql.DataSource"],
                &[
                    ("JtaManaged", "true"),
                    ("JdbcDriver", "org.hsqldb.jdbcDriver"),
                    ("JdbcUrl", "jdbc:hsqldb:mem:hsqldb"),
                    ("UserName", "sa"),
                    ("Password", ""),
                    ("PasswordCipher", "PlainText"),
                    ("ConnectionProperties", ""),
                    ("DefaultAutoCommit", "true"),
                    ("InitialSize", "0"),
                    ("MaxActive", "20"),
                    ("MaxIdle", "20"),
                    ("MinIdle", "0"),
                    ("MaxWaitTime", "-1 millisecond"),
                    ("ValidationQuery", ""),
                    ("TestOnBorrow", "true"),
                    ("TestOnReturn", "false"),
                    ("TestWhileIdle", "false"),
                ],
            ),
            ResourceTemplate::new(
                "Default JMS Resource Adapter",
                &["ActiveMQResourceAdapter"],
                &[
                    ("BrokerXmlConfig", "broker:(tcp://localhost:61616)?useJmx=false"),
                    ("ServerUrl", "vm://localhost?waitForStart=20000&async=true"),
                    ("DataSource", ""),
                    ("StartupTimeout", "10 seconds"),
                ],
            ),
            ResourceTemplate::new(
                "Default JMS Connection Factory",
                &[
                    "ConnectionFactory",
                    "javax.jms.ConnectionFactory",
                    "jakarta.jms.ConnectionFactory",
                    "QueueConnectionFactory",
                    "TopicConnectionFactory",
                ],
                &[
                    ("ResourceAdapter", "Default JMS Resource Adapter"),
                    ("TransactionSupport", "xa"),
                    ("PoolMaxSize", "10"),
                    ("PoolMinSize", "0"),
                    ("ConnectionMaxWaitTime", "5 seconds"),
                    ("ConnectionMaxIdleTime", "15 Minutes"),
                ],
            ),
            ResourceTemplate::new(
                "Default Queue",
                &["Queue", "javax.jms.Queue", "jakarta.jms.Queue"],
                &[("destination", "")],
            ),
            ResourceTemplate::new(
                "Default Topic",
                &["Topic", "javax.jms.Topic", "jakarta.jms.Topic"],
                &[("destination", "")],
            ),
            ResourceTemplate::new(
                "Default Executor Service",
                &[
                    "ManagedExecutorService",
                    "javax.enterprise.concurrent.ManagedExecutorService",
                    "jakarta.enterprise.concurrent.ManagedExecutorService",
                ],
                &[
                    ("Core", "5"),
                    ("Max", "25"),
                    ("KeepAlive", "5 s"),
                    ("Queue", "15"),
                ],
            ),
        ])
    }

    /// Templates declared by a `service-jar.xml` tree.
    pub fn from_service_jar(tree: &ConfigTree<ServiceJar>) -> Self {
        Self::new(
            tree.root
                .providers
                .iter()
                .map(|provider| ResourceTemplate {
                    id: provider.id.clone(),
                    types: provider.types(),
                    defaults: provider.properties(),
                })
                .collect(),
        )
    }

    pub fn templates(&self) -> &[ResourceTemplate] {
        &self.templates
    }

    pub fn by_id(&self, id: &str) -> Option<&ResourceTemplate> {
        self.templates.iter().find(|t| t.id.eq_ignore_ascii_case(id))
    }

    pub fn by_kind(&self, kind: &str) -> Option<&ResourceTemplate> {
        self.templates.iter().find(|t| t.serves(kind))
    }

    /// Explicit provider first, then resource kind.
    pub fn resolve(&self, provider: Option<&str>, kind: Option<&str>) -> Option<&ResourceTemplate> {
        provider
            .and_then(|p| self.by_id(p))
            .or_else(|| kind.and_then(|k| self.by_kind(k)))
    }
}
