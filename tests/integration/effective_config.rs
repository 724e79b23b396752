//! Integration tests for the effective configuration merge

use ddconf::effective::{
    compute_effective, load_server_config, render_json, render_properties, Override,
    ProviderTemplates, ResourceTemplate, SourceLayer,
};
use ddconf::error::ModuleError;
use ddconf::schema::{ServerConfig, ServiceJar};
use ddconf::unmarshal::{unmarshal_default, unmarshal_file, ConfigTree};
use ddconf::AltPrefix;
use std::fs;
use tempfile::TempDir;

fn server(doc: &str) -> ConfigTree<ServerConfig> {
    unmarshal_default::<ServerConfig>(doc.as_bytes()).unwrap()
}

#[test]
fn test_builtin_jdbc_default_is_rendered() {
    let base = server(
        r#"<tomee>
  <Resource id="OrdersDb" type="DataSource">
    JdbcUrl jdbc:hsqldb:file:data/orders
  </Resource>
</tomee>"#,
    );

    let effective = compute_effective(&base, &[], &ProviderTemplates::builtin());
    let rendered = render_properties(&effective);

    assert!(rendered.starts_with("# Resource(id=OrdersDb, type=DataSource)\n"));
    assert!(rendered.lines().any(|line| line == "JdbcDriver=org.hsqldb.jdbcDriver"));
    assert!(rendered.lines().any(|line| line == "JdbcUrl=jdbc:hsqldb:file:data/orders"));
}

#[test]
fn test_layered_precedence_with_service_jar_templates() {
    let temp_dir = TempDir::new().unwrap();
    let service_jar = temp_dir.path().join("service-jar.xml");
    fs::write(
        &service_jar,
        r#"<ServiceJar>
  <ServiceProvider id="Pool" service="Resource" types="DataSource" class-name="org.acme.Pool">
    JdbcDriver C
    MaxConnections 10
  </ServiceProvider>
</ServiceJar>"#,
    )
    .unwrap();
    let service_jar = unmarshal_file::<ServiceJar>(&service_jar).unwrap();
    let templates = ProviderTemplates::from_service_jar(&service_jar);

    let base =
        server(r#"<tomee><Resource id="db" type="DataSource">JdbcDriver=A</Resource></tomee>"#);
    let prod = server(r#"<openejb><Resource id="db">jdbcdriver: B</Resource></openejb>"#);

    let effective = compute_effective(&base, &[Override::tree("prod", prod)], &templates);

    let driver = effective.property("db", "JdbcDriver").unwrap();
    assert_eq!(driver.key, "JdbcDriver");
    assert_eq!(driver.value, "B");
    assert_eq!(driver.source, SourceLayer::Override("prod".to_string()));

    let max = effective.property("db", "MaxConnections").unwrap();
    assert_eq!(max.value, "10");
    assert_eq!(max.source, SourceLayer::Template);
    assert_eq!(effective.resource("db").unwrap().template.as_deref(), Some("Pool"));
}

#[test]
fn test_server_config_from_conf_directory() {
    let temp_dir = TempDir::new().unwrap();
    let conf = temp_dir.path().join("conf");
    fs::create_dir_all(&conf).unwrap();

    assert!(load_server_config(temp_dir.path(), None).unwrap().is_none());

    fs::write(
        conf.join("openejb.xml"),
        r#"<openejb><Resource id="db" type="DataSource">JdbcDriver A</Resource></openejb>"#,
    )
    .unwrap();
    let openejb = load_server_config(temp_dir.path(), None).unwrap().unwrap();
    assert_eq!(openejb.context, "openejb");

    fs::write(
        conf.join("tomee.xml"),
        r#"<tomee><Resource id="db" type="DataSource">JdbcDriver B</Resource></tomee>"#,
    )
    .unwrap();
    fs::write(
        conf.join("test-tomee.xml"),
        r#"<tomee><Resource id="db" type="DataSource">JdbcDriver C</Resource></tomee>"#,
    )
    .unwrap();

    let tomee = load_server_config(temp_dir.path(), None).unwrap().unwrap();
    assert_eq!(tomee.context, "tomee");
    assert_eq!(tomee.root.resources[0].properties()[0].1, "B");

    let prefix = AltPrefix::parse("test").unwrap();
    let alternate = load_server_config(temp_dir.path(), Some(&prefix)).unwrap().unwrap();
    let effective = compute_effective(&alternate, &[], &ProviderTemplates::builtin());
    assert_eq!(effective.property("db", "JdbcDriver").unwrap().value, "C");
}

#[test]
fn test_malformed_server_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let conf = temp_dir.path().join("conf");
    fs::create_dir_all(&conf).unwrap();
    fs::write(conf.join("tomee.xml"), "<tomee><Resource").unwrap();

    let err = load_server_config(temp_dir.path(), None).unwrap_err();
    assert!(matches!(err, ModuleError::Unmarshal(_)));
}

#[test]
fn test_explicit_provider_and_properties_override() {
    let templates = ProviderTemplates::new(vec![
        ResourceTemplate::new("Fast", &["DataSource"], &[("Pool", "fast")]),
        ResourceTemplate::new("Slow", &["DataSource"], &[("Pool", "slow")]),
    ]);
    let base = server(
        r#"<tomee>
  <Resource id="a" type="DataSource"/>
  <Resource id="b" type="DataSource" provider="Slow"/>
</tomee>"#,
    );
    let system = Override::properties("system", [("b.Pool", "custom"), ("b.Password", "secret")]);

    let effective = compute_effective(&base, &[system], &templates);
    assert_eq!(effective.property("a", "Pool").unwrap().value, "fast");
    assert_eq!(effective.property("b", "Pool").unwrap().value, "custom");
    assert_eq!(effective.property("b", "password").unwrap().value, "secret");
}

#[test]
fn test_render_json_is_stable() {
    let base = server(
        r#"<tomee><Resource id="jms" type="Queue">destination orders</Resource></tomee>"#,
    );
    let effective = compute_effective(&base, &[], &ProviderTemplates::builtin());

    let first = render_json(&effective).unwrap();
    let again = compute_effective(&base, &[], &ProviderTemplates::builtin());
    let second = render_json(&again).unwrap();
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    let resource = &value["resources"][0];
    assert_eq!(resource["template"], "Default Queue");
    assert_eq!(resource["properties"][0]["key"], "destination");
    assert_eq!(resource["properties"][0]["value"], "orders");
    assert_eq!(resource["properties"][0]["source"]["layer"], "base");
}
