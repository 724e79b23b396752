//! Merge and parse results depend only on their inputs

use ddconf::effective::{
    compute_effective, properties, render_properties, Override, ProviderTemplates,
    ResourceTemplate, SourceLayer,
};
use ddconf::schema::ServerConfig;
use ddconf::unmarshal::{unmarshal_default, ConfigTree};
use proptest::prelude::*;

fn key() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "JdbcDriver",
        "jdbcdriver",
        "MaxConnections",
        "UserName",
        "Zeta",
        "Alpha",
    ])
    .prop_map(str::to_string)
}

fn value() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}"
}

fn assignments() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((key(), value()), 0..8)
}

fn server_doc(resources: &[(String, Vec<(String, String)>)]) -> String {
    let mut doc = String::from("<tomee>");
    for (id, props) in resources {
        doc.push_str(&format!("<Resource id=\"{}\" type=\"DataSource\">", id));
        for (k, v) in props {
            doc.push_str(&format!("\n{} {}", k, v));
        }
        doc.push_str("\n</Resource>");
    }
    doc.push_str("</tomee>");
    doc
}

fn tree(doc: &str) -> ConfigTree<ServerConfig> {
    unmarshal_default::<ServerConfig>(doc.as_bytes()).unwrap()
}

fn templates() -> ProviderTemplates {
    ProviderTemplates::new(vec![ResourceTemplate::new(
        "Pool",
        &["DataSource"],
        &[("JdbcDriver", "C"), ("MaxConnections", "10")],
    )])
}

proptest! {
    #[test]
    fn test_compute_effective_is_deterministic(
        base in assignments(),
        over in assignments(),
        flat in assignments(),
    ) {
        let base = tree(&server_doc(&[("db".to_string(), base)]));
        let over = tree(&server_doc(&[("db".to_string(), over)]));
        let overrides = vec![
            Override::tree("env", over),
            Override::properties(
                "system",
                flat.into_iter().map(|(k, v)| (format!("db.{}", k), v)),
            ),
        ];

        let first = compute_effective(&base, &overrides, &templates());
        let second = compute_effective(&base, &overrides, &templates());
        prop_assert_eq!(render_properties(&first), render_properties(&second));
        prop_assert_eq!(&first, &second);

        // template keys always lead, in template order
        let keys: Vec<_> = first.resources[0].properties.iter().map(|p| p.key.as_str()).collect();
        prop_assert_eq!(&keys[..2], &["JdbcDriver", "MaxConnections"][..]);
    }

    #[test]
    fn test_last_layer_wins(base_value in value(), override_value in value()) {
        let resources = [("db".to_string(), vec![("JdbcDriver".to_string(), base_value)])];
        let base = tree(&server_doc(&resources));
        let system = Override::properties("system", [("db.jdbcDriver", override_value.clone())]);

        let effective = compute_effective(&base, &[system], &templates());
        let driver = effective.property("db", "JdbcDriver").unwrap();
        prop_assert_eq!(&driver.value, &override_value);
        prop_assert_eq!(&driver.source, &SourceLayer::Override("system".to_string()));
    }

    #[test]
    fn test_server_parse_is_idempotent(props in assignments()) {
        let doc = server_doc(&[("db".to_string(), props.clone())]);
        let first = tree(&doc);
        let second = tree(&doc);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.root.resources[0].properties(), props);
    }

    #[test]
    fn test_properties_parse_is_stable(props in assignments()) {
        let text: String = props.iter().map(|(k, v)| format!("{}={}\n", k, v)).collect();
        prop_assert_eq!(properties::parse(&text), properties::parse(&text));
        prop_assert_eq!(properties::parse(&text), props);
    }
}
