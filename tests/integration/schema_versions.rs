//! Integration tests for multi-version unmarshalling

use ddconf::schema::{Application, EjbJar, ServerConfig, WebApp};
use ddconf::unmarshal::{unmarshal, unmarshal_default, unmarshal_file, SchemaContext};
use ddconf::UnmarshalError;
use tempfile::TempDir;

#[test]
fn test_each_platform_namespace_selects_its_context() {
    let cases = [
        ("https://jakarta.ee/xml/ns/jakartaee", "jakartaee"),
        ("http://xmlns.jcp.org/xml/ns/javaee", "javaee"),
        ("http://java.sun.com/xml/ns/javaee", "javaee-legacy"),
        ("http://java.sun.com/xml/ns/j2ee", "j2ee"),
    ];

    for (namespace, expected) in cases {
        let doc = format!(
            r#"<?xml version="1.0"?><web-app xmlns="{}"><display-name>x</display-name></web-app>"#,
            namespace
        );
        let tree = unmarshal_default::<WebApp>(doc.as_bytes()).unwrap();
        assert_eq!(tree.context, expected);
        assert_eq!(tree.root.display_name.as_deref(), Some("x"));
    }
}

#[test]
fn test_doctype_document_uses_dtd_context() {
    let doc = br#"<?xml version="1.0"?>
<!DOCTYPE ejb-jar PUBLIC "-//Sun Microsystems, Inc.//DTD Enterprise JavaBeans 2.0//EN" "http://java.sun.com/dtd/ejb-jar_2_0.dtd">
<ejb-jar>
  <enterprise-beans>
    <entity><ejb-name>Order</ejb-name><persistence-type>Container</persistence-type></entity>
  </enterprise-beans>
</ejb-jar>"#;
    let tree = unmarshal_default::<EjbJar>(doc).unwrap();
    assert_eq!(tree.context, "dtd");
    assert_eq!(tree.root.bean_names(), vec!["Order"]);
}

#[test]
fn test_parse_is_idempotent() {
    let doc = br#"<application xmlns="https://jakarta.ee/xml/ns/jakartaee" version="10">
  <module><ejb>a.jar</ejb></module>
  <module><web><web-uri>b.war</web-uri></web></module>
</application>"#;
    let first = unmarshal_default::<Application>(doc).unwrap();
    let second = unmarshal_default::<Application>(doc).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.root.version.as_deref(), Some("10"));
}

#[test]
fn test_restricted_context_list_reports_attempts() {
    const ONLY_JAKARTA: &[SchemaContext] = &[SchemaContext::new(
        "jakartaee",
        "ejb-jar",
        Some("https://jakarta.ee/xml/ns/jakartaee"),
    )];
    let err = unmarshal::<EjbJar>(ONLY_JAKARTA, b"<ejb-jar/>").unwrap_err();
    assert_eq!(err.attempted(), ["jakartaee"]);
    assert!(err.to_string().contains("jakartaee"));
}

#[test]
fn test_unmarshal_file_reports_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = unmarshal_file::<ServerConfig>(&temp_dir.path().join("tomee.xml")).unwrap_err();
    assert!(matches!(err, UnmarshalError::Read { .. }));
}
