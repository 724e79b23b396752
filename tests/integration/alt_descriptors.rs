//! Integration tests for alternate descriptor precedence

use super::test_utils::{AppFixture, EJB_JAR, TEST_EJB_JAR};
use ddconf::descriptor::{locate, AltPrefix, ResolvedDescriptor, EJB_JAR as EJB_JAR_ID, WEB_APP};
use ddconf::{AssemblyOptions, ModuleAssembler};

/// Only `test-ejb-jar.xml` exists and the prefix is `test`: the module is an
/// EJB module configured from the alternate file.
#[test]
fn test_alt_only_module_is_assembled() {
    let app = AppFixture::new();
    app.file("module/META-INF/test-ejb-jar.xml", TEST_EJB_JAR);

    let options = AssemblyOptions {
        alt_prefix: AltPrefix::parse("test"),
        ..AssemblyOptions::default()
    };
    let info = ModuleAssembler::new(options)
        .configure_application(app.root())
        .unwrap();

    assert_eq!(info.ejb_jars().count(), 1);
    let module = info.ejb_jars().next().unwrap();
    let loaded = module.loaded().unwrap();
    assert!(loaded.via_alt);
    assert!(loaded.path.ends_with("test-ejb-jar.xml"));
    assert_eq!(module.ejb_jar().unwrap().root.bean_names(), vec!["MockCartBean"]);
}

#[test]
fn test_alt_only_module_without_prefix_is_not_configured() {
    let app = AppFixture::new();
    app.file("module/META-INF/test-ejb-jar.xml", TEST_EJB_JAR);

    let info = ModuleAssembler::default()
        .configure_application(app.root())
        .unwrap();
    assert_eq!(info.ejb_jars().count(), 0);
}

#[test]
fn test_prefixed_descriptor_shadows_canonical() {
    let app = AppFixture::new();
    app.file("beans/META-INF/ejb-jar.xml", EJB_JAR)
        .file("beans/META-INF/test-ejb-jar.xml", TEST_EJB_JAR);

    let plain = ModuleAssembler::default()
        .configure_application(app.root())
        .unwrap();
    let names = plain.module("beans").unwrap().ejb_jar().unwrap().root.bean_names();
    assert_eq!(names, vec!["CartBean"]);

    let options = AssemblyOptions {
        alt_prefix: AltPrefix::parse("test"),
        ..AssemblyOptions::default()
    };
    let alt = ModuleAssembler::new(options)
        .configure_application(app.root())
        .unwrap();
    let names = alt.module("beans").unwrap().ejb_jar().unwrap().root.bean_names();
    assert_eq!(names, vec!["MockCartBean"]);
}

#[test]
fn test_dotted_prefix_is_joined_verbatim() {
    let app = AppFixture::new();
    app.file("META-INF/test.ejb-jar.xml", TEST_EJB_JAR);

    let prefix = AltPrefix::parse("test.").unwrap();
    let resolved = locate(app.root(), &EJB_JAR_ID, Some(&prefix)).unwrap();
    assert!(resolved.via_alt());
    assert!(resolved.path().unwrap().ends_with("test.ejb-jar.xml"));
}

#[test]
fn test_neither_file_is_absent_for_every_prefix() {
    let app = AppFixture::new();
    app.dir("WEB-INF");

    for raw in ["test", "test,dev", "dev."] {
        let prefix = AltPrefix::parse(raw).unwrap();
        assert_eq!(
            locate(app.root(), &WEB_APP, Some(&prefix)).unwrap(),
            ResolvedDescriptor::Absent
        );
    }
    assert_eq!(
        locate(app.root(), &WEB_APP, None).unwrap(),
        ResolvedDescriptor::Absent
    );
}
