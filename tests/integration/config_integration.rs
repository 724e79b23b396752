//! Integration tests for engine configuration feeding the assembler

use super::test_utils::{AppFixture, EnvGuard, TEST_EJB_JAR};
use ddconf::config::ConfigLoader;
use ddconf::{ModuleAssembler, ModuleKind};

#[test]
fn test_project_config_drives_assembly() {
    let app = AppFixture::new();
    app.file("module/META-INF/test-ejb-jar.xml", TEST_EJB_JAR)
        .file(
            "config/ddconf.toml",
            r#"
[descriptors]
alt_dd_prefix = "test"

[assembly]
parallelism = 2
ignore_patterns = [".git", "config"]
"#,
        );
    let home = app.root().join("home");
    let home = home.to_string_lossy();
    let _env = EnvGuard::set(&[
        ("HOME", Some(home.as_ref())),
        ("XDG_CONFIG_HOME", None),
        ("DDCONF_ENV", None),
        ("DDCONF_ASSEMBLY__PARALLELISM", None),
    ]);

    let config = ConfigLoader::load(app.root()).unwrap();
    assert_eq!(config.assembly.parallelism, 2);

    let info = ModuleAssembler::new(config.assembly_options())
        .configure_application(app.root())
        .unwrap();
    assert_eq!(info.modules.len(), 1);
    assert_eq!(info.modules[0].kind, ModuleKind::Ejb);
    assert!(info.modules[0].loaded().unwrap().via_alt);
}

#[test]
fn test_environment_overrides_files() {
    let app = AppFixture::new();
    app.file("config/ddconf.toml", "[assembly]\nparallelism = 2\n");
    let home = app.root().join("home");
    let home = home.to_string_lossy();
    let _env = EnvGuard::set(&[
        ("HOME", Some(home.as_ref())),
        ("XDG_CONFIG_HOME", None),
        ("DDCONF_ENV", None),
        ("DDCONF_ASSEMBLY__PARALLELISM", Some("6")),
    ]);

    let config = ConfigLoader::load(app.root()).unwrap();
    assert_eq!(config.assembly.parallelism, 6);
}

#[test]
fn test_invalid_environment_value_is_rejected() {
    let app = AppFixture::new();
    let home = app.root().join("home");
    let home = home.to_string_lossy();
    let _env = EnvGuard::set(&[
        ("HOME", Some(home.as_ref())),
        ("XDG_CONFIG_HOME", None),
        ("DDCONF_ENV", None),
        ("DDCONF_ASSEMBLY__PARALLELISM", Some("0")),
    ]);

    assert!(ConfigLoader::load(app.root()).is_err());
}
