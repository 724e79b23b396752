//! Parallel assembly must be indistinguishable from sequential assembly

use super::test_utils::{AppFixture, BROKEN_XML, EJB_JAR, WEB_XML};
use ddconf::{AppInfo, AssemblyOptions, ConfigurationError, ModuleAssembler, ModuleKind};

fn fixture() -> AppFixture {
    let app = AppFixture::new();
    for i in 0..12 {
        match i % 4 {
            0 => app.file(&format!("m{:02}/META-INF/ejb-jar.xml", i), EJB_JAR),
            1 => app.file(&format!("m{:02}/WEB-INF/web.xml", i), WEB_XML),
            2 => app.file(&format!("m{:02}/META-INF/ejb-jar.xml", i), BROKEN_XML),
            _ => app.file(&format!("m{:02}/org/acme/Thing.class", i), ""),
        };
    }
    app
}

fn summary(info: &AppInfo) -> Vec<(String, ModuleKind, bool, Option<&'static str>)> {
    info.modules
        .iter()
        .map(|m| {
            (
                m.module_id.clone(),
                m.kind,
                m.is_failed(),
                m.loaded().map(|l| l.tree.context()),
            )
        })
        .collect()
}

fn assemble(
    app: &AppFixture,
    parallelism: usize,
    require: Vec<ModuleKind>,
) -> Result<AppInfo, ConfigurationError> {
    let options = AssemblyOptions {
        parallelism,
        require_descriptors: require,
        ..AssemblyOptions::default()
    };
    ModuleAssembler::new(options).configure_application(app.root())
}

#[test]
fn test_parallel_matches_sequential() {
    let app = fixture();
    let sequential = assemble(&app, 1, vec![]).unwrap();

    for workers in [2, 4, 16] {
        let parallel = assemble(&app, workers, vec![]).unwrap();
        assert_eq!(summary(&parallel), summary(&sequential));
    }
    assert_eq!(sequential.modules.len(), 12);
    assert_eq!(sequential.failed().count(), 3);
}

#[test]
fn test_parallel_reports_first_fatal_error_in_discovery_order() {
    let app = fixture();
    let sequential = assemble(&app, 1, vec![ModuleKind::Ejb]).unwrap_err();

    for _ in 0..5 {
        let parallel = assemble(&app, 8, vec![ModuleKind::Ejb]).unwrap_err();
        assert_eq!(parallel.module(), sequential.module());
    }
    assert_eq!(sequential.module(), Some("m02"));
}
