//! Rendering of effective configuration for diagnostics and export.

use crate::effective::EffectiveConfig;

/// Render as `key=value` lines, one `# Resource(...)` header per resource.
pub fn render_properties(config: &EffectiveConfig) -> String {
    let mut out = String::new();

    for (i, resource) in config.resources.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match &resource.kind {
            Some(kind) => {
                out.push_str(&format!("# Resource(id={}, type={})\n", resource.id, kind))
            }
            None => out.push_str(&format!("# Resource(id={})\n", resource.id)),
        }
        for property in &resource.properties {
            out.push_str(&format!("{}={}\n", property.key, property.value));
        }
    }

    out
}

pub fn render_json(config: &EffectiveConfig) -> serde_json::Result<String> {
    serde_json::to_string_pretty(config)
}
