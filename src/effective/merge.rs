use crate::effective::{
    EffectiveConfig, EffectiveProperty, EffectiveResource, Override, ProviderTemplates,
    SourceLayer,
};
use crate::schema::ServerConfig;
use crate::unmarshal::ConfigTree;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Resource property that turns off template defaults for that resource.
const IGNORE_DEFAULT_VALUES: &str = "IgnoreDefaultValues";

/// Merge template defaults, the base tree and overrides into effective properties.
///
/// Keys are matched case-insensitively per resource. Properties within a
/// resource come out in template order, followed by properties the template
/// does not declare in the order they were first set.
#[instrument(skip_all, fields(base = base.context, overrides = overrides.len()))]
pub fn compute_effective(
    base: &ConfigTree<ServerConfig>,
    overrides: &[Override],
    templates: &ProviderTemplates,
) -> EffectiveConfig {
    let mut merger = Merger::default();

    merger.apply_tree(&base.root, &SourceLayer::Base);

    for layer in overrides {
        let source = SourceLayer::Override(layer.name().to_string());
        match layer {
            Override::Tree { tree, .. } => merger.apply_tree(&tree.root, &source),
            Override::Properties { entries, .. } => merger.apply_properties(entries, &source),
        }
    }

    let resources = merger
        .resources
        .into_iter()
        .map(|state| state.finish(templates))
        .collect::<Vec<_>>();

    debug!(resource_count = resources.len(), "Effective configuration computed");
    EffectiveConfig { resources }
}

#[derive(Default)]
struct Merger {
    resources: Vec<ResourceState>,
    index: HashMap<String, usize>,
}

impl Merger {
    fn resource(&mut self, id: &str) -> &mut ResourceState {
        let position = match self.index.get(id) {
            Some(position) => *position,
            None => {
                self.resources.push(ResourceState::new(id));
                self.index.insert(id.to_string(), self.resources.len() - 1);
                self.resources.len() - 1
            }
        };
        &mut self.resources[position]
    }

    fn apply_tree(&mut self, config: &ServerConfig, source: &SourceLayer) {
        for declaration in &config.resources {
            let state = self.resource(&declaration.id);
            if state.kind.is_none() {
                state.kind = declaration.kind.clone();
            }
            if state.provider.is_none() {
                state.provider = declaration.provider.clone();
            }
            for (key, value) in declaration.properties() {
                state.assign(key, value, source);
            }
        }
    }

    /// `<resource id>.<property>` entries; the longest matching resource id wins.
    fn apply_properties(&mut self, entries: &[(String, String)], source: &SourceLayer) {
        for (qualified, value) in entries {
            let target = self
                .index
                .keys()
                .filter(|id| {
                    qualified.len() > id.len() + 1
                        && qualified.starts_with(id.as_str())
                        && qualified.as_bytes()[id.len()] == b'.'
                })
                .max_by_key(|id| id.len())
                .cloned();

            match target {
                Some(id) => {
                    let key = qualified[id.len() + 1..].to_string();
                    self.resource(&id).assign(key, value.clone(), source);
                }
                None => debug!(
                    property = %qualified,
                    "Override names no declared resource, ignoring"
                ),
            }
        }
    }
}

struct Slot {
    key: String,
    value: String,
    source: SourceLayer,
    first_seen: usize,
}

struct ResourceState {
    id: String,
    kind: Option<String>,
    provider: Option<String>,
    slots: HashMap<String, Slot>,
    next_seen: usize,
}

impl ResourceState {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: None,
            provider: None,
            slots: HashMap::new(),
            next_seen: 0,
        }
    }

    fn assign(&mut self, key: String, value: String, source: &SourceLayer) {
        debug!(
            resource = %self.id,
            key = %key,
            value = %masked(&key, &value),
            source = ?source,
            "Property assigned"
        );

        let lookup = key.to_ascii_lowercase();
        match self.slots.get_mut(&lookup) {
            Some(slot) => {
                slot.value = value;
                slot.source = source.clone();
            }
            None => {
                self.slots.insert(
                    lookup,
                    Slot {
                        key,
                        value,
                        source: source.clone(),
                        first_seen: self.next_seen,
                    },
                );
                self.next_seen += 1;
            }
        }
    }

    fn finish(mut self, templates: &ProviderTemplates) -> EffectiveResource {
        let ignore_defaults = self
            .slots
            .remove(&IGNORE_DEFAULT_VALUES.to_ascii_lowercase())
            .map(|slot| slot.value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let template = templates.resolve(self.provider.as_deref(), self.kind.as_deref());
        let mut properties = Vec::with_capacity(self.slots.len());

        if let Some(template) = template {
            for (key, default) in &template.defaults {
                match self.slots.remove(&key.to_ascii_lowercase()) {
                    Some(slot) => properties.push(EffectiveProperty {
                        key: key.clone(),
                        value: slot.value,
                        source: slot.source,
                    }),
                    None if !ignore_defaults => properties.push(EffectiveProperty {
                        key: key.clone(),
                        value: default.clone(),
                        source: SourceLayer::Template,
                    }),
                    None => {}
                }
            }
        }

        let mut remaining: Vec<Slot> = self.slots.into_values().collect();
        remaining.sort_by_key(|slot| slot.first_seen);
        properties.extend(remaining.into_iter().map(|slot| EffectiveProperty {
            key: slot.key,
            value: slot.value,
            source: slot.source,
        }));

        EffectiveResource {
            id: self.id,
            kind: self.kind,
            template: template.map(|t| t.id.clone()),
            properties,
        }
    }
}

fn masked<'a>(key: &str, value: &'a str) -> &'a str {
    if key.eq_ignore_ascii_case("password") {
        "<hidden>"
    } else {
        value
    }
}
