//! Source lookup, inclusion policy and deep copy

use std::collections::BTreeMap;

use crate::catalog::{Catalog, EntityClass, VariantMeta};
use crate::generation::context::RunContext;
use crate::rules::GeneratorConfig;

/// Templates and player entities that are never cloned
pub const BUILTIN_DENY_LIST: [(&str, &str); 5] = [
    ("playerMale", "player entity"),
    ("playerFemale", "player entity"),
    ("zombieTemplateMale", "template entity"),
    ("animalTemplateTimid", "template entity"),
    ("animalTemplateHostile", "template entity"),
];

/// Which source entities may be cloned at all
#[derive(Debug, Clone, Default)]
pub struct EntityFilter {
    deny: BTreeMap<String, String>,
    /// Empty means everything not denied is allowed
    allow_only: BTreeMap<String, String>,
}

impl EntityFilter {
    pub fn new(deny: BTreeMap<String, String>, allow_only: BTreeMap<String, String>) -> Self {
        Self { deny, allow_only }
    }

    /// Built-in deny list plus the configured global lists
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let mut deny: BTreeMap<String, String> = BUILTIN_DENY_LIST
            .iter()
            .map(|(name, reason)| (name.to_string(), reason.to_string()))
            .collect();
        deny.extend(config.ignore_entity_list.clone());

        Self::new(deny, config.only_allow_these_entities_list.clone())
    }

    pub fn admits(&self, name: &str) -> bool {
        if let Some(reason) = self.deny.get(name) {
            tracing::debug!("Filtering out {} because: {}", name, reason);
            return false;
        }

        if !self.allow_only.is_empty() && !self.allow_only.contains_key(name) {
            tracing::debug!("Filtering out {}: not on the allow-only list", name);
            return false;
        }

        true
    }
}

/// Deep-copy `source` into a freshly named variant
///
/// Returns `None` if the source is unknown or filtered out. The copy
/// extends its source unless it already extends something.
pub fn clone_variant(
    ctx: &mut RunContext<'_>,
    catalog: &Catalog,
    filter: &EntityFilter,
    source: &str,
) -> Option<EntityClass> {
    let entity = catalog.get(source)?;
    if !filter.admits(&entity.name) {
        return None;
    }

    let mut variant = entity.clone();
    variant.name = ctx.next_variant_name(source);
    variant.variant = Some(VariantMeta {
        original_name: source.to_string(),
        ..VariantMeta::default()
    });
    if variant.extends.is_none() {
        variant.extends = Some(source.to_string());
    }

    tracing::debug!("%% Generating {} variant ({})", source, variant.name);
    Some(variant)
}
