//! Catalog snapshot: the source entity classes and entity groups
//!
//! The catalog is read-only during generation; variants are independent
//! deep copies of its entries.

pub mod entity;
pub mod groups;

pub use entity::{
    EffectGroup, EntityClass, EntityNode, ItemDrop, PassiveEffect, Property, PropertyClass,
    VariantMeta, BASE_EFFECTS_GROUP, HARVEST_EVENT, TYPE_TAG_PROPERTY,
};
pub use groups::{project_variants, EntityGroup, GroupEntry};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::Result;

/// On-disk form of a catalog snapshot
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub entity_classes: Vec<EntityClass>,
    #[serde(default)]
    pub entity_groups: Vec<EntityGroup>,
}

/// Entity classes and groups, indexed by name
#[derive(Debug, Default)]
pub struct Catalog {
    entity_classes: Vec<EntityClass>,
    entity_groups: Vec<EntityGroup>,
    /// First occurrence of each name
    by_name: AHashMap<String, usize>,
}

impl Catalog {
    pub fn new(entity_classes: Vec<EntityClass>, entity_groups: Vec<EntityGroup>) -> Self {
        let mut by_name = AHashMap::with_capacity(entity_classes.len());
        for (idx, entity) in entity_classes.iter().enumerate() {
            if by_name.contains_key(&entity.name) {
                tracing::warn!("Duplicate entity class {}; keeping the first", entity.name);
                continue;
            }
            by_name.insert(entity.name.clone(), idx);
        }

        Self {
            entity_classes,
            entity_groups,
            by_name,
        }
    }

    /// Load a snapshot from a JSON string
    pub fn load_from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.entity_classes, file.entity_groups))
    }

    /// Load a snapshot from a JSON file on disk
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::load_from_json(&content)?;
        tracing::info!(
            "Loaded {} entity classes and {} entity groups from {}",
            catalog.entity_classes.len(),
            catalog.entity_groups.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&EntityClass> {
        self.by_name.get(name).map(|&idx| &self.entity_classes[idx])
    }

    /// Catalog order of `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn entity_classes(&self) -> &[EntityClass] {
        &self.entity_classes
    }

    pub fn entity_groups(&self) -> &[EntityGroup] {
        &self.entity_groups
    }

    pub fn len(&self) -> usize {
        self.entity_classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "entity_classes": [
            {
                "name": "zombieTemplateMale",
                "nodes": [
                    { "kind": "property", "name": "Class", "value": "EntityZombie" },
                    { "kind": "effect_group", "name": "Base Effects", "effects": [
                        { "name": "HealthMax", "operation": "base_set", "value": "100" }
                    ]}
                ]
            },
            {
                "name": "zombieBoe",
                "extends": "zombieTemplateMale",
                "nodes": [
                    { "kind": "drop", "event": "Harvest", "name": "resourceRockSmall", "count": "4" }
                ]
            }
        ],
        "entity_groups": [
            { "name": "ZombiesAll", "entries": [ { "name": "zombieBoe", "prob": "1" } ] }
        ]
    }"#;

    #[test]
    fn test_load_snapshot() {
        let catalog = Catalog::load_from_json(SNAPSHOT).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entity_groups().len(), 1);

        let boe = catalog.get("zombieBoe").unwrap();
        assert_eq!(boe.extends.as_deref(), Some("zombieTemplateMale"));
        assert!(matches!(&boe.nodes[0], EntityNode::Drop(d) if d.count == "4"));

        let template = catalog.get("zombieTemplateMale").unwrap();
        assert_eq!(template.type_tag(), Some("EntityZombie"));
        assert!(template.effect_group(BASE_EFFECTS_GROUP).is_some());
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let catalog = Catalog::new(
            vec![
                EntityClass::new("a").with_property("Mass", "1"),
                EntityClass::new("a").with_property("Mass", "2"),
            ],
            vec![],
        );
        assert_eq!(catalog.get("a").unwrap().property_value("Mass"), Some("1"));
        assert_eq!(catalog.position("a"), Some(0));
    }

    #[test]
    fn test_bad_json_is_serde_error() {
        let err = Catalog::load_from_json("{ not json").unwrap_err();
        assert!(matches!(err, crate::core::error::VariantError::SerdeError(_)));
    }
}
