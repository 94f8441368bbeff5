//! Entity taxonomy: name -> canonical type, and the inverse index
//!
//! Types come from an explicit `Class` property or are inherited through
//! `extends`. Inheritance is resolved by repeated full scans, so a child may
//! appear before its parent in the catalog. Depth is bounded; anything still
//! unresolved after the last pass is a data-integrity failure.

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::catalog::Catalog;
use crate::core::error::{Result, VariantError};

/// Extra catalog scans after the first before giving up (raise if classes
/// nest deeper)
pub const MAX_PASSES: usize = 2;

/// Resolved entity-type lookup tables
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    entity_type_of: AHashMap<String, String>,
    /// Names per type, in catalog order
    entities_of_type: BTreeMap<String, Vec<String>>,
}

impl Taxonomy {
    /// Resolve with the default pass bound
    pub fn resolve(catalog: &Catalog) -> Result<Self> {
        Self::resolve_with_passes(catalog, MAX_PASSES)
    }

    /// Resolve with up to `max_passes` scans beyond the first
    pub fn resolve_with_passes(catalog: &Catalog, max_passes: usize) -> Result<Self> {
        tracing::info!("Populating entity -> type lookup table");

        let mut entity_type_of: AHashMap<String, String> = AHashMap::with_capacity(catalog.len());

        for pass in 1..=max_passes + 1 {
            let mut newly_resolved = 0;

            for entity in catalog.entity_classes() {
                if entity_type_of.contains_key(&entity.name) {
                    continue;
                }

                let inherited = entity
                    .extends
                    .as_ref()
                    .and_then(|parent| entity_type_of.get(parent))
                    .cloned();

                let resolved = inherited.or_else(|| entity.type_tag().map(str::to_string));

                match resolved {
                    Some(ty) => {
                        tracing::debug!("...{} = {}", entity.name, ty);
                        entity_type_of.insert(entity.name.clone(), ty);
                        newly_resolved += 1;
                    }
                    None => {
                        tracing::warn!(
                            "...type lookup failed for entity {} on pass {}",
                            entity.name,
                            pass
                        );
                    }
                }
            }

            if entity_type_of.len() == catalog.len() || newly_resolved == 0 {
                break;
            }
        }

        let unresolved: Vec<String> = catalog
            .entity_classes()
            .iter()
            .filter(|e| !entity_type_of.contains_key(&e.name))
            .map(|e| e.name.clone())
            .collect();
        if !unresolved.is_empty() {
            return Err(VariantError::UnresolvedTaxonomy { names: unresolved });
        }

        tracing::info!("Populating type -> entity lookup table");
        let mut entities_of_type: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (idx, entity) in catalog.entity_classes().iter().enumerate() {
            // duplicates were dropped by the catalog index
            if catalog.position(&entity.name) != Some(idx) {
                continue;
            }
            if let Some(ty) = entity_type_of.get(&entity.name) {
                entities_of_type
                    .entry(ty.clone())
                    .or_default()
                    .push(entity.name.clone());
            }
        }

        for (ty, names) in &entities_of_type {
            tracing::debug!("{} => {:?}", ty, names);
        }

        Ok(Self {
            entity_type_of,
            entities_of_type,
        })
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.entity_type_of.get(name).map(String::as_str)
    }

    /// Names resolved to `ty`, empty if none
    pub fn entities_of_type(&self, ty: &str) -> &[String] {
        self.entities_of_type
            .get(ty)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entities_of_type.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entity_type_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_type_of.is_empty()
    }
}
