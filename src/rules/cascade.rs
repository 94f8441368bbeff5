//! Config cascade: which decision and payload apply to a
//! (category, property, entity) triple
//!
//! Three levels, deepest wins: per-entity block, property block, defaults.
//! Payloads are selected whole, never merged.

use crate::core::error::Result;
use crate::core::types::{EntityCategory, UNDEFINED_ENTITY};
use crate::rules::mutation::{Mutation, MutationKind};
use crate::rules::tables::{GeneratorConfig, Settings, RAND_FUNCTION_KEY};

fn entity_key(entity: Option<&str>) -> &str {
    match entity {
        Some(name) if !name.is_empty() => name,
        _ => UNDEFINED_ENTITY,
    }
}

impl GeneratorConfig {
    /// Whether `property` is randomized for `entity`
    ///
    /// An entity block decides by its own flag (enabled unless disabled);
    /// otherwise the property block does; a property with no block at all
    /// is disabled.
    pub fn is_enabled(
        &self,
        category: EntityCategory,
        property: &str,
        entity: Option<&str>,
    ) -> Result<bool> {
        let table = self.category(category)?;
        let Some(block) = table.property(property) else {
            return Ok(false);
        };

        if let Some(entity_block) = block.entities.get(entity_key(entity)) {
            return Ok(!entity_block.disabled.unwrap_or(false));
        }

        Ok(!block.disabled.unwrap_or(false))
    }

    /// Whether the property's allow list shuts `entity` out
    pub fn is_blocked(
        &self,
        category: EntityCategory,
        property: &str,
        entity: Option<&str>,
    ) -> Result<bool> {
        let table = self.category(category)?;
        let blocked = table
            .property(property)
            .and_then(|block| block.allow_only.as_ref())
            .map(|allowed| !allowed.contains(entity_key(entity)))
            .unwrap_or(false);
        Ok(blocked)
    }

    /// Effective payload for `property` on `entity`
    ///
    /// Defaults are always required. A property block replaces them only
    /// when it says more than a bare flag (more than one key).
    pub fn payload(
        &self,
        category: EntityCategory,
        property: &str,
        entity: Option<&str>,
    ) -> Result<&Settings> {
        let mut selected = self.default_payload(property)?;

        let table = self.category(category)?;
        if let Some(block) = table.property(property) {
            if block.key_count > 1 {
                selected = &block.settings;
            }
            if let Some(entity_block) = block.entities.get(entity_key(entity)) {
                selected = &entity_block.settings;
            }
        }

        Ok(selected)
    }

    /// Mutation to run for `property` on `entity`, or `None` when the
    /// cascade leaves it alone
    ///
    /// The mutation kind always comes from the defaults table; only the
    /// payload cascades.
    pub fn resolve_mutation(
        &self,
        category: EntityCategory,
        property: &str,
        entity: Option<&str>,
    ) -> Result<Option<Mutation>> {
        if !self.is_enabled(category, property, entity)? {
            return Ok(None);
        }
        if self.is_blocked(category, property, entity)? {
            tracing::debug!(
                "{} blocked for {} by allow list",
                property,
                entity_key(entity)
            );
            return Ok(None);
        }

        let function = self
            .default_payload(property)?
            .require(RAND_FUNCTION_KEY)?;
        let kind = MutationKind::parse(property, function)?;
        let payload = self.payload(category, property, entity)?;

        Mutation::from_settings(kind, payload).map(Some)
    }
}
