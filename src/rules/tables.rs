//! Typed generator configuration
//!
//! Mirrors the nested file layout: a `ConfigDefaults` table with one
//! payload per property, and one table per entity category whose property
//! blocks may carry per-entity override blocks one level deeper.
//! Numeric settings are kept as the strings they were written as.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::config::ScalePools;
use crate::core::error::{Result, VariantError};
use crate::core::types::EntityCategory;

/// Keys in a category table that are bookkeeping, never properties
pub const CATEGORY_BOOKKEEPING_KEYS: [&str; 4] = [
    "disable_randomizer",
    "num_generation_loops",
    "ignore_entity_list",
    "enable_walktype_crawler_limit",
];

pub const DISABLE_KEY: &str = "disable_randomizer";
pub const ALLOW_LIST_KEY: &str = "only_allow_these_entities_list";
pub const RAND_FUNCTION_KEY: &str = "rand_function";

/// One selected payload: flat key -> value settings with the config path
/// they were read from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    path: String,
    values: BTreeMap<String, String>,
}

impl Settings {
    pub fn new(path: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self {
            path: path.into(),
            values,
        }
    }

    /// Required setting; a missing key is a configuration-integrity error
    pub fn require(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| VariantError::missing(format!("{}.{}", self.path, key)))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Deepest override level: one entity within one property block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityOverride {
    pub disabled: Option<bool>,
    pub settings: Settings,
}

/// Per-property block inside a category table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBlock {
    pub disabled: Option<bool>,
    /// Only these source entities may be randomized for this property
    pub allow_only: Option<BTreeSet<String>>,
    /// Every scalar key of the block, `disable_randomizer` included
    pub settings: Settings,
    pub entities: BTreeMap<String, EntityOverride>,
    /// Keys as written, counting entity blocks and the allow list
    pub key_count: usize,
}

/// One entity category's table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTable {
    pub disabled: bool,
    /// Source entities never cloned in this category (name -> reason)
    pub ignore_entity_list: BTreeMap<String, String>,
    pub properties: BTreeMap<String, PropertyBlock>,
}

impl CategoryTable {
    pub fn property(&self, name: &str) -> Option<&PropertyBlock> {
        self.properties.get(name)
    }

    pub fn ignores(&self, entity: &str) -> bool {
        self.ignore_entity_list.contains_key(entity)
    }
}

/// The complete generator configuration, read-only during a run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    // === NAMING ===
    /// Prefix of every generated entity name
    pub unique_entity_prefix: String,
    /// Base name of the output modlet
    pub modlet_name_prefix: String,

    // === GLOBAL FILTERS ===
    /// User deny list (name -> reason), on top of the built-in one
    pub ignore_entity_list: BTreeMap<String, String>,
    /// When non-empty, only these sources are ever cloned
    pub only_allow_these_entities_list: BTreeMap<String, String>,

    // === CASCADE ===
    /// `ConfigDefaults`: property -> default payload
    pub defaults: BTreeMap<String, Settings>,
    pub categories: BTreeMap<EntityCategory, CategoryTable>,

    // === LIMITS ===
    /// Maximum crawling-locomotion draws per source entity
    pub crawler_limit: u32,
    pub scale_pools: ScalePools,
}

impl GeneratorConfig {
    /// Table for `category`; absence is a missing required section
    pub fn category(&self, category: EntityCategory) -> Result<&CategoryTable> {
        self.categories
            .get(&category)
            .ok_or_else(|| VariantError::missing(category.config_key()))
    }

    /// Default payload for `property`
    pub fn default_payload(&self, property: &str) -> Result<&Settings> {
        self.defaults
            .get(property)
            .ok_or_else(|| VariantError::missing(format!("ConfigDefaults.{}", property)))
    }
}
