//! Load the generator configuration from JSON or TOML

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::core::config::ScalePools;
use crate::core::error::{Result, VariantError};
use crate::core::types::EntityCategory;
use crate::rules::tables::{
    CategoryTable, EntityOverride, GeneratorConfig, PropertyBlock, Settings, ALLOW_LIST_KEY,
    CATEGORY_BOOKKEEPING_KEYS, DISABLE_KEY,
};

const DEFAULT_MODLET_NAME_PREFIX: &str = "variants";

/// Load a configuration file; `.toml` files are parsed as TOML, anything
/// else as JSON
///
/// Numeric settings are carried as text. Quote them (`"1.50"`) to keep
/// their decimal places; bare numbers lose trailing zeros.
pub fn load_generator_config(path: &Path) -> Result<GeneratorConfig> {
    let content = fs::read_to_string(path)?;

    let root: Value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };

    let config = parse_generator_config(&root)?;
    tracing::info!(
        "Loaded generator configuration from {} ({} default payloads)",
        path.display(),
        config.defaults.len()
    );
    Ok(config)
}

/// Build the typed configuration, checking every required key
pub fn parse_generator_config(root: &Value) -> Result<GeneratorConfig> {
    let root = as_table(root, "<root>")?;

    let unique_entity_prefix = scalar(require(root, "unique_entity_prefix", "")?)
        .ok_or_else(|| VariantError::invalid_config("unique_entity_prefix", "expected a string"))?;

    let modlet_name_prefix = root
        .get("modlet_name_prefix")
        .and_then(scalar)
        .unwrap_or_else(|| DEFAULT_MODLET_NAME_PREFIX.to_string());

    // Both may be empty, but must be present
    let ignore_entity_list = name_list(
        require(root, "ignore_entity_list", "")?,
        "ignore_entity_list",
    )?;
    for (name, reason) in &ignore_entity_list {
        tracing::info!("Globally ignoring entity {} because: {}", name, reason);
    }

    let only_allow_these_entities_list = name_list(
        require(root, "only_allow_these_entities_list", "")?,
        "only_allow_these_entities_list",
    )?;
    for (name, reason) in &only_allow_these_entities_list {
        tracing::info!("Globally only allowing entity {} because: {}", name, reason);
    }

    let defaults_table = as_table(require(root, "ConfigDefaults", "")?, "ConfigDefaults")?;
    let mut defaults = BTreeMap::new();
    for (property, payload) in defaults_table {
        let path = format!("ConfigDefaults.{}", property);
        let payload = as_table(payload, &path)?;
        defaults.insert(property.clone(), Settings::new(path, scalars(payload)));
    }

    let mut categories = BTreeMap::new();
    for category in EntityCategory::ALL {
        let key = category.config_key();
        let table = as_table(require(root, key, "")?, key)?;
        categories.insert(category, parse_category(table, key)?);
    }

    let zombie_key = EntityCategory::Zombie.config_key();
    let zombie_table = as_table(require(root, zombie_key, "")?, zombie_key)?;
    let crawler_limit = count(
        require(zombie_table, "enable_walktype_crawler_limit", zombie_key)?,
        &format!("{}.enable_walktype_crawler_limit", zombie_key),
    )?;

    let scale_pools = match root.get("scale_pools") {
        Some(pools) => serde_json::from_value::<ScalePools>(pools.clone())?,
        None => ScalePools::default(),
    };

    Ok(GeneratorConfig {
        unique_entity_prefix,
        modlet_name_prefix,
        ignore_entity_list,
        only_allow_these_entities_list,
        defaults,
        categories,
        crawler_limit,
        scale_pools,
    })
}

fn parse_category(table: &Map<String, Value>, key: &str) -> Result<CategoryTable> {
    let disabled = flag(
        require(table, DISABLE_KEY, key)?,
        &format!("{}.{}", key, DISABLE_KEY),
    )?;
    let ignore_entity_list = name_list(
        require(table, "ignore_entity_list", key)?,
        &format!("{}.ignore_entity_list", key),
    )?;

    let mut properties = BTreeMap::new();
    for (property, block) in table {
        if CATEGORY_BOOKKEEPING_KEYS.contains(&property.as_str()) {
            continue;
        }

        let path = format!("{}.{}", key, property);
        match block {
            Value::Object(block) => {
                properties.insert(property.clone(), parse_property_block(block, &path)?);
            }
            _ => tracing::warn!("Skipping {}: not a property block", path),
        }
    }

    Ok(CategoryTable {
        disabled,
        ignore_entity_list,
        properties,
    })
}

fn parse_property_block(block: &Map<String, Value>, path: &str) -> Result<PropertyBlock> {
    let mut parsed = PropertyBlock {
        key_count: block.len(),
        ..PropertyBlock::default()
    };

    for (key, value) in block {
        let key_path = format!("{}.{}", path, key);
        match (key.as_str(), value) {
            (DISABLE_KEY, _) => parsed.disabled = Some(flag(value, &key_path)?),
            (ALLOW_LIST_KEY, _) => {
                let names: BTreeSet<String> = name_list(value, &key_path)?.into_keys().collect();
                parsed.allow_only = Some(names);
            }
            (_, Value::Object(entity_block)) => {
                let disabled = entity_block
                    .get(DISABLE_KEY)
                    .map(|v| flag(v, &format!("{}.{}", key_path, DISABLE_KEY)))
                    .transpose()?;
                parsed.entities.insert(
                    key.clone(),
                    EntityOverride {
                        disabled,
                        settings: Settings::new(key_path, scalars(entity_block)),
                    },
                );
            }
            _ => {}
        }
    }

    parsed.settings = Settings::new(path, scalars(block));
    Ok(parsed)
}

fn require<'a>(table: &'a Map<String, Value>, key: &str, parent: &str) -> Result<&'a Value> {
    table.get(key).ok_or_else(|| {
        if parent.is_empty() {
            VariantError::missing(key)
        } else {
            VariantError::missing(format!("{}.{}", parent, key))
        }
    })
}

fn as_table<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| VariantError::invalid_config(path, "expected a table"))
}

/// Strings are kept verbatim; numbers use their shortest textual form
///
/// Output precision follows the text of a setting, and a bare `1.50`
/// reads back as `"1.5"`. Settings that need trailing zeros must be
/// written as strings.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Scalar entries of a table, nested tables and arrays skipped
fn scalars(table: &Map<String, Value>) -> BTreeMap<String, String> {
    table
        .iter()
        .filter_map(|(key, value)| scalar(value).map(|v| (key.clone(), v)))
        .collect()
}

/// 0/1 switch; accepts booleans, numbers and numeric strings
fn flag(value: &Value, path: &str) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => n
            .as_f64()
            .map(|f| f.trunc() == 1.0)
            .ok_or_else(|| VariantError::invalid_config(path, "expected 0 or 1")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(|f| f.trunc() == 1.0)
            .map_err(|_| VariantError::invalid_number(s.as_str())),
        _ => Err(VariantError::invalid_config(path, "expected 0 or 1")),
    }
}

fn count(value: &Value, path: &str) -> Result<u32> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| VariantError::invalid_config(path, "expected a non-negative integer"))
}

/// `{name: reason}` table or `[name, ...]` array
fn name_list(value: &Value, path: &str) -> Result<BTreeMap<String, String>> {
    match value {
        Value::Object(table) => Ok(table
            .iter()
            .map(|(name, reason)| (name.clone(), scalar(reason).unwrap_or_default()))
            .collect()),
        Value::Array(names) => names
            .iter()
            .map(|name| {
                name.as_str()
                    .map(|n| (n.to_string(), String::new()))
                    .ok_or_else(|| VariantError::invalid_config(path, "expected entity names"))
            })
            .collect(),
        _ => Err(VariantError::invalid_config(path, "expected a table or list of names")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "unique_entity_prefix": "fv",
            "ignore_entity_list": {},
            "only_allow_these_entities_list": {},
            "ConfigDefaults": {
                "SizeScale": { "rand_function": "custom_MassAndWeightAndSizeScale",
                               "mass_default_int": "170", "sizescale_default_two_dec": "1.00" }
            },
            "ConfigEntityZombie": {
                "disable_randomizer": 0,
                "num_generation_loops": 1,
                "ignore_entity_list": ["zombieDemolition"],
                "enable_walktype_crawler_limit": "2",
                "SizeScale": { "disable_randomizer": 0 },
                "JumpMaxDistance": {
                    "disable_randomizer": 0,
                    "low1": "2.8",
                    "zombieBoe": { "disable_randomizer": 1 },
                    "only_allow_these_entities_list": { "zombieBoe": "jumps" }
                }
            },
            "ConfigEntityEnemyAnimal": { "disable_randomizer": "1", "ignore_entity_list": {} },
            "ConfigEntityFriendlyAnimal": { "disable_randomizer": false, "ignore_entity_list": {} }
        })
    }

    #[test]
    fn test_parse_minimal() {
        let config = parse_generator_config(&minimal()).unwrap();
        assert_eq!(config.unique_entity_prefix, "fv");
        assert_eq!(config.modlet_name_prefix, "variants");
        assert_eq!(config.crawler_limit, 2);

        let zombie = config.category(EntityCategory::Zombie).unwrap();
        assert!(!zombie.disabled);
        assert!(zombie.ignores("zombieDemolition"));
        // bookkeeping keys are not properties
        assert_eq!(zombie.properties.len(), 2);

        let jump = zombie.property("JumpMaxDistance").unwrap();
        assert_eq!(jump.key_count, 4);
        assert_eq!(jump.settings.get("low1"), Some("2.8"));
        assert!(jump.allow_only.as_ref().unwrap().contains("zombieBoe"));
        assert_eq!(jump.entities["zombieBoe"].disabled, Some(true));

        assert!(config.category(EntityCategory::HostileAnimal).unwrap().disabled);
        assert!(!config.category(EntityCategory::PassiveAnimal).unwrap().disabled);
    }

    #[test]
    fn test_missing_required_keys() {
        for key in [
            "unique_entity_prefix",
            "ignore_entity_list",
            "only_allow_these_entities_list",
            "ConfigDefaults",
            "ConfigEntityFriendlyAnimal",
        ] {
            let mut root = minimal();
            root.as_object_mut().unwrap().remove(key);
            match parse_generator_config(&root) {
                Err(VariantError::MissingConfig { path }) => assert_eq!(path, key),
                other => panic!("{}: expected missing config, got {:?}", key, other),
            }
        }
    }

    #[test]
    fn test_missing_crawler_limit() {
        let mut root = minimal();
        root["ConfigEntityZombie"]
            .as_object_mut()
            .unwrap()
            .remove("enable_walktype_crawler_limit");
        match parse_generator_config(&root) {
            Err(VariantError::MissingConfig { path }) => {
                assert_eq!(path, "ConfigEntityZombie.enable_walktype_crawler_limit");
            }
            other => panic!("expected missing config, got {:?}", other),
        }
    }

    #[test]
    fn test_numbers_become_strings() {
        let mut root = minimal();
        root["ConfigDefaults"]["Mass"] = json!({ "rand_function": "setcreate_one_range", "low": 10, "high": 12.5 });
        let config = parse_generator_config(&root).unwrap();
        let mass = config.default_payload("Mass").unwrap();
        assert_eq!(mass.require("low").unwrap(), "10");
        assert_eq!(mass.require("high").unwrap(), "12.5");
    }

    #[test]
    fn test_bare_numbers_drop_trailing_zeros() {
        let mut root = minimal();
        root["ConfigDefaults"]["Mass"] =
            json!({ "rand_function": "setcreate_one_range", "low": 1.50, "high": "2.50" });
        let config = parse_generator_config(&root).unwrap();
        let mass = config.default_payload("Mass").unwrap();

        let low = mass.require("low").unwrap();
        assert_eq!(low, "1.5");
        assert_eq!(crate::numeric::decimal_places(low), 1);
        assert_eq!(mass.require("high").unwrap(), "2.50");
    }

    #[test]
    fn test_toml_source() {
        let text = r#"
            unique_entity_prefix = "fv"
            ignore_entity_list = {}
            only_allow_these_entities_list = {}

            [ConfigDefaults.WalkType]
            rand_function = "custom_WalkType"

            [ConfigEntityZombie]
            disable_randomizer = 0
            enable_walktype_crawler_limit = 1
            ignore_entity_list = {}
            WalkType = { disable_randomizer = 0 }

            [ConfigEntityEnemyAnimal]
            disable_randomizer = 1
            ignore_entity_list = {}

            [ConfigEntityFriendlyAnimal]
            disable_randomizer = 1
            ignore_entity_list = {}

            [scale_pools]
            normal = [100]
        "#;
        let root: Value = toml::from_str(text).unwrap();
        let config = parse_generator_config(&root).unwrap();
        assert_eq!(config.scale_pools.normal, vec![100]);
        // unspecified pools keep their defaults
        assert_eq!(config.scale_pools.giants, ScalePools::default().giants);
        assert!(config
            .category(EntityCategory::Zombie)
            .unwrap()
            .property("WalkType")
            .is_some());
    }

    #[test]
    fn test_bad_flag() {
        let mut root = minimal();
        root["ConfigEntityZombie"]["disable_randomizer"] = json!([1]);
        assert!(matches!(
            parse_generator_config(&root),
            Err(VariantError::InvalidConfig { .. })
        ));
    }
}
