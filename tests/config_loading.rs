//! Generator configuration files on disk, and the cascade they drive

use std::path::PathBuf;

use variant_forge::core::error::VariantError;
use variant_forge::core::types::EntityCategory;
use variant_forge::rules::{load_generator_config, Mutation};

const JSON_CONFIG: &str = r#"{
    "unique_entity_prefix": "fv",
    "ignore_entity_list": { "zombieDemolition": "breaks saves" },
    "only_allow_these_entities_list": {},
    "ConfigDefaults": {
        "JumpMaxDistance": { "rand_function": "setcreate_one_range", "low": "1.0", "high": "2.0" },
        "MoveSpeedAggro": { "rand_function": "setcreate_two_range",
                            "low1": "0.4", "low2": "0.8", "high1": "1.2", "high2": "1.6" }
    },
    "ConfigEntityZombie": {
        "disable_randomizer": 0,
        "num_generation_loops": 1,
        "ignore_entity_list": {},
        "enable_walktype_crawler_limit": 2,
        "JumpMaxDistance": {
            "disable_randomizer": 0,
            "low": "2.5",
            "high": "3.0",
            "zombieSpider": { "low": "5.0", "high": "6.0" },
            "zombieFatCop": { "disable_randomizer": 1 }
        },
        "MoveSpeedAggro": { "disable_randomizer": 1, "zombieFeral": { "disable_randomizer": 0,
                            "low1": "0.5", "low2": "0.6", "high1": "1.0", "high2": "1.1" } }
    },
    "ConfigEntityEnemyAnimal": { "disable_randomizer": 1, "ignore_entity_list": {} },
    "ConfigEntityFriendlyAnimal": { "disable_randomizer": 0, "ignore_entity_list": { "animalChicken": "too small" } }
}"#;

fn write_scratch(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("variant-forge-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

const Z: EntityCategory = EntityCategory::Zombie;

#[test]
fn test_json_file_cascade() {
    let path = write_scratch("config.json", JSON_CONFIG);
    let config = load_generator_config(&path).unwrap();

    assert_eq!(config.crawler_limit, 2);
    assert!(config.ignore_entity_list.contains_key("zombieDemolition"));
    assert!(config.category(EntityCategory::HostileAnimal).unwrap().disabled);
    assert!(config
        .category(EntityCategory::PassiveAnimal)
        .unwrap()
        .ignores("animalChicken"));

    // property block payload
    assert_eq!(
        config.resolve_mutation(Z, "JumpMaxDistance", Some("zombieBoe")).unwrap(),
        Some(Mutation::OneRange { low: "2.5".into(), high: "3.0".into() })
    );
    // entity block payload
    assert_eq!(
        config.resolve_mutation(Z, "JumpMaxDistance", Some("zombieSpider")).unwrap(),
        Some(Mutation::OneRange { low: "5.0".into(), high: "6.0".into() })
    );
    // entity block switches it off
    assert_eq!(
        config.resolve_mutation(Z, "JumpMaxDistance", Some("zombieFatCop")).unwrap(),
        None
    );
    // disabled property, re-enabled for one entity with its own payload
    assert_eq!(config.resolve_mutation(Z, "MoveSpeedAggro", Some("zombieBoe")).unwrap(), None);
    assert!(matches!(
        config.resolve_mutation(Z, "MoveSpeedAggro", Some("zombieFeral")).unwrap(),
        Some(Mutation::TwoRange { ref low1, scale: None, .. }) if low1 == "0.5"
    ));
}

#[test]
fn test_toml_file_matches_json() {
    let toml_text = r#"
        unique_entity_prefix = "fv"
        modlet_name_prefix = "freaks"
        ignore_entity_list = {}
        only_allow_these_entities_list = {}

        [ConfigDefaults.JumpMaxDistance]
        rand_function = "setcreate_one_range"
        low = "1.0"
        high = "2.0"

        [ConfigEntityZombie]
        disable_randomizer = 0
        ignore_entity_list = {}
        enable_walktype_crawler_limit = 1

        [ConfigEntityZombie.JumpMaxDistance]
        disable_randomizer = 0

        [ConfigEntityEnemyAnimal]
        disable_randomizer = 0
        ignore_entity_list = {}

        [ConfigEntityFriendlyAnimal]
        disable_randomizer = 0
        ignore_entity_list = {}
    "#;
    let path = write_scratch("config.toml", toml_text);
    let config = load_generator_config(&path).unwrap();

    assert_eq!(config.modlet_name_prefix, "freaks");
    // a bare flag keeps the default payload
    assert_eq!(
        config.resolve_mutation(Z, "JumpMaxDistance", None).unwrap(),
        Some(Mutation::OneRange { low: "1.0".into(), high: "2.0".into() })
    );
}

#[test]
fn test_missing_category_names_key() {
    let path = write_scratch(
        "partial.json",
        r#"{ "unique_entity_prefix": "fv", "ignore_entity_list": {},
             "only_allow_these_entities_list": {}, "ConfigDefaults": {} }"#,
    );
    match load_generator_config(&path) {
        Err(VariantError::MissingConfig { path }) => assert_eq!(path, "ConfigEntityZombie"),
        other => panic!("expected missing config, got {:?}", other.map(|c| c.unique_entity_prefix)),
    }
}

#[test]
fn test_unreadable_sources() {
    let missing = std::env::temp_dir().join("variant-forge-no-such-config.json");
    assert!(matches!(load_generator_config(&missing), Err(VariantError::IoError(_))));

    let broken = write_scratch("broken.json", "{ not json");
    assert!(matches!(load_generator_config(&broken), Err(VariantError::SerdeError(_))));

    let broken_toml = write_scratch("broken.toml", "= nope");
    assert!(matches!(load_generator_config(&broken_toml), Err(VariantError::TomlError(_))));
}
