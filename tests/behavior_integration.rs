//! Behavior swaps and raging animals through a full generation run

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

use variant_forge::catalog::{Catalog, EntityClass};
use variant_forge::core::config::RunSettings;
use variant_forge::generation::generate;
use variant_forge::rules::{parse_generator_config, GeneratorConfig};
use variant_forge::taxonomy::Taxonomy;

fn catalog() -> Catalog {
    Catalog::load_from_json(
        r#"{
            "entity_classes": [
                { "name": "animalWolf", "nodes": [
                    { "kind": "property", "name": "Class", "value": "EntityEnemyAnimal" },
                    { "kind": "property", "name": "AITask-1", "value": "Territorial" },
                    { "kind": "property", "name": "AITask-2", "value": "" },
                    { "kind": "property", "name": "AITarget-1", "value": "SetAsTargetIfHurt" },
                    { "kind": "property", "name": "AITarget-2", "value": "" },
                    { "kind": "property", "name": "Tags", "value": "animal" }
                ] },
                { "name": "animalZombieDog", "nodes": [
                    { "kind": "property", "name": "Class", "value": "EntityEnemyAnimal" },
                    { "kind": "property", "name": "AITask-1", "value": "Wander" }
                ] },
                { "name": "animalStag", "nodes": [
                    { "kind": "property", "name": "Class", "value": "EntityAnimalStag" },
                    { "kind": "property", "name": "AITask-1", "value": "RunawayWhenHurt" },
                    { "kind": "effect_group", "name": "Base Effects", "effects": [
                        { "name": "HealthMax", "operation": "base_set", "value": "200" }
                    ] },
                    { "kind": "property", "name": "Tags", "value": "animal" }
                ] }
            ]
        }"#,
    )
    .unwrap()
}

fn config() -> GeneratorConfig {
    parse_generator_config(&json!({
        "unique_entity_prefix": "fv",
        "ignore_entity_list": {},
        "only_allow_these_entities_list": {},
        "scale_pools": {
            "normal": [100], "normal_animal_extra": [], "normal_passive_extra": []
        },
        "ConfigDefaults": {
            "HealthMax": { "rand_function": "custom_HealthAndExperienceGain",
                           "pct_random_int": "0", "experience_gain_default_int": "500" }
        },
        "ConfigEntityZombie": { "disable_randomizer": 0, "ignore_entity_list": {},
                                "enable_walktype_crawler_limit": 1 },
        "ConfigEntityEnemyAnimal": { "disable_randomizer": 0, "ignore_entity_list": {} },
        "ConfigEntityFriendlyAnimal": {
            "disable_randomizer": 0,
            "ignore_entity_list": {},
            "HealthMax": { "disable_randomizer": 0 }
        }
    }))
    .unwrap()
}

fn settings() -> RunSettings {
    RunSettings {
        zombie_count: 0,
        hostile_count: 3,
        passive_count: 2,
        altered_ai_chance: Some(1.0),
        raging_chance: Some(1.0),
        ..RunSettings::default()
    }
}

fn tasks(entity: &EntityClass) -> Vec<(&str, &str)> {
    entity
        .properties()
        .filter(|p| p.name.starts_with("AITask-") || p.name.starts_with("AITarget-"))
        .map(|p| (p.name.as_str(), p.value.as_str()))
        .collect()
}

#[test]
fn test_altered_ai_and_raging() {
    let catalog = catalog();
    let taxonomy = Taxonomy::resolve(&catalog).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let run = generate(&catalog, &taxonomy, &config(), &settings(), &mut rng).unwrap();

    // three wolves swapped, the zombie dog is an exception
    assert_eq!(run.stats.behavior_swaps, 3);
    assert_eq!(run.stats.raging, 2);

    for variant in &run.variants {
        let entity = &variant.entity;
        let meta = entity.variant.as_ref().unwrap();
        match variant.source.as_str() {
            "animalWolf" => {
                let owner = meta.applied_behavior_template.as_deref().unwrap();
                assert_ne!(owner, "animalWolf");
                assert!(!tasks(entity).contains(&("AITask-1", "Territorial")));
                // the closing record stays last
                assert_eq!(entity.properties().last().unwrap().name, "Tags");
            }
            "animalZombieDog" => {
                assert!(meta.applied_behavior_template.is_none());
                assert_eq!(tasks(entity), vec![("AITask-1", "Wander")]);
            }
            "animalStag" => {
                assert!(meta.is_raging);
                assert_eq!(entity.property_value("IsEnemyEntity"), Some("true"));
                assert_eq!(entity.property_value("Class"), Some("EntityEnemyAnimal"));
                assert!(entity.property_value("HandItem").unwrap().starts_with("meleeHand"));
                assert!(!tasks(entity).contains(&("AITask-1", "RunawayWhenHurt")));

                // raging triples health and adds a quarter more experience
                let health = entity
                    .effect_group("Base Effects")
                    .and_then(|g| g.effects.iter().find(|e| e.name == "HealthMax"))
                    .unwrap();
                assert_eq!(health.value, "600");
                assert_eq!(entity.property_value("ExperienceGain"), Some("1875"));
            }
            other => panic!("unexpected source {}", other),
        }
    }

    let raging_details = run
        .stats
        .details
        .keys()
        .filter(|k| k.starts_with("Raging animalStag Bite "))
        .count();
    assert!(raging_details >= 1);
}

#[test]
fn test_catalog_templates_untouched() {
    let catalog = catalog();
    let before = catalog.get("animalStag").unwrap().clone();
    let taxonomy = Taxonomy::resolve(&catalog).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(43);
    generate(&catalog, &taxonomy, &config(), &settings(), &mut rng).unwrap();

    assert_eq!(catalog.get("animalStag"), Some(&before));
}
