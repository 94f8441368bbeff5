//! Modlet rendering and writing

use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

use variant_forge::catalog::Catalog;
use variant_forge::core::config::{HeadshotSettings, RunSettings};
use variant_forge::generation::generate;
use variant_forge::modlet::{Modlet, LOCALIZATION_HEADER};
use variant_forge::rules::{parse_generator_config, GeneratorConfig};
use variant_forge::taxonomy::Taxonomy;

fn catalog() -> Catalog {
    Catalog::load_from_json(
        r#"{
            "entity_classes": [
                { "name": "zombieBoe", "nodes": [
                    { "kind": "property", "name": "Class", "value": "EntityZombie" },
                    { "kind": "property", "name": "TintColor", "value": "1,1,1" }
                ] },
                { "name": "animalWolf", "nodes": [
                    { "kind": "property", "name": "Class", "value": "EntityEnemyAnimal" }
                ] }
            ],
            "entity_groups": [
                { "name": "ZombiesAll", "entries": [ { "name": "zombieBoe" } ] },
                { "name": "WolfPack", "entries": [ { "name": "animalWolf", "prob": "0.2" } ] }
            ]
        }"#,
    )
    .unwrap()
}

fn config() -> GeneratorConfig {
    parse_generator_config(&json!({
        "unique_entity_prefix": "fv",
        "modlet_name_prefix": "forged",
        "ignore_entity_list": {},
        "only_allow_these_entities_list": {},
        "scale_pools": { "normal": [100], "normal_animal_extra": [] },
        "ConfigDefaults": {
            "TintColor": { "rand_function": "custom_TintMaterial" }
        },
        "ConfigEntityZombie": {
            "disable_randomizer": 0,
            "ignore_entity_list": {},
            "enable_walktype_crawler_limit": 1,
            "TintColor": { "disable_randomizer": 0 }
        },
        "ConfigEntityEnemyAnimal": { "disable_randomizer": 0, "ignore_entity_list": {} },
        "ConfigEntityFriendlyAnimal": { "disable_randomizer": 0, "ignore_entity_list": {} }
    }))
    .unwrap()
}

fn settings() -> RunSettings {
    RunSettings {
        zombie_count: 2,
        hostile_count: 1,
        passive_count: 0,
        headshot: Some(HeadshotSettings::default()),
        game_version: Some("A21".into()),
        ..RunSettings::default()
    }
}

fn build() -> Modlet {
    let catalog = catalog();
    let taxonomy = Taxonomy::resolve(&catalog).unwrap();
    let config = config();
    let settings = settings();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let run = generate(&catalog, &taxonomy, &config, &settings, &mut rng).unwrap();
    Modlet::build(&config, &settings, &catalog, &run, "-z 2 -e 1 --hs")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("variant-forge-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_modlet_contents() {
    let modlet = build();
    assert_eq!(modlet.name, "forged_HS-A21");

    let entities = modlet.file("Config/entityclasses.xml").unwrap();
    assert!(entities.starts_with("<fv>\n<append xpath=\"/entity_classes\">\n"));
    assert!(entities.ends_with("</append>\n</fv>\n"));
    let boe1 = entities.find("name=\"fv_zombieBoe_001\"").unwrap();
    let boe2 = entities.find("name=\"fv_zombieBoe_002\"").unwrap();
    let wolf = entities.find("name=\"fv_animalWolf_001\"").unwrap();
    assert!(wolf < boe1 && boe1 < boe2);
    // the tint was recolored
    assert!(!entities.contains("value=\"1,1,1\""));

    let groups = modlet.file("Config/entitygroups.xml").unwrap();
    assert!(groups.contains("<append xpath=\"/entitygroups/entitygroup[@name='WolfPack']\">"));
    assert!(groups.contains("\t<entity name=\"fv_animalWolf_001\" prob=\"0.2\"/>"));
    assert!(groups.contains("\t<entity name=\"fv_zombieBoe_002\"/>"));

    assert_eq!(modlet.file("Config/Localization.txt"), Some(LOCALIZATION_HEADER));
    assert!(modlet.file("Config/items.xml").unwrap().contains("value=\"150\""));
    assert!(modlet.file("entities.info").unwrap().contains("===== Zombies =====\nzombieBoe\n"));
    assert!(modlet
        .file("settings.info")
        .unwrap()
        .starts_with("Options Used: -z 2 -e 1 --hs\n"));
}

#[test]
fn test_write_to_disk() {
    let modlet = build();
    let out = scratch_dir("write");

    let root = modlet.write_to(&out).unwrap();
    assert_eq!(root, out.join("forged_HS-A21"));
    for file in &modlet.files {
        let written = std::fs::read_to_string(root.join(&file.path)).unwrap();
        assert_eq!(written, file.contents);
    }
    assert!(root.join("ModInfo.xml").exists());

    let _ = std::fs::remove_dir_all(&out);
}

#[test]
fn test_empty_run_still_writes_modlet() {
    let catalog = catalog();
    let taxonomy = Taxonomy::resolve(&catalog).unwrap();
    let config = config();
    let settings = RunSettings {
        zombie_count: 0,
        hostile_count: 0,
        passive_count: 0,
        ..RunSettings::default()
    };
    let run = generate(&catalog, &taxonomy, &config, &settings, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
    assert!(run.is_empty());

    let modlet = Modlet::build(&config, &settings, &catalog, &run, "");
    assert_eq!(modlet.name, "forged");
    assert_eq!(
        modlet.file("Config/entityclasses.xml"),
        Some("<fv>\n<append xpath=\"/entity_classes\">\n</append>\n</fv>\n")
    );
    assert!(modlet.file("Config/items.xml").is_none());

    let out = scratch_dir("empty");
    let root = modlet.write_to(&out).unwrap();
    assert!(root.join("Config/entitygroups.xml").exists());
    let _ = std::fs::remove_dir_all(&out);
}
