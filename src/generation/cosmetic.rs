//! Cosmetic variants: tint recolors and material replacement
//!
//! Material draws are deduplicated per run by signature with a bounded
//! number of retries.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::EntityClass;
use crate::core::types::EntityCategory;
use crate::data::materials::{pool, slot_families};
use crate::data::{MaterialFamily, SlotFamilies};
use crate::generation::context::RunContext;

/// Tint records, in the order they are recolored
pub const TINT_PROPERTIES: [&str; 4] = ["TintMaterial1", "TintMaterial2", "TintMaterial3", "TintColor"];
pub const REPLACE_MATERIAL_PREFIX: &str = "ReplaceMaterial";
pub const MAX_COSMETIC_ATTEMPTS: u32 = 3;

/// Fully saturated hues, red round to red
const HUE_WHEEL: [[u8; 3]; 24] = [
    [255, 0, 0], [255, 63, 0], [255, 127, 0], [255, 191, 0],
    [255, 255, 0], [191, 255, 0], [127, 255, 0], [63, 255, 0],
    [0, 255, 0], [0, 255, 63], [0, 255, 127], [0, 255, 191],
    [0, 255, 255], [0, 191, 255], [0, 127, 255], [0, 63, 255],
    [0, 0, 255], [63, 0, 255], [127, 0, 255], [191, 0, 255],
    [255, 0, 255], [255, 0, 191], [255, 0, 127], [255, 0, 63],
];

/// `"r,g,b"` from the hue wheel
pub fn random_rgb<R: Rng + ?Sized>(rng: &mut R) -> String {
    let [r, g, b] = HUE_WHEEL[rng.gen_range(0..HUE_WHEEL.len())];
    format!("{},{},{}", r, g, b)
}

/// Recolor every existing tint record, one draw each
///
/// Missing tint records are not created. Returns the number recolored.
pub fn randomize_tint<R: Rng + ?Sized>(entity: &mut EntityClass, rng: &mut R) -> usize {
    let mut recolored = 0;
    for name in TINT_PROPERTIES {
        for prop in entity.properties_mut().filter(|p| p.name == name) {
            let color = random_rgb(rng);
            tracing::debug!("   Changed {} from {} to {}", name, prop.value, color);
            prop.value = color;
            recolored += 1;
        }
    }
    recolored
}

/// Materials chosen for slots 0, 1 and 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CosmeticDraw {
    pub slots: [Option<&'static str>; 3],
}

impl CosmeticDraw {
    /// Roll every slot independently at its chance
    ///
    /// Slot 1 complements slot 0: glow over solid, solid over anything
    /// see-through or glowing.
    pub fn roll<R, F>(families: &SlotFamilies, chance: F, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
        F: Fn(usize) -> f64,
    {
        let mut slots = [None; 3];
        for (slot, allowed) in families.iter().enumerate() {
            if allowed.is_empty() || rng.gen::<f64>() >= chance(slot) {
                continue;
            }

            let candidates = if slot == 1 {
                match slots[0].and_then(MaterialFamily::of) {
                    Some(MaterialFamily::Solid) => pool(&[MaterialFamily::Glow]),
                    Some(MaterialFamily::Transparent | MaterialFamily::Glow) => {
                        pool(&[MaterialFamily::Solid])
                    }
                    None => pool(allowed),
                }
            } else {
                pool(allowed)
            };
            slots[slot] = candidates.choose(rng).copied();
        }
        Self { slots }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// `entity-slot0-slot1-slot2`, `None` for untouched slots
    pub fn signature(&self, entity: &str) -> String {
        let mut signature = entity.to_string();
        for slot in &self.slots {
            signature.push('-');
            signature.push_str(slot.unwrap_or("None"));
        }
        signature
    }
}

/// Replace materials on enemies; research mode takes every entity and
/// every slot
///
/// Returns the accepted draw, or `None` when cosmetics are off, the entity
/// is not eligible, or it has no material table.
pub fn apply_cosmetics<R: Rng + ?Sized>(
    ctx: &mut RunContext<'_>,
    entity: &mut EntityClass,
    category: EntityCategory,
    rng: &mut R,
) -> Option<CosmeticDraw> {
    let settings = ctx.settings;
    let Some(cosmetics) = &settings.cosmetics else {
        return None;
    };
    if !category.is_enemy() && !settings.research {
        return None;
    }

    let source = entity.original_name().to_string();
    let Some(families) = slot_families(&source) else {
        tracing::warn!("{} has no material table; skipping cosmetics", source);
        return None;
    };

    let chance = |slot: usize| {
        if settings.research {
            1.0
        } else {
            cosmetics.chance_for_slot(slot)
        }
    };

    let mut strikes = 0;
    let draw = loop {
        let draw = CosmeticDraw::roll(families, chance, rng);
        if draw.is_empty() {
            break draw;
        }

        let signature = draw.signature(&source);
        if ctx.remember_cosmetic(signature.clone()) {
            break draw;
        }

        strikes += 1;
        if strikes >= MAX_COSMETIC_ATTEMPTS {
            tracing::warn!("Cosmetic {} repeated {} times; keeping it", signature, strikes);
            break draw;
        }
    };

    for (slot, material) in draw.slots.iter().enumerate() {
        if let Some(material) = material {
            entity.set_property(&format!("{}{}", REPLACE_MATERIAL_PREFIX, slot), material);
        }
    }

    Some(draw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CosmeticSettings, RunSettings};
    use crate::data::materials::{GLOW, SOLID};
    use crate::rules::{parse_generator_config, GeneratorConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use serde_json::json;

    fn config() -> GeneratorConfig {
        parse_generator_config(&json!({
            "unique_entity_prefix": "fv",
            "ignore_entity_list": {},
            "only_allow_these_entities_list": {},
            "ConfigDefaults": {},
            "ConfigEntityZombie": { "disable_randomizer": 0, "ignore_entity_list": {},
                                    "enable_walktype_crawler_limit": 1 },
            "ConfigEntityEnemyAnimal": { "disable_randomizer": 0, "ignore_entity_list": {} },
            "ConfigEntityFriendlyAnimal": { "disable_randomizer": 0, "ignore_entity_list": {} }
        }))
        .unwrap()
    }

    fn variant(source: &str) -> EntityClass {
        let mut entity = EntityClass::new(format!("fv_{}_001", source));
        entity.variant_mut().original_name = source.to_string();
        entity
    }

    #[test]
    fn test_tint_only_recolors_existing() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut entity = EntityClass::new("fv_zombieBoe_001")
            .with_property("TintMaterial2", "36,38,45")
            .with_property("TintColor", "1,1,1");
        assert_eq!(randomize_tint(&mut entity, &mut rng), 2);
        assert!(!entity.has_property("TintMaterial1"));

        let color = entity.property_value("TintMaterial2").unwrap();
        assert!(HUE_WHEEL
            .iter()
            .any(|[r, g, b]| color == format!("{},{},{}", r, g, b)));
    }

    #[test]
    fn test_signature_format() {
        let draw = CosmeticDraw {
            slots: [Some("a/b"), None, Some("c")],
        };
        assert_eq!(draw.signature("zombieBoe"), "zombieBoe-a/b-None-c");
        assert!(CosmeticDraw::default().is_empty());
    }

    #[test]
    fn test_slot_one_complements_slot_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let families = slot_families("zombieYo").unwrap();
        for _ in 0..50 {
            let draw = CosmeticDraw::roll(families, |_| 1.0, &mut rng);
            let first = draw.slots[0].unwrap();
            let second = draw.slots[1].unwrap();
            match MaterialFamily::of(first) {
                Some(MaterialFamily::Solid) => assert!(GLOW.contains(&second)),
                _ => assert!(SOLID.contains(&second)),
            }
            assert!(draw.slots[2].is_none());
        }
    }

    #[test]
    fn test_zero_chance_draws_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let families = slot_families("zombieYo").unwrap();
        assert!(CosmeticDraw::roll(families, |_| 0.0, &mut rng).is_empty());
    }

    #[test]
    fn test_duplicates_retry_then_accept() {
        let config = config();
        let settings = RunSettings {
            cosmetics: Some(CosmeticSettings::uniform(1.0)),
            ..RunSettings::default()
        };
        let mut ctx = RunContext::new(&config, &settings);
        let mut rng = ChaCha8Rng::seed_from_u64(24);

        // single-slot glow table: at most GLOW.len() distinct signatures
        let source = "zombieWightFeral";
        let mut signatures = Vec::new();
        for _ in 0..(GLOW.len() * 4) {
            let mut entity = variant(source);
            let draw = apply_cosmetics(&mut ctx, &mut entity, EntityCategory::Zombie, &mut rng).unwrap();
            let material = entity.property_value("ReplaceMaterial0").unwrap();
            assert_eq!(Some(material), draw.slots[0]);
            signatures.push(draw.signature(source));
        }
        signatures.sort();
        signatures.dedup();
        assert_eq!(signatures.len(), GLOW.len());
    }

    #[test]
    fn test_every_signature_taken_keeps_third_draw() {
        let config = config();
        let settings = RunSettings {
            cosmetics: Some(CosmeticSettings::uniform(1.0)),
            ..RunSettings::default()
        };
        let mut ctx = RunContext::new(&config, &settings);
        let source = "zombieWightFeral";
        for material in GLOW {
            assert!(ctx.remember_cosmetic(format!("{}-{}-None-None", source, material)));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(27);
        let mut replay = rng.clone();
        let families = slot_families(source).unwrap();
        let expected = (0..MAX_COSMETIC_ATTEMPTS)
            .map(|_| CosmeticDraw::roll(families, |_| 1.0, &mut replay))
            .last()
            .unwrap();

        let mut entity = variant(source);
        let draw = apply_cosmetics(&mut ctx, &mut entity, EntityCategory::Zombie, &mut rng).unwrap();
        assert_eq!(draw, expected);
        assert_eq!(entity.property_value("ReplaceMaterial0"), draw.slots[0]);
        // the retry budget consumed exactly three rolls
        assert_eq!(rng.gen::<u64>(), replay.gen::<u64>());
        assert!(!ctx.remember_cosmetic(draw.signature(source)));
    }

    #[test]
    fn test_passive_animals_need_research() {
        let config = config();
        let settings = RunSettings {
            cosmetics: Some(CosmeticSettings::uniform(1.0)),
            ..RunSettings::default()
        };
        let mut ctx = RunContext::new(&config, &settings);
        let mut rng = ChaCha8Rng::seed_from_u64(25);
        let mut stag = variant("animalStag");
        assert!(apply_cosmetics(&mut ctx, &mut stag, EntityCategory::PassiveAnimal, &mut rng).is_none());
    }

    #[test]
    fn test_unknown_entity_is_skipped() {
        let config = config();
        let settings = RunSettings {
            research: true,
            cosmetics: Some(CosmeticSettings::uniform(0.0)),
            ..RunSettings::default()
        };
        let mut ctx = RunContext::new(&config, &settings);
        let mut rng = ChaCha8Rng::seed_from_u64(26);
        let mut entity = variant("zombieNobody");
        assert!(apply_cosmetics(&mut ctx, &mut entity, EntityCategory::Zombie, &mut rng).is_none());
        assert!(entity.properties().next().is_none());
    }
}
