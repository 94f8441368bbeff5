//! Replacement material pools for cosmetic variants
//!
//! Materials fall into three families. Each entity lists, per material
//! slot, which families may replace it; an empty list leaves the slot alone.

use self::MaterialFamily::{Glow, Solid, Transparent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialFamily {
    Solid,
    Transparent,
    Glow,
}

impl MaterialFamily {
    pub fn materials(&self) -> &'static [&'static str] {
        match self {
            Solid => SOLID,
            Transparent => TRANSPARENT,
            Glow => GLOW,
        }
    }

    /// Family a material belongs to, if it is one of ours
    pub fn of(material: &str) -> Option<Self> {
        [Solid, Transparent, Glow]
            .into_iter()
            .find(|family| family.materials().contains(&material))
    }
}

// Avoid for bodies, they render invisible:
//   particleeffects/models/materials/p_fiber
//   materials/occludeeshadowcaster
//   materials/SoftGlow
pub const SOLID: &[&str] = &[
    "entities/animals/boar/materials/grace",
    "entities/buildings/materials/chimney",
    "entities/electrical/materials/electric_fence_post",
    "entities/electrical/materials/flamethrowertrap",
    "entities/electrical/materials/solarpanel",
    "entities/electrical/materials/spotlight",
    "entities/furniture/materials/candelabra",
    "entities/gore/materials/torso_gore",
    "entities/resources/materials/orecoalboulder",
    "entities/resources/materials/oreleadboulder",
    "entities/resources/materials/oreshaleboulder",
    "particleeffects/models/car_explode",
    "particleeffects/models/materials/p_dirt",
    "particleeffects/models/materials/p_gib",
    "particleeffects/models/materials/p_wood",
    "shapes/materials/cabinet_old_top_ft",
    "shapes/materials/wrought_iron_metal",
];

pub const TRANSPARENT: &[&str] = &[
    "entities/buildings/materials/window_glass02_lod",
    "entities/buildings/materials/window_store_glass",
    "materials/waterinbucket",
    "particleeffects/models/materials/p_glass",
    "particleeffects/materials/waterfallslope",
];

pub const GLOW: &[&str] = &[
    "#Entities/Zombies?Zombies/Materials/feral_eye.mat",
    "#Entities/Zombies?Zombies/Materials/feral_radiated.mat",
    "#Entities/Zombies?Zombies/Materials/rad_eye.mat",
    "itemmodeffects/materials/baton_arc_fp",
    "itemmodeffects/materials/melee_fire",
    "materials/wirematerial",
    "particleeffects/materials/p_spark_electricity",
    "particleeffects/models/materials/electrical_arc",
];

/// Allowed families for material slots 0, 1 and 2
pub type SlotFamilies = [&'static [MaterialFamily]; 3];

const NONE: &[MaterialFamily] = &[];
const S: &[MaterialFamily] = &[Solid];
const G: &[MaterialFamily] = &[Glow];
const SG: &[MaterialFamily] = &[Solid, Glow];
const GS: &[MaterialFamily] = &[Glow, Solid];
const ST: &[MaterialFamily] = &[Solid, Transparent];

/// Slot families per source entity; entities not listed get no cosmetics
pub const MATERIAL_SLOTS: &[(&str, SlotFamilies)] = &[
    // body, eyes
    ("animalBear", [S, G, NONE]),
    ("animalBoar", [S, G, NONE]),
    ("animalBossGrace", [S, G, NONE]),
    ("animalChicken", [S, NONE, NONE]),
    // body, spots
    ("animalCoyote", [S, GS, NONE]),
    ("animalDireWolf", [S, G, NONE]),
    ("animalDoe", [S, G, NONE]),
    ("animalMountainLion", [S, NONE, NONE]),
    ("animalRabbit", [S, NONE, NONE]),
    ("animalSnake", [S, NONE, NONE]),
    ("animalStag", [S, NONE, NONE]),
    ("animalZombieBear", [S, G, NONE]),
    ("animalWolf", [S, G, NONE]),
    ("animalZombieDog", [S, G, NONE]),
    ("animalZombieVulture", [S, NONE, NONE]),
    ("animalZombieVultureRadiated", [S, NONE, NONE]),
    ("zombieArlene", [S, NONE, NONE]),
    ("zombieArleneFeral", [G, NONE, NONE]),
    ("zombieArleneRadiated", [S, NONE, NONE]),
    // beard
    ("zombieBiker", [SG, NONE, NONE]),
    ("zombieBikerFeral", [SG, NONE, NONE]),
    ("zombieBikerRadiated", [SG, NONE, NONE]),
    ("zombieBoe", [S, NONE, NONE]),
    ("zombieBoeFeral", [S, NONE, NONE]),
    ("zombieBoeRadiated", [S, NONE, NONE]),
    ("zombieBurnt", [S, NONE, NONE]),
    ("zombieBurntFeral", [S, NONE, NONE]),
    ("zombieBurntRadiated", [S, NONE, NONE]),
    // hair
    ("zombieBusinessMan", [SG, NONE, NONE]),
    ("zombieBusinessManFeral", [SG, NONE, NONE]),
    ("zombieBusinessManRadiated", [SG, NONE, NONE]),
    ("zombieDarlene", [SG, NONE, NONE]),
    ("zombieDarleneFeral", [SG, NONE, NONE]),
    ("zombieDarleneRadiated", [SG, NONE, NONE]),
    ("zombieDemolition", [S, G, NONE]),
    ("zombieFatCop", [S, NONE, NONE]),
    // body, -, eyes
    ("zombieFatCopFeral", [S, NONE, G]),
    ("zombieFatCopRadiated", [S, NONE, NONE]),
    ("zombieFatHawaiian", [S, NONE, NONE]),
    ("zombieFatHawaiianFeral", [S, NONE, NONE]),
    ("zombieFatHawaiianRadiated", [S, NONE, NONE]),
    ("zombieFemaleFat", [SG, NONE, NONE]),
    ("zombieFemaleFatFeral", [SG, NONE, NONE]),
    ("zombieFemaleFatRadiated", [SG, NONE, NONE]),
    ("zombieJanitor", [SG, NONE, NONE]),
    ("zombieJanitorFeral", [SG, NONE, NONE]),
    ("zombieJanitorRadiated", [SG, NONE, NONE]),
    ("zombieJoe", [SG, NONE, NONE]),
    ("zombieJoeFeral", [SG, NONE, NONE]),
    ("zombieJoeRadiated", [SG, NONE, NONE]),
    ("zombieLab", [S, G, ST]),
    ("zombieLabFeral", [S, G, ST]),
    ("zombieLabRadiated", [S, G, ST]),
    ("zombieLumberjack", [SG, NONE, NONE]),
    ("zombieLumberjackFeral", [G, NONE, NONE]),
    ("zombieLumberjackRadiated", [SG, NONE, NONE]),
    ("zombieMarlene", [S, NONE, NONE]),
    ("zombieMarleneFeral", [S, NONE, NONE]),
    ("zombieMarleneRadiated", [S, NONE, NONE]),
    ("zombieMaleHazmat", [S, NONE, NONE]),
    ("zombieMaleHazmatFeral", [G, NONE, NONE]),
    ("zombieMaleHazmatRadiated", [S, NONE, NONE]),
    // body, hair
    ("zombieMoe", [S, GS, NONE]),
    ("zombieMoeFeral", [S, GS, NONE]),
    ("zombieMoeRadiated", [S, GS, NONE]),
    ("zombieMutated", [S, NONE, NONE]),
    ("zombieMutatedFeral", [S, NONE, NONE]),
    ("zombieMutatedRadiated", [S, NONE, NONE]),
    ("zombieNurse", [S, NONE, NONE]),
    ("zombieNurseFeral", [S, NONE, NONE]),
    ("zombieNurseRadiated", [S, NONE, NONE]),
    ("zombiePartyGirl", [SG, NONE, NONE]),
    ("zombiePartyGirlFeral", [SG, NONE, NONE]),
    ("zombiePartyGirlRadiated", [SG, NONE, NONE]),
    ("zombieScreamer", [S, NONE, NONE]),
    ("zombieScreamerFeral", [S, NONE, NONE]),
    ("zombieScreamerRadiated", [S, NONE, NONE]),
    ("zombieSkateboarder", [S, NONE, NONE]),
    ("zombieSkateboarderFeral", [S, NONE, NONE]),
    ("zombieSkateboarderRadiated", [S, NONE, NONE]),
    ("zombieSoldier", [S, G, NONE]),
    ("zombieSoldierFeral", [S, NONE, NONE]),
    ("zombieSoldierRadiated", [S, NONE, NONE]),
    ("zombieSpider", [S, NONE, NONE]),
    ("zombieSpiderFeral", [S, NONE, NONE]),
    ("zombieSpiderRadiated", [S, NONE, NONE]),
    ("zombieSteve", [S, G, NONE]),
    ("zombieSteveCrawler", [S, G, NONE]),
    ("zombieSteveCrawlerFeral", [S, G, NONE]),
    ("zombieSteveFeral", [S, G, NONE]),
    ("zombieSteveRadiated", [S, G, NONE]),
    ("zombieTomClark", [S, NONE, NONE]),
    ("zombieTomClarkFeral", [S, NONE, NONE]),
    ("zombieTomClarkRadiated", [S, NONE, NONE]),
    ("zombieUtilityWorker", [S, NONE, NONE]),
    ("zombieUtilityWorkerFeral", [G, NONE, NONE]),
    ("zombieUtilityWorkerRadiated", [G, NONE, NONE]),
    ("zombieWightFeral", [G, NONE, NONE]),
    ("zombieWightRadiated", [G, NONE, NONE]),
    ("zombieYo", [S, G, NONE]),
    ("zombieYoFeral", [S, G, NONE]),
    ("zombieYoRadiated", [S, G, NONE]),
];

/// Allowed slot families for `entity`
pub fn slot_families(entity: &str) -> Option<&'static SlotFamilies> {
    MATERIAL_SLOTS
        .iter()
        .find(|(name, _)| *name == entity)
        .map(|(_, slots)| slots)
}

/// Concatenated materials of `families`, in order
pub fn pool(families: &[MaterialFamily]) -> Vec<&'static str> {
    families
        .iter()
        .flat_map(|family| family.materials().iter().copied())
        .collect()
}
