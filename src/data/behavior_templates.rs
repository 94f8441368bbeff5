//! Canned behavior templates
//!
//! Each template is an ordered run of task/target records. Every task and
//! target list closes with an empty-valued record that the game treats as
//! the end marker.

use crate::catalog::{EntityNode, Property};

/// `(name, value, extra data)`
pub type TemplateRecord = (&'static str, &'static str, Option<&'static str>);

/// A named behavior template, keyed by the entity that owns it canonically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorTemplate {
    pub owner: &'static str,
    pub records: &'static [TemplateRecord],
}

impl BehaviorTemplate {
    /// Template records as entity nodes, in order
    pub fn to_nodes(&self) -> Vec<EntityNode> {
        self.records
            .iter()
            .map(|&(name, value, data)| {
                let prop = Property::new(name, value);
                EntityNode::Property(match data {
                    Some(data) => prop.with_data(data),
                    None => prop,
                })
            })
            .collect()
    }
}

/// Behavior-task and behavior-target records are what a swap replaces
pub fn is_behavior_record(name: &str) -> bool {
    name.starts_with("AITask-") || name.starts_with("AITarget-")
}

const BEAR: &[TemplateRecord] = &[
    ("AITask-1", "BreakBlock", None),
    ("AITask-2", "DestroyArea", None),
    ("AITask-3", "Territorial", None),
    ("AITask-4", "ApproachAndAttackTarget", Some("class=EntityAnimalStag,40,EntityPlayer,25,EntityZombie,30")),
    ("AITask-5", "ApproachSpot", None),
    ("AITask-6", "Look", None),
    ("AITask-7", "Wander", None),
    ("AITask-8", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", None),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestEntityAsTarget", Some("class=EntityPlayer,13,8,EntityAnimalStag,0,0,EntityZombie,0,0")),
    ("AITarget-4", "", None),
];

const ZOMBIE_BEAR: &[TemplateRecord] = &[
    ("AITask-1", "BreakBlock", None),
    ("AITask-2", "DestroyArea", None),
    ("AITask-3", "Territorial", None),
    ("AITask-4", "ApproachAndAttackTarget", Some("class=EntityAnimalStag,40,EntityPlayer,0,EntityNPC,0")),
    ("AITask-5", "ApproachSpot", None),
    ("AITask-6", "Look", None),
    ("AITask-7", "Wander", None),
    ("AITask-8", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", None),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestEntityAsTarget", Some("class=EntityPlayer,13,8,EntityAnimalStag,0,0")),
    ("AITarget-4", "", None),
];

const WOLF: &[TemplateRecord] = &[
    ("AITask-1", "BreakBlock", None),
    ("AITask-2", "Territorial", None),
    ("AITask-3", "RunawayWhenHurt", Some("runChance=0.5;healthPer=0.3;healthPerMax=0.6")),
    ("AITask-4", "ApproachAndAttackTarget", Some("class=EntityAnimalStag,20,EntityPlayer,15,EntityZombie,20")),
    ("AITask-5", "ApproachSpot", None),
    ("AITask-6", "Look", None),
    ("AITask-7", "Wander", None),
    ("AITask-8", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", None),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestEntityAsTarget", Some("class=EntityPlayer,14,8,EntityAnimalStag,0,0,EntityZombie,0,0")),
    ("AITarget-4", "", None),
];

const COYOTE: &[TemplateRecord] = &[
    ("AITask-1", "BreakBlock", None),
    ("AITask-2", "Territorial", None),
    ("AITask-3", "RunawayWhenHurt", Some("runChance=.9;healthPer=.6;healthPerMax=0.75")),
    ("AITask-4", "ApproachAndAttackTarget", Some("class=EntityAnimalRabbit,8,EntityPlayer,10")),
    ("AITask-5", "ApproachSpot", None),
    ("AITask-6", "Look", None),
    ("AITask-7", "Wander", None),
    ("AITask-8", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", None),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestEntityAsTarget", Some("class=EntityPlayer,15,10,EntityAnimalRabbit,0,18")),
    ("AITarget-4", "", None),
];

const DIREWOLF: &[TemplateRecord] = &[
    ("AITask-1", "BreakBlock", None),
    ("AITask-2", "Territorial", None),
    ("AITask-3", "ApproachAndAttackTarget", Some("class=EntityAnimalStag,30,EntityPlayer,30")),
    ("AITask-4", "ApproachSpot", None),
    ("AITask-5", "Look", None),
    ("AITask-6", "Wander", None),
    ("AITask-7", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", None),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestEntityAsTarget", Some("class=EntityPlayer,29,24,EntityAnimalStag,0,0")),
    ("AITarget-4", "", None),
];

const MOUNTAIN_LION: &[TemplateRecord] = &[
    ("AITask-1", "Leap", Some("legs=4")),
    ("AITask-2", "BreakBlock", None),
    ("AITask-3", "Territorial", None),
    ("AITask-4", "RunawayWhenHurt", Some("runChance=.4;healthPer=.1;healthPerMax=.4")),
    ("AITask-5", "ApproachAndAttackTarget", Some("class=EntityAnimalStag,30,EntityPlayer,15,EntityZombie,20")),
    ("AITask-6", "ApproachSpot", None),
    ("AITask-7", "Look", None),
    ("AITask-8", "Wander", None),
    ("AITask-9", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", None),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestEntityAsTarget", Some("class=EntityPlayer,14,9,EntityAnimalStag,0,0,EntityZombie,0,5")),
    ("AITarget-4", "", None),
];

const SNAKE: &[TemplateRecord] = &[
    ("AITask-1", "BreakBlock", None),
    ("AITask-2", "Territorial", None),
    ("AITask-3", "ApproachAndAttackTarget", Some("class=EntityPlayer,15,EntityNPC,15")),
    ("AITask-4", "ApproachSpot", None),
    ("AITask-5", "Look", None),
    ("AITask-6", "Wander", None),
    ("AITask-7", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", Some("class=EntityNPC,EntityPlayer")),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestCorpseAsTarget", Some("class=EntityPlayer")),
    ("AITarget-4", "SetNearestEntityAsTarget", Some("class=EntityPlayer,12,0,EntityNPC,0,0")),
    ("AITarget-5", "", None),
];

// Territorial added; stock boars mostly stand still
const BOAR: &[TemplateRecord] = &[
    ("AITask-1", "BreakBlock", None),
    ("AITask-2", "Territorial", None),
    ("AITask-3", "ApproachAndAttackTarget", Some("class=EntityNPC,20,EntityPlayer,20")),
    ("AITask-4", "ApproachSpot", None),
    ("AITask-5", "Look", None),
    ("AITask-6", "Wander", None),
    ("AITask-7", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", None),
    ("AITarget-2", "BlockIf", Some("condition=alert e 0")),
    ("AITarget-3", "BlockingTargetTask", None),
    ("AITarget-4", "SetNearestEntityAsTarget", Some("class=EntityPlayer,20,15,EntityNPC,15,10")),
    ("AITarget-5", "", None),
];

const GRACE: &[TemplateRecord] = &[
    ("AITask-1", "BreakBlock", None),
    ("AITask-2", "DestroyArea", None),
    ("AITask-3", "Territorial", None),
    ("AITask-4", "ApproachAndAttackTarget", Some("class=EntityPlayer,30,EntityZombie,10")),
    ("AITask-5", "ApproachSpot", None),
    ("AITask-6", "Look", None),
    ("AITask-7", "Wander", None),
    ("AITask-8", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", None),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestCorpseAsTarget", Some("class=EntityPlayer")),
    ("AITarget-4", "SetNearestEntityAsTarget", Some("class=EntityPlayer,0,0,EntityZombie,0,3")),
    ("AITarget-5", "", None),
];

const DOG: &[TemplateRecord] = &[
    ("AITask-1", "BreakBlock", None),
    ("AITask-2", "Territorial", None),
    ("AITask-3", "ApproachAndAttackTarget", Some("class=EntityPlayer,20,EntityNPC,20")),
    ("AITask-4", "ApproachSpot", None),
    ("AITask-5", "Look", None),
    ("AITask-6", "Wander", None),
    ("AITask-7", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", Some("class=EntityNPC,EntityPlayer")),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestCorpseAsTarget", Some("class=EntityPlayer")),
    ("AITarget-4", "SetNearestEntityAsTarget", Some("class=EntityPlayer,20,0,EntityNPC,0,0")),
    ("AITarget-5", "", None),
];

const ZOMBIE: &[TemplateRecord] = &[
    ("AIFeralSense", "1.5", None),
    ("AINoiseSeekDist", "8", None),
    ("AIPathCostScale", ".15, .4", None),
    ("AITask-1", "BreakBlock", None),
    ("AITask-2", "DestroyArea", None),
    ("AITask-3", "Territorial", None),
    ("AITask-4", "ApproachDistraction", None),
    // class, max chase time
    ("AITask-5", "ApproachAndAttackTarget", Some("class=EntityNPC,0,EntityEnemyAnimal,0,EntityPlayer,0")),
    ("AITask-6", "ApproachSpot", None),
    ("AITask-7", "Look", None),
    ("AITask-8", "Wander", None),
    ("AITask-9", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", Some("class=EntityNPC,EntityEnemyAnimal,EntityPlayer")),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestCorpseAsTarget", Some("class=EntityPlayer")),
    // class, hear distance, see distance; 0 uses the entity default
    ("AITarget-4", "SetNearestEntityAsTarget", Some("class=EntityPlayer,0,0,EntityNPC,0,0")),
    ("AITarget-5", "", None),
];

const SPIDER: &[TemplateRecord] = &[
    ("AINoiseSeekDist", "3", None),
    ("AIPathCostScale", ".6, 1", None),
    ("AITask-1", "Leap", None),
    ("AITask-2", "BreakBlock", None),
    ("AITask-3", "DestroyArea", None),
    ("AITask-4", "Territorial", None),
    ("AITask-5", "ApproachDistraction", None),
    ("AITask-6", "ApproachAndAttackTarget", Some("class=EntityNPC,0,EntityEnemyAnimal,0,EntityPlayer,0")),
    ("AITask-7", "ApproachSpot", None),
    ("AITask-8", "Look", None),
    ("AITask-9", "Wander", None),
    ("AITask-10", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", Some("class=EntityNPC,EntityEnemyAnimal,EntityPlayer")),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestCorpseAsTarget", Some("class=EntityPlayer")),
    ("AITarget-4", "SetNearestEntityAsTarget", Some("class=EntityPlayer,0,0,EntityNPC,0,0")),
    ("AITarget-5", "", None),
];

const COP: &[TemplateRecord] = &[
    ("AINoiseSeekDist", "8", None),
    ("AIPathCostScale", ".15, .4", None),
    ("AITask-1", "BreakBlock", None),
    ("AITask-2", "ApproachAndAttackTarget", Some("class=EntityNPC,0,EntityPlayer")),
    ("AITask-3", "ApproachSpot", None),
    ("AITask-4", "Look", None),
    ("AITask-5", "Wander", None),
    ("AITask-6", "", None),
    ("AITarget-1", "SetAsTargetIfHurt", Some("class=EntityNPC,EntityEnemyAnimal,EntityPlayer")),
    ("AITarget-2", "BlockingTargetTask", None),
    ("AITarget-3", "SetNearestCorpseAsTarget", Some("class=EntityPlayer")),
    ("AITarget-4", "SetNearestEntityAsTarget", Some("class=EntityPlayer,0,0,EntityNPC,0,0")),
    ("AITarget-5", "", None),
];

/// Smaller hostile animals
pub const SMALL_PREDATORS: &[BehaviorTemplate] = &[
    BehaviorTemplate { owner: "animalWolf", records: WOLF },
    BehaviorTemplate { owner: "animalCoyote", records: COYOTE },
    BehaviorTemplate { owner: "animalSnake", records: SNAKE },
    BehaviorTemplate { owner: "animalBoar", records: BOAR },
    BehaviorTemplate { owner: "animalZombieDog", records: DOG },
];

/// Large hostile animals
pub const LARGE_PREDATORS: &[BehaviorTemplate] = &[
    BehaviorTemplate { owner: "animalBear", records: BEAR },
    BehaviorTemplate { owner: "animalZombieBear", records: ZOMBIE_BEAR },
    BehaviorTemplate { owner: "animalDireWolf", records: DIREWOLF },
    BehaviorTemplate { owner: "animalBossGrace", records: GRACE },
    BehaviorTemplate { owner: "animalMountainLion", records: MOUNTAIN_LION },
];

pub const UNDEAD: &[BehaviorTemplate] = &[
    BehaviorTemplate { owner: "zombieTemplateMale", records: ZOMBIE },
    BehaviorTemplate { owner: "zombieSpider", records: SPIDER },
    BehaviorTemplate { owner: "zombieFatCop", records: COP },
];

/// Zombie animals and most timid animals always keep their own behavior
pub const BEHAVIOR_EXCEPTIONS: &[&str] = &[
    "animalZombieBear",
    "animalZombieVulture",
    "animalZombieVultureRadiated",
    "animalZombieDog",
    "animalRabbit",
    "animalChicken",
    "animalDoe",
];

/// Bite weapons handed to raging animals; duplicates weight the draw
pub const RAGE_BITES: &[&str] = &[
    "meleeHandAnimalWolf",
    "meleeHandAnimalBear",
    "meleeHandAnimalZombieDog",
    "meleeHandAnimalDireWolf",
    "meleeHandAnimalBear",
    "meleeHandAnimalZombieBear",
    "meleeHandBossGrace",
];

/// Every template eligible for an altered-behavior swap
pub fn all_templates() -> impl Iterator<Item = &'static BehaviorTemplate> {
    SMALL_PREDATORS
        .iter()
        .chain(LARGE_PREDATORS.iter())
        .chain(UNDEAD.iter())
}

/// Hostile-animal templates used for raging animals
pub fn predator_templates() -> impl Iterator<Item = &'static BehaviorTemplate> {
    SMALL_PREDATORS.iter().chain(LARGE_PREDATORS.iter())
}

pub fn is_exception(name: &str) -> bool {
    BEHAVIOR_EXCEPTIONS.contains(&name)
}
