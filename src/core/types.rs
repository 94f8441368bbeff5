//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Entity name substituted when a lookup is made without one
pub const UNDEFINED_ENTITY: &str = "UNDEFINED";

/// Entity category enumeration
///
/// Each category owns one configuration table and one canonical type bucket
/// in the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityCategory {
    /// Hostile undead
    Zombie,
    /// Hostile animals
    HostileAnimal,
    /// Passive (timid) animals
    PassiveAnimal,
}

impl EntityCategory {
    /// Generation order
    pub const ALL: [EntityCategory; 3] = [
        EntityCategory::Zombie,
        EntityCategory::HostileAnimal,
        EntityCategory::PassiveAnimal,
    ];

    /// Key of this category's table in the generator configuration
    pub fn config_key(&self) -> &'static str {
        match self {
            EntityCategory::Zombie => "ConfigEntityZombie",
            EntityCategory::HostileAnimal => "ConfigEntityEnemyAnimal",
            EntityCategory::PassiveAnimal => "ConfigEntityFriendlyAnimal",
        }
    }

    /// Canonical type whose entities are cloned for this category
    pub fn type_tag(&self) -> &'static str {
        match self {
            EntityCategory::Zombie => "EntityZombie",
            EntityCategory::HostileAnimal => "EntityEnemyAnimal",
            EntityCategory::PassiveAnimal => "EntityAnimalStag",
        }
    }

    pub fn is_animal(&self) -> bool {
        !matches!(self, EntityCategory::Zombie)
    }

    pub fn is_enemy(&self) -> bool {
        !matches!(self, EntityCategory::PassiveAnimal)
    }

    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            EntityCategory::Zombie => "Zombies",
            EntityCategory::HostileAnimal => "Hostile Animals",
            EntityCategory::PassiveAnimal => "Timid Animals",
        }
    }

    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.config_key() == key)
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.config_key())
    }
}
