//! Run parameters with documented defaults
//!
//! Everything a single generation run is parameterised by, apart from the
//! generator configuration file itself (see `rules::loader`).

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, VariantError};
use crate::core::types::EntityCategory;

/// Size policy for the overall-scale draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Modest variance around 100%, wider for animals
    #[default]
    Normal,
    /// Every variant stays at 100%
    NoScale,
    /// Land of the giants: everything large, size capped at 2.0
    Giants,
    /// Land of the munchkins: zombies small and relatively fast
    Munchkins,
}

impl ScaleMode {
    /// Combine the three mutually exclusive CLI flags
    pub fn from_flags(no_scale: bool, giants: bool, munchkins: bool) -> Result<Self> {
        if giants && munchkins {
            return Err(VariantError::InvalidSettings(
                "giants and munchkins cannot be combined".into(),
            ));
        }
        if no_scale && (giants || munchkins) {
            return Err(VariantError::InvalidSettings(
                "no-scale cannot be combined with giants or munchkins".into(),
            ));
        }

        Ok(match (no_scale, giants, munchkins) {
            (true, _, _) => ScaleMode::NoScale,
            (_, true, _) => ScaleMode::Giants,
            (_, _, true) => ScaleMode::Munchkins,
            _ => ScaleMode::Normal,
        })
    }
}

/// Headshot mode: tougher, slower zombies that die to headshots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadshotSettings {
    /// Extra headshot damage, percent
    pub power: u32,
    /// Health multiplier for non-animals
    pub meat: f64,
    /// Move speed for non-animals, percent of normal
    pub speed: u32,
}

impl Default for HeadshotSettings {
    fn default() -> Self {
        Self {
            power: 150,
            meat: 3.0,
            speed: 25,
        }
    }
}

/// Per-slot trigger chances for cosmetic material replacement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmeticSettings {
    /// Chance (0.0-1.0) for slot 0, 1, 2, ...; slots past the end reuse the last entry
    pub slot_chances: Vec<f64>,
}

impl CosmeticSettings {
    /// Same chance for every slot
    pub fn uniform(chance: f64) -> Self {
        Self {
            slot_chances: vec![chance],
        }
    }

    pub fn chance_for_slot(&self, slot: usize) -> f64 {
        self.slot_chances
            .get(slot)
            .or_else(|| self.slot_chances.last())
            .copied()
            .unwrap_or(0.0)
    }
}

/// Discrete overall-scale distributions, in percent (100 = unscaled)
///
/// Each `*_extra` pool is appended to its base pool for the matching
/// kind of entity; duplicates weight the draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalePools {
    // === NORMAL ===
    pub normal: Vec<u32>,
    /// Appended for animals (hostile and passive)
    pub normal_animal_extra: Vec<u32>,
    /// Appended again for passive animals, allowing larger timid creatures
    pub normal_passive_extra: Vec<u32>,

    // === GIANTS ===
    pub giants: Vec<u32>,
    /// Animals are generally smaller, so they get a wider spread
    pub giants_animal_extra: Vec<u32>,

    // === MUNCHKINS ===
    pub munchkins_zombie: Vec<u32>,
    pub munchkins_animal: Vec<u32>,
}

impl Default for ScalePools {
    fn default() -> Self {
        Self {
            normal: vec![80, 90, 100, 110, 120],
            normal_animal_extra: vec![50, 60, 70, 130, 140, 150],
            normal_passive_extra: vec![175, 200, 225, 250],
            giants: vec![150, 175, 200, 225, 250],
            giants_animal_extra: vec![275, 300],
            munchkins_zombie: vec![40, 50, 60, 70],
            munchkins_animal: vec![50, 60, 70, 80, 90, 100, 110, 120],
        }
    }
}

impl ScalePools {
    /// Every policy draws from exactly `values`
    pub fn fixed(values: Vec<u32>) -> Self {
        Self {
            normal: values.clone(),
            normal_animal_extra: Vec::new(),
            normal_passive_extra: Vec::new(),
            giants: values.clone(),
            giants_animal_extra: Vec::new(),
            munchkins_zombie: values.clone(),
            munchkins_animal: values,
        }
    }

    /// Candidate pool for one entity under `mode`
    pub fn pool(&self, mode: ScaleMode, is_animal: bool, is_enemy: bool) -> Vec<u32> {
        match mode {
            ScaleMode::NoScale => vec![100],
            ScaleMode::Giants => {
                let mut sizes = self.giants.clone();
                if is_animal {
                    sizes.extend_from_slice(&self.giants_animal_extra);
                }
                sizes
            }
            ScaleMode::Munchkins => {
                if is_animal {
                    self.munchkins_animal.clone()
                } else {
                    self.munchkins_zombie.clone()
                }
            }
            ScaleMode::Normal => {
                let mut sizes = self.normal.clone();
                if is_animal {
                    sizes.extend_from_slice(&self.normal_animal_extra);
                    if !is_enemy {
                        sizes.extend_from_slice(&self.normal_passive_extra);
                    }
                }
                sizes
            }
        }
    }
}

/// Parameters for one generation run
#[derive(Debug, Clone)]
pub struct RunSettings {
    // === REPEAT COUNTS ===
    /// Variants generated per zombie source entity
    pub zombie_count: u32,
    /// Variants generated per passive animal source entity
    pub passive_count: u32,
    /// Variants generated per hostile animal source entity
    pub hostile_count: u32,

    // === MODES ===
    pub scale_mode: ScaleMode,
    pub headshot: Option<HeadshotSettings>,
    /// Chance (0.0-1.0) that a hostile animal gets another creature's behavior
    pub altered_ai_chance: Option<f64>,
    /// Chance (0.0-1.0) that a passive animal turns hostile
    pub raging_chance: Option<f64>,
    pub cosmetics: Option<CosmeticSettings>,
    /// Debug mode: huge, nearly frozen, fully re-skinned variants for inspection
    pub research: bool,

    // === OUTPUT ===
    /// Game version tag appended to the modlet name
    pub game_version: Option<String>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            zombie_count: 10,
            passive_count: 10,
            hostile_count: 30,
            scale_mode: ScaleMode::Normal,
            headshot: None,
            altered_ai_chance: None,
            raging_chance: None,
            cosmetics: None,
            research: false,
            game_version: None,
        }
    }
}

impl RunSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repeat_count(&self, category: EntityCategory) -> u32 {
        match category {
            EntityCategory::Zombie => self.zombie_count,
            EntityCategory::HostileAnimal => self.hostile_count,
            EntityCategory::PassiveAnimal => self.passive_count,
        }
    }

    /// Validate chances are probabilities
    pub fn validate(&self) -> Result<()> {
        let chances = [
            ("altered AI", self.altered_ai_chance),
            ("raging", self.raging_chance),
        ];
        for (label, chance) in chances {
            if let Some(p) = chance {
                if !(0.0..=1.0).contains(&p) {
                    return Err(VariantError::InvalidSettings(format!(
                        "{} chance {} outside 0-100%",
                        label,
                        p * 100.0
                    )));
                }
            }
        }

        if let Some(cosmetics) = &self.cosmetics {
            if cosmetics.slot_chances.iter().any(|p| !(0.0..=1.0).contains(p)) {
                return Err(VariantError::InvalidSettings(
                    "cosmetic slot chance outside 0-100%".into(),
                ));
            }
        }

        if let Some(headshot) = &self.headshot {
            if headshot.meat <= 0.0 {
                return Err(VariantError::InvalidSettings(
                    "headshot meat multiplier must be positive".into(),
                ));
            }
        }

        Ok(())
    }
}
