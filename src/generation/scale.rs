//! Scale cascade: one overall scale per variant, propagated into size,
//! mass, health, damage, experience, harvest yield and speed

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{EntityClass, EntityNode, PassiveEffect, BASE_EFFECTS_GROUP, HARVEST_EVENT};
use crate::core::config::{RunSettings, ScaleMode, ScalePools};
use crate::core::error::{Result, VariantError};
use crate::core::types::EntityCategory;
use crate::generation::context::RunStats;
use crate::generation::properties::scale_property;
use crate::numeric::{decimal_places, jitter_percent, parse_number};

pub const SIZE_PROPERTY: &str = "SizeScale";
pub const MASS_PROPERTY: &str = "Mass";
pub const EXPERIENCE_PROPERTY: &str = "ExperienceGain";
pub const HEALTH_EFFECT: &str = "HealthMax";
pub const DAMAGE_EFFECT: &str = "EntityDamage";

/// Research mode: everything five times normal size
pub const RESEARCH_SCALE: u32 = 500;
/// Giant sizes above this cannot be hit
pub const GIANT_SIZE_CAP: f64 = 2.0;
/// Mass never drops below this percent of the template
const MIN_MASS_PERCENT: i64 = 2;
/// Health growth exponent at or above baseline
const HEALTH_GROWTH_EXP: f64 = 1.66;
/// Health shrink exponent below baseline
const HEALTH_SHRINK_EXP: f64 = 0.6;
const RAGING_HEALTH_MULT: f64 = 3.0;
const RAGING_EXPERIENCE_MULT: f64 = 1.25;
const HARVEST_EXP: f64 = 0.85;
/// Meat multiplier in research mode: nearly anything kills them
const RESEARCH_MEAT: f64 = 0.01;

/// Draw the overall scale (percent) for one variant
pub fn draw_scale<R: Rng + ?Sized>(
    settings: &RunSettings,
    pools: &ScalePools,
    category: EntityCategory,
    rng: &mut R,
) -> Result<u32> {
    if settings.research {
        return Ok(RESEARCH_SCALE);
    }

    let pool = pools.pool(settings.scale_mode, category.is_animal(), category.is_enemy());
    pool.choose(rng).copied().ok_or_else(|| {
        VariantError::InvalidSettings(format!(
            "empty {:?} scale pool for {}",
            settings.scale_mode, category
        ))
    })
}

/// Size follows the overall scale; mass follows its cube with +/-10%
pub fn vary_size_and_mass<R: Rng + ?Sized>(
    entity: &mut EntityClass,
    giants: bool,
    mass_default: &str,
    sizescale_default: &str,
    rng: &mut R,
) -> Result<()> {
    let scale = entity.overall_scale().to_string();
    let cap = giants.then_some(GIANT_SIZE_CAP);
    scale_property(entity, SIZE_PROPERTY, &scale, sizescale_default, cap)?;

    let mass_pct = mass_percent(entity.overall_scale(), rng.gen::<f64>());
    scale_property(entity, MASS_PROPERTY, &mass_pct.to_string(), mass_default, None)?;
    Ok(())
}

/// Cube-law mass percent; `jitter` in `[0, 1)` maps onto `[0.9, 1.1)`
pub fn mass_percent(scale: u32, jitter: f64) -> i64 {
    let ratio = scale as f64 / 100.0;
    let cubed = ratio.powi(3) * (0.9 + jitter * 0.2);
    ((cubed * 100.0) as i64).max(MIN_MASS_PERCENT)
}

/// Health multiplier for a meat-adjusted scale ratio
///
/// Convex above baseline, concave below.
pub fn health_scaling(ratio: f64, raging: bool) -> f64 {
    let scaling = if ratio >= 1.0 {
        ratio.powf(HEALTH_GROWTH_EXP)
    } else {
        ratio.powf(HEALTH_SHRINK_EXP)
    };

    if raging {
        scaling * RAGING_HEALTH_MULT
    } else {
        scaling
    }
}

/// Health and experience multipliers requested by the run mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatMultipliers {
    pub meat: f64,
    pub experience: f64,
}

impl StatMultipliers {
    pub const NEUTRAL: StatMultipliers = StatMultipliers {
        meat: 1.0,
        experience: 1.0,
    };

    /// Headshot makes zombies meatier but pays out only the square root in
    /// experience; research makes everything fragile
    pub fn for_run(settings: &RunSettings, category: EntityCategory) -> Self {
        let headshot_meat = settings.headshot.unwrap_or_default().meat;
        if settings.research {
            return Self {
                meat: RESEARCH_MEAT,
                experience: headshot_meat.sqrt(),
            };
        }
        match settings.headshot {
            Some(headshot) if !category.is_animal() => Self {
                meat: headshot.meat,
                experience: headshot.meat.sqrt(),
            },
            _ => Self::NEUTRAL,
        }
    }
}

/// First `HealthMax base_set` effect in any base effects group
fn base_health_mut(entity: &mut EntityClass) -> Option<&mut PassiveEffect> {
    entity
        .nodes
        .iter_mut()
        .filter_map(|node| match node {
            EntityNode::EffectGroup(group) if group.name == BASE_EFFECTS_GROUP => Some(group),
            _ => None,
        })
        .flat_map(|group| group.effects.iter_mut())
        .find(|effect| effect.name == HEALTH_EFFECT && effect.operation == "base_set")
}

/// Scale base health, then damage and experience from the same factor
///
/// Returns the health scaling that was applied.
pub fn vary_health_and_experience<R: Rng + ?Sized>(
    entity: &mut EntityClass,
    stats: &mut RunStats,
    pct_random: &str,
    experience_default: &str,
    multipliers: StatMultipliers,
    rng: &mut R,
) -> Result<f64> {
    let ratio = entity.overall_scale() as f64 / 100.0 * multipliers.meat;
    let raging = entity.is_raging();
    let source = entity.original_name().to_string();

    let mut use_scaling = ratio;
    if let Some(health) = base_health_mut(entity) {
        use_scaling = health_scaling(ratio, raging);

        let original = health.value.clone();
        let new_val = jitter_percent(
            rng,
            &original,
            pct_random,
            decimal_places(&original),
            use_scaling,
        )?;
        if new_val != original {
            tracing::debug!("   Changed {} from {} to {}", HEALTH_EFFECT, original, new_val);
            health.value = new_val.clone();
        }

        let biggest = parse_number(&original)?.max(parse_number(&new_val)?);
        stats.record_biggest(&source, biggest.trunc() as i64);
    }

    add_damage_modifier(entity);

    let mut experience_ratio = use_scaling * (multipliers.experience / multipliers.meat);
    if raging {
        experience_ratio *= RAGING_EXPERIENCE_MULT;
    }
    let experience_pct = ((experience_ratio * 100.0) as i64).max(1);
    scale_property(
        entity,
        EXPERIENCE_PROPERTY,
        &experience_pct.to_string(),
        experience_default,
        None,
    )?;

    Ok(use_scaling)
}

/// Append an `EntityDamage` modifier matching the scale's distance from 100%
///
/// Returns false at exactly 100%.
pub fn add_damage_modifier(entity: &mut EntityClass) -> bool {
    let ratio = entity.overall_scale() as f64 / 100.0;
    let (operation, magnitude) = if ratio > 1.0 {
        ("perc_add", ratio - 1.0)
    } else if ratio < 1.0 {
        ("perc_subtract", 1.0 - ratio)
    } else {
        return false;
    };

    let value = format!("{:.2}", magnitude);
    tracing::debug!(" + Added {} '{}' as {}", DAMAGE_EFFECT, operation, value);
    entity
        .effect_group_or_insert(BASE_EFFECTS_GROUP)
        .effects
        .push(PassiveEffect {
            name: DAMAGE_EFFECT.to_string(),
            operation: operation.to_string(),
            value,
            tags: None,
        });
    true
}

/// Bigger creatures yield more; each harvest drop gets its own +/-10%
pub fn scale_harvest<R: Rng + ?Sized>(entity: &mut EntityClass, rng: &mut R) -> Result<()> {
    let scaling = (entity.overall_scale() as f64 / 100.0).powf(HARVEST_EXP);

    for drop in entity.drops_mut(HARVEST_EVENT) {
        let count = parse_number(&drop.count)?;
        let jitter = rng.gen::<f64>() * 0.2 + 0.9;
        let scaled = (count * jitter * scaling).max(0.0);
        drop.count = ((scaled + 0.5) as i64).to_string();
    }

    Ok(())
}

/// Speed percent imposed by the run mode; 100 leaves speed alone
///
/// Animals keep their speed except in research mode.
pub fn speed_percent(settings: &RunSettings, is_animal: bool, scale: u32) -> u32 {
    if settings.research {
        return 1;
    }
    if is_animal {
        return 100;
    }

    match (settings.scale_mode, settings.headshot) {
        (ScaleMode::Munchkins, _) => (10000.0 / scale.max(1) as f64 + 0.5) as u32,
        (_, Some(headshot)) => headshot.speed,
        _ => 100,
    }
}
