//! Variant generation: clone, then run each copy through the per-entity
//! pipeline
//!
//! Per entity: draw the overall scale, swap behavior, apply the configured
//! property mutations (size before health, health before the rest), scale
//! harvest yield, then pick cosmetics.

pub mod behavior;
pub mod clone;
pub mod context;
pub mod cosmetic;
pub mod properties;
pub mod scale;

pub use clone::{clone_variant, EntityFilter};
pub use context::{RunContext, RunStats};

use std::collections::BTreeMap;

use rand::Rng;

use crate::catalog::{project_variants, Catalog, EntityClass, GroupEntry};
use crate::core::config::{RunSettings, ScaleMode};
use crate::core::error::Result;
use crate::core::types::EntityCategory;
use crate::rules::{GeneratorConfig, Mutation};
use crate::taxonomy::Taxonomy;

pub const MOVE_SPEED: &str = "MoveSpeed";
pub const MOVE_SPEED_AGGRO: &str = "MoveSpeedAggro";

/// A generated entity tagged with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedVariant {
    pub category: EntityCategory,
    pub source: String,
    pub entity: EntityClass,
}

/// Everything one run produced
#[derive(Debug, Clone, Default)]
pub struct GenerationRun {
    pub variants: Vec<GeneratedVariant>,
    pub stats: RunStats,
}

impl GenerationRun {
    /// Variants ordered by generated name
    pub fn sorted_variants(&self) -> Vec<&GeneratedVariant> {
        let mut sorted: Vec<_> = self.variants.iter().collect();
        sorted.sort_by(|a, b| a.entity.name.cmp(&b.entity.name));
        sorted
    }

    /// Entity-group entries for every variant, keyed by group name, each
    /// group's entries in variant-name order
    pub fn group_entries(&self, catalog: &Catalog) -> BTreeMap<String, Vec<GroupEntry>> {
        project_variants(
            catalog.entity_groups(),
            self.sorted_variants()
                .into_iter()
                .map(|v| (v.source.as_str(), v.entity.name.as_str())),
        )
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Generate every category's variants
///
/// Any configuration-integrity error aborts the whole run; nothing partial
/// is returned.
pub fn generate<R: Rng + ?Sized>(
    catalog: &Catalog,
    taxonomy: &Taxonomy,
    config: &GeneratorConfig,
    settings: &RunSettings,
    rng: &mut R,
) -> Result<GenerationRun> {
    settings.validate()?;

    let filter = EntityFilter::from_config(config);
    let mut ctx = RunContext::new(config, settings);
    let mut variants = Vec::new();

    for category in EntityCategory::ALL {
        tracing::info!("## Generating {}", category.label());

        let table = config.category(category)?;
        let sources = taxonomy.entities_of_type(category.type_tag());
        ctx.stats.found.insert(category, sources.len());
        ctx.stats.generated.insert(category, 0);

        for _ in 0..settings.repeat_count(category) {
            if table.disabled {
                tracing::info!("!! Ignoring {}: entire category disabled", category);
                break;
            }

            for source in sources {
                if table.ignores(source) {
                    continue;
                }

                ctx.stats
                    .libraries
                    .entry(category)
                    .or_default()
                    .insert(source.clone());

                let Some(mut entity) = clone_variant(&mut ctx, catalog, &filter, source) else {
                    continue;
                };
                *ctx.stats.generated.entry(category).or_insert(0) += 1;

                randomize_entity(&mut ctx, category, &mut entity, rng)?;
                variants.push(GeneratedVariant {
                    category,
                    source: source.clone(),
                    entity,
                });
            }
        }
    }

    let stats = ctx.into_stats();
    tracing::info!("{}", stats.summary());
    Ok(GenerationRun { variants, stats })
}

/// Run one freshly cloned variant through the pipeline
pub fn randomize_entity<R: Rng + ?Sized>(
    ctx: &mut RunContext<'_>,
    category: EntityCategory,
    entity: &mut EntityClass,
    rng: &mut R,
) -> Result<()> {
    let config = ctx.config;
    let settings = ctx.settings;

    let overall_scale = scale::draw_scale(settings, &config.scale_pools, category, rng)?;
    entity.variant_mut().overall_scale = Some(overall_scale);
    tracing::debug!("   Overall scale {}%", overall_scale);

    // before health, which reads the raging flag
    match (category.is_animal(), category.is_enemy()) {
        (true, true) => {
            if let Some(chance) = settings.altered_ai_chance {
                behavior::alter_behavior(&mut ctx.stats, entity, chance, rng);
            }
        }
        (true, false) => {
            if let Some(chance) = settings.raging_chance {
                behavior::rage(&mut ctx.stats, entity, chance, rng);
            }
        }
        _ => {}
    }

    let source = entity.original_name().to_string();
    let mut mutations = Vec::new();
    for property in config.category(category)?.properties.keys() {
        if let Some(mutation) = config.resolve_mutation(category, property, Some(source.as_str()))? {
            mutations.push((property.as_str(), mutation));
        }
    }
    mutations.sort_by_key(|(_, mutation)| mutation.stage());

    let speed = scale::speed_percent(settings, category.is_animal(), overall_scale);
    for (property, mutation) in &mutations {
        apply_mutation(ctx, category, entity, property, mutation, speed, rng)?;
    }

    scale::scale_harvest(entity, rng)?;
    cosmetic::apply_cosmetics(ctx, entity, category, rng);
    Ok(())
}

/// Dispatch one resolved mutation, then the speed policy for `MoveSpeed`
fn apply_mutation<R: Rng + ?Sized>(
    ctx: &mut RunContext<'_>,
    category: EntityCategory,
    entity: &mut EntityClass,
    property: &str,
    mutation: &Mutation,
    speed: u32,
    rng: &mut R,
) -> Result<()> {
    let settings = ctx.settings;

    match mutation {
        Mutation::WalkType => {
            behavior::randomize_walk_type(ctx, entity, rng);
        }
        Mutation::Tint => {
            cosmetic::randomize_tint(entity, rng);
        }
        Mutation::SizeAndMass {
            mass_default,
            sizescale_default,
        } => {
            scale::vary_size_and_mass(
                entity,
                settings.scale_mode == ScaleMode::Giants,
                mass_default,
                sizescale_default,
                rng,
            )?;
        }
        Mutation::HealthAndExperience {
            pct_random,
            experience_default,
        } => {
            scale::vary_health_and_experience(
                entity,
                &mut ctx.stats,
                pct_random,
                experience_default,
                scale::StatMultipliers::for_run(settings, category),
                rng,
            )?;
        }
        Mutation::OneRange { low, high } => {
            properties::set_from_range(entity, property, low, high, rng)?;
        }
        Mutation::TwoRange {
            low1,
            low2,
            high1,
            high2,
            scale: configured,
        } => {
            // non-animals ignore the configured scale; only aggro speed follows the run mode
            let rescale = if category.is_animal() {
                configured.clone()
            } else if property == MOVE_SPEED_AGGRO || settings.research {
                Some(speed.to_string())
            } else {
                Some("100".to_string())
            };
            properties::set_from_two_ranges(
                entity,
                property,
                low1,
                low2,
                high1,
                high2,
                rescale.as_deref(),
                rng,
            )?;
        }
        Mutation::AroundPercent {
            pct_random,
            default,
        } => {
            properties::vary_around_base(entity, property, pct_random, default, rng)?;
        }
    }

    if property == MOVE_SPEED && speed != 100 {
        properties::scale_property(entity, MOVE_SPEED, &speed.to_string(), "1.0", None)?;
    }

    Ok(())
}
