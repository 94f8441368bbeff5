//! Behavior swaps and the locomotion draw
//!
//! Swaps strip every behavior task/target record and splice in a canned
//! template ahead of the entity's last child.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{EntityClass, EntityNode, Property};
use crate::data::behavior_templates::{
    all_templates, is_behavior_record, is_exception, predator_templates, RAGE_BITES,
};
use crate::data::BehaviorTemplate;
use crate::generation::context::{RunContext, RunStats};

pub const WALK_TYPE_PROPERTY: &str = "WalkType";
pub const HAND_ITEM_PROPERTY: &str = "HandItem";

/// Non-ambulatory walk type, rate limited per source
pub const CRAWLER_WALK_TYPE: u32 = 4;
/// Existing walk type that is never replaced
pub const PRESERVED_WALK_TYPE: &str = "8";

/// Weighted locomotion draw; 8 and 9 are never drawn
const WALK_TYPES: [u32; 19] = [1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 5, 5, 5, 6, 6, 6, 7, 7, 7];
const NON_CRAWLER_WALK_TYPES: [u32; 6] = [1, 2, 3, 5, 6, 7];

/// Forced onto raging animals so they actually hunt
pub const RAGE_PROPERTIES: [(&str, &str); 5] = [
    ("IsEnemyEntity", "true"),
    ("AIGroupCircle", "1"),
    ("AINoiseSeekDist", "6"),
    ("AIPathCostScale", ".2, .4"),
    ("Class", "EntityEnemyAnimal"),
];

/// Draw a walk type, holding crawlers to the configured cap per source
pub fn draw_walk_type<R: Rng + ?Sized>(ctx: &mut RunContext<'_>, source: &str, rng: &mut R) -> u32 {
    let walk_type = WALK_TYPES[rng.gen_range(0..WALK_TYPES.len())];
    if walk_type != CRAWLER_WALK_TYPE || ctx.try_claim_crawler(source) {
        return walk_type;
    }

    let retry = NON_CRAWLER_WALK_TYPES[rng.gen_range(0..NON_CRAWLER_WALK_TYPES.len())];
    tracing::warn!(
        "Crawler limit of {} reached for {}; retry was {}",
        ctx.crawlers_claimed(source),
        source,
        retry
    );
    retry
}

/// Apply a fresh walk type draw
///
/// The first record that differs from the draw is replaced; a preserved
/// walk type stops the mutation. With no record at all, one is appended.
pub fn randomize_walk_type<R: Rng + ?Sized>(
    ctx: &mut RunContext<'_>,
    entity: &mut EntityClass,
    rng: &mut R,
) -> bool {
    let source = entity.original_name().to_string();
    let walk_type = draw_walk_type(ctx, &source, rng).to_string();

    let mut seen = false;
    for prop in entity
        .properties_mut()
        .filter(|p| p.name == WALK_TYPE_PROPERTY)
    {
        seen = true;
        if prop.value == PRESERVED_WALK_TYPE {
            return false;
        }
        if prop.value != walk_type {
            tracing::debug!("   Changed {} from {} to {}", WALK_TYPE_PROPERTY, prop.value, walk_type);
            prop.value = walk_type;
            return true;
        }
    }

    if seen {
        return false;
    }

    tracing::debug!(" + Defined {} as {}", WALK_TYPE_PROPERTY, walk_type);
    entity
        .nodes
        .push(EntityNode::Property(Property::new(WALK_TYPE_PROPERTY, walk_type)));
    true
}

/// Remove every behavior task/target record, at any depth
fn strip_behavior(entity: &mut EntityClass) -> usize {
    let removed = entity.remove_properties(|p| is_behavior_record(&p.name));
    for prop in &removed {
        tracing::debug!(" - Removed {} = {}", prop.name, prop.value);
    }
    removed.len()
}

/// Uniform pick among `templates`, never the entity's own
fn pick_template<'t, R: Rng + ?Sized>(
    templates: impl Iterator<Item = &'t BehaviorTemplate>,
    own: &str,
    rng: &mut R,
) -> Option<&'t BehaviorTemplate> {
    let candidates: Vec<&BehaviorTemplate> = templates.filter(|t| t.owner != own).collect();
    candidates.choose(rng).copied()
}

fn install(entity: &mut EntityClass, template: &BehaviorTemplate, extra: Vec<EntityNode>) {
    let mut nodes = template.to_nodes();
    nodes.extend(extra);
    entity.insert_before_last(nodes);
    entity.variant_mut().applied_behavior_template = Some(template.owner.to_string());
}

/// Give a hostile animal another creature's behavior with probability `chance`
pub fn alter_behavior<R: Rng + ?Sized>(
    stats: &mut RunStats,
    entity: &mut EntityClass,
    chance: f64,
    rng: &mut R,
) -> bool {
    let original = entity.original_name().to_string();
    if is_exception(&original) || rng.gen::<f64>() >= chance {
        return false;
    }

    let Some(template) = pick_template(all_templates(), &original, rng) else {
        return false;
    };

    strip_behavior(entity);
    install(entity, template, Vec::new());

    tracing::debug!("%% {} now behaves like {}", entity.name, template.owner);
    stats.add_detail(format!("{} ({} AI)", original, template.owner));
    stats.behavior_swaps += 1;
    true
}

/// Turn a passive animal hostile with probability `chance`
///
/// Draws from predator templates only, hands it a bite and forces the
/// hostile classification. Health and experience bonuses key off the
/// raging flag set here.
pub fn rage<R: Rng + ?Sized>(
    stats: &mut RunStats,
    entity: &mut EntityClass,
    chance: f64,
    rng: &mut R,
) -> bool {
    let original = entity.original_name().to_string();
    if is_exception(&original) || rng.gen::<f64>() >= chance {
        return false;
    }

    let Some(template) = pick_template(predator_templates(), &original, rng) else {
        return false;
    };
    let bite = RAGE_BITES[rng.gen_range(0..RAGE_BITES.len())];

    strip_behavior(entity);
    install(
        entity,
        template,
        vec![EntityNode::Property(Property::new(HAND_ITEM_PROPERTY, bite))],
    );
    entity.variant_mut().is_raging = true;
    for (name, value) in RAGE_PROPERTIES {
        entity.set_property(name, value);
    }

    tracing::debug!("%% {} is raging with {} ({})", entity.name, bite, template.owner);
    stats.add_detail(format!("{} ({} AI)", original, template.owner));
    stats.add_detail(format!("Raging {} Bite {}", original, bite));
    stats.raging += 1;
    true
}
