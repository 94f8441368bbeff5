//! Human-readable run reports written beside the modlet

use crate::core::config::{RunSettings, ScaleMode};
use crate::core::types::EntityCategory;
use crate::generation::RunStats;

const RULE: &str = "--------------------------------------------------";

/// Source names visited per category, sorted
pub fn entities_info(stats: &RunStats) -> String {
    let sections: Vec<String> = EntityCategory::ALL
        .iter()
        .map(|category| {
            let mut section = format!("===== {} =====\n", category.label());
            for name in stats.libraries.get(category).into_iter().flatten() {
                section.push_str(name);
                section.push('\n');
            }
            section
        })
        .collect();
    sections.join("\n")
}

fn percent(chance: f64) -> u32 {
    (chance * 100.0) as u32
}

/// Options, counts, the biggest-health ledger and the details tally
pub fn settings_info(settings: &RunSettings, stats: &RunStats, options_used: &str) -> String {
    let generated = |category: EntityCategory| stats.generated.get(&category).copied().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("Options Used: {}\n\n", options_used));
    out.push_str(&format!(
        "x{:3} zombie variants ({})\n",
        settings.zombie_count,
        generated(EntityCategory::Zombie)
    ));
    out.push_str(&format!(
        "x{:3} timid animal variants ({})\n",
        settings.passive_count,
        generated(EntityCategory::PassiveAnimal)
    ));
    out.push_str(&format!(
        "x{:3} hostile animal variants ({})\n",
        settings.hostile_count,
        generated(EntityCategory::HostileAnimal)
    ));

    if settings.scale_mode == ScaleMode::NoScale {
        out.push_str(" - no size variations\n");
    }
    if let Some(cosmetics) = &settings.cosmetics {
        out.push_str(" - with freak meshes\n");
        out.push_str(&format!(
            " - with {}% possible freaky mesh\n",
            percent(cosmetics.chance_for_slot(0))
        ));
    }
    if let Some(chance) = settings.altered_ai_chance {
        out.push_str(&format!(" - with {}% possible altered hostile AI\n", percent(chance)));
        if stats.behavior_swaps > 0 {
            out.push_str(&format!(
                "   ... {} hostile animal behaviors changed\n",
                stats.behavior_swaps
            ));
        }
    }
    if let Some(chance) = settings.raging_chance {
        out.push_str(&format!(" - with {}% possible stag has hostile AI\n", percent(chance)));
        if stats.raging > 0 {
            out.push_str(&format!("   ... {} raging stags\n", stats.raging));
        }
    }
    match settings.scale_mode {
        ScaleMode::Giants => out.push_str(" - with Land of the Giants mode\n"),
        ScaleMode::Munchkins => out.push_str(" - with Munchkins mode\n"),
        _ => {}
    }
    if let Some(headshot) = &settings.headshot {
        out.push_str(" - with Headshot mode\n");
        out.push_str(&format!("    - headshot power {}%\n", headshot.power));
        out.push_str(&format!("    - zombie meat {:?}x\n", headshot.meat));
        out.push_str(&format!("    - zombie speed {}%\n", headshot.speed));
    }
    if settings.research {
        out.push_str(" - with research mode\n");
    }

    out.push_str(&format!("\n{}\nBIGGEST:\n", RULE));
    for (name, health) in &stats.biggest {
        out.push_str(&format!("   {:30} - {:5} hp\n", name, health));
    }

    out.push_str(&format!("\n{}\nOTHER DETAILS:\n", RULE));
    let width = stats.details.keys().map(String::len).max().unwrap_or(0);
    for (key, count) in &stats.details {
        out.push_str(&format!("   {:width$} - {}\n", key, count, width = width));
    }

    out
}
