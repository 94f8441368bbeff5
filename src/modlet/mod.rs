//! Modlet output: the generated variants as a game modlet, plus reports
//!
//! Files are rendered in memory first and only then written, so a failed
//! run never leaves a half-written modlet behind.

pub mod report;
pub mod xml;

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::core::config::{RunSettings, ScaleMode};
use crate::core::error::Result;
use crate::generation::GenerationRun;
use crate::rules::GeneratorConfig;

pub const LOCALIZATION_HEADER: &str = "Key,File,Type,UsedInMainMenu,NoTranslate,english\n";

/// Modlet name: prefix, one tag per active mode, then the game version
pub fn modlet_name(prefix: &str, settings: &RunSettings) -> String {
    let tags = [
        (settings.cosmetics.is_some(), "_freaks"),
        (settings.scale_mode == ScaleMode::Giants, "_giants"),
        (settings.scale_mode == ScaleMode::Munchkins, "_munchkins"),
        (settings.headshot.is_some(), "_HS"),
        (settings.altered_ai_chance.is_some(), "_AI"),
        (settings.raging_chance.is_some(), "_RS"),
        (settings.research, "_research"),
    ];

    let mut name = prefix.to_string();
    for (_, tag) in tags.iter().filter(|(on, _)| *on) {
        name.push_str(tag);
    }
    if let Some(version) = &settings.game_version {
        name.push('-');
        name.push_str(version);
    }
    name
}

/// One output file, relative to the modlet directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModletFile {
    pub path: PathBuf,
    pub contents: String,
}

/// A fully rendered modlet
#[derive(Debug, Clone)]
pub struct Modlet {
    pub name: String,
    pub files: Vec<ModletFile>,
}

impl Modlet {
    /// Render every file for `run`
    pub fn build(
        config: &GeneratorConfig,
        settings: &RunSettings,
        catalog: &Catalog,
        run: &GenerationRun,
        options_used: &str,
    ) -> Self {
        let name = modlet_name(&config.modlet_name_prefix, settings);
        let prefix = xml::escape(&config.unique_entity_prefix);
        let mut files = Vec::new();
        let mut add = |path: &str, contents: String| {
            files.push(ModletFile {
                path: PathBuf::from(path),
                contents,
            })
        };

        add("ModInfo.xml", mod_info(&name));
        add("Config/Localization.txt", LOCALIZATION_HEADER.to_string());

        let mut entities = format!("<{}>\n<append xpath=\"/entity_classes\">\n", prefix);
        for variant in run.sorted_variants() {
            entities.push_str(&xml::render_entity(&variant.entity));
            entities.push('\n');
        }
        entities.push_str(&format!("</append>\n</{}>\n", prefix));
        add("Config/entityclasses.xml", entities);

        let mut groups = format!("<{}>\n", prefix);
        for (group, entries) in run.group_entries(catalog) {
            groups.push_str(&format!(
                "<append xpath=\"/entitygroups/entitygroup[@name='{}']\">\n",
                xml::escape(&group)
            ));
            for entry in &entries {
                groups.push_str(&format!("\t{}\n", xml::render_group_entry(entry)));
            }
            groups.push_str("</append>\n");
        }
        groups.push_str(&format!("</{}>\n", prefix));
        add("Config/entitygroups.xml", groups);

        if let Some(headshot) = &settings.headshot {
            add("Config/items.xml", headshot_items(headshot.power));
        }

        add("entities.info", report::entities_info(&run.stats));
        add(
            "settings.info",
            report::settings_info(settings, &run.stats, options_used),
        );

        Self { name, files }
    }

    pub fn file(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == Path::new(path))
            .map(|f| f.contents.as_str())
    }

    /// Write under `out_dir/<name>`; returns the modlet directory
    pub fn write_to(&self, out_dir: &Path) -> Result<PathBuf> {
        let root = out_dir.join(&self.name);
        for file in &self.files {
            let path = root.join(&file.path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            tracing::debug!("Generating: {}", path.display());
            std::fs::write(&path, &file.contents)?;
        }
        tracing::info!("Wrote modlet {} ({} files)", root.display(), self.files.len());
        Ok(root)
    }
}

fn mod_info(name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<xml>
  <ModInfo>
    <Name value="{}" />
    <Description value="Generated random entities from existing ones" />
    <Author value="variant-forge" />
    <Version value="1.0.0" />
    <Website value="" />
  </ModInfo>
</xml>
"#,
        xml::escape(name)
    )
}

/// Extra damage, in percent, on every headshot
fn headshot_items(power: u32) -> String {
    format!(
        r#"<configs>
  <!-- All headshots count for items that specify entity damage -->
  <append xpath="/items/item/effect_group/passive_effect[@name='EntityDamage'][1]/../.">
    <passive_effect name="DamageModifier" operation="perc_add" value="{}" tags="head"/>
  </append>
</configs>
"#,
        power
    )
}
