//! Variant Forge - command line entry point
//!
//! Loads the generator configuration and the game's entity catalog, generates
//! the requested variants and writes them out as a modlet.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use variant_forge::catalog::Catalog;
use variant_forge::core::config::{CosmeticSettings, HeadshotSettings, RunSettings, ScaleMode};
use variant_forge::core::error::Result;
use variant_forge::generation::generate;
use variant_forge::modlet::Modlet;
use variant_forge::rules::load_generator_config;
use variant_forge::taxonomy::Taxonomy;

/// Generate randomized entity variants as a game modlet
#[derive(Parser, Debug)]
#[command(name = "variant-forge")]
#[command(about = "Generate randomized zombie and animal variants as a game modlet")]
struct Args {
    /// Generator configuration file
    #[arg(long, default_value = "./config.json")]
    config: PathBuf,

    /// Entity catalog (entity classes and groups, JSON)
    #[arg(long)]
    catalog: PathBuf,

    /// Directory the modlet directory is created in
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Verbose per-entity logging
    #[arg(long)]
    debug: bool,

    /// Generate but do not write anything
    #[arg(long)]
    dryrun: bool,

    /// Game version tag appended to the modlet name
    #[arg(long = "version-tag")]
    version_tag: Option<String>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Variants per zombie
    #[arg(short = 'z', default_value_t = 10)]
    zombies: u32,

    /// Variants per timid animal
    #[arg(short = 'f', default_value_t = 10)]
    friendlies: u32,

    /// Variants per hostile animal
    #[arg(short = 'e', default_value_t = 30)]
    enemies: u32,

    /// Freak meshes: random material replacement
    #[arg(short = 'm')]
    meshes: bool,

    /// Chance per material slot for freak meshes, percent
    #[arg(long = "mp", default_value_t = 33)]
    mesh_percent: u32,

    /// Land of the giants
    #[arg(short = 'g')]
    giants: bool,

    /// Land of the munchkins
    #[arg(short = 'k')]
    munchkins: bool,

    /// Headshot mode
    #[arg(long = "hs")]
    headshot: bool,

    /// Extra headshot damage, percent
    #[arg(long = "hs-power", default_value_t = 150)]
    hs_power: u32,

    /// Zombie health multiplier in headshot mode
    #[arg(long = "hs-meat", default_value_t = 3.0)]
    hs_meat: f64,

    /// Zombie speed in headshot mode, percent
    #[arg(long = "hs-speed", default_value_t = 25)]
    hs_speed: u32,

    /// No size variations
    #[arg(long = "ns")]
    no_scale: bool,

    /// Altered hostile animal AI
    #[arg(short = 'a')]
    altered_ai: bool,

    /// Chance of altered AI, percent
    #[arg(long = "ap", default_value_t = 33)]
    altered_ai_percent: u32,

    /// Raging stags: timid animals that may turn hostile
    #[arg(short = 'r')]
    raging: bool,

    /// Chance of raging, percent
    #[arg(long = "rp", default_value_t = 33)]
    raging_percent: u32,

    /// Research mode: huge, frozen, fully re-skinned variants
    #[arg(long)]
    research: bool,
}

impl Args {
    fn run_settings(&self) -> Result<RunSettings> {
        let chance = |on: bool, percent: u32| on.then(|| f64::from(percent) / 100.0);

        Ok(RunSettings {
            zombie_count: self.zombies,
            passive_count: self.friendlies,
            hostile_count: self.enemies,
            scale_mode: ScaleMode::from_flags(self.no_scale, self.giants, self.munchkins)?,
            headshot: self.headshot.then(|| HeadshotSettings {
                power: self.hs_power,
                meat: self.hs_meat,
                speed: self.hs_speed,
            }),
            altered_ai_chance: chance(self.altered_ai, self.altered_ai_percent),
            raging_chance: chance(self.raging, self.raging_percent),
            cosmetics: chance(self.meshes, self.mesh_percent).map(CosmeticSettings::uniform),
            research: self.research,
            game_version: self.version_tag.clone(),
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug {
        "variant_forge=debug"
    } else {
        "variant_forge=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let settings = args.run_settings()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Seed: {}", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let config = load_generator_config(&args.config)?;
    let catalog = Catalog::load_from_file(&args.catalog)?;

    let taxonomy = Taxonomy::resolve(&catalog)?;
    let run = generate(&catalog, &taxonomy, &config, &settings, &mut rng).map_err(|e| {
        if e.is_config_integrity() {
            tracing::error!("Configuration problem, nothing written: {}", e);
        }
        e
    })?;

    if args.dryrun {
        tracing::info!(
            "Dry run: {} variants generated, nothing written",
            run.stats.total_generated()
        );
        return Ok(());
    }

    let options_used = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let modlet = Modlet::build(&config, &settings, &catalog, &run, &options_used);
    modlet.write_to(&args.out)?;

    Ok(())
}
