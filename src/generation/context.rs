//! Run-scoped state and statistics
//!
//! Everything here lives for one generation run and is dropped with it.
//! Separate runs never share counters or the cosmetic history.

use std::collections::{BTreeMap, BTreeSet};

use ahash::{AHashMap, AHashSet};

use crate::core::config::RunSettings;
use crate::core::types::EntityCategory;
use crate::rules::GeneratorConfig;

/// Aggregate results of a run, backing the human-readable report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Source entities of each category's type
    pub found: BTreeMap<EntityCategory, usize>,
    /// Variants produced per category
    pub generated: BTreeMap<EntityCategory, usize>,
    /// Source names visited per category
    pub libraries: BTreeMap<EntityCategory, BTreeSet<String>>,
    /// Largest base health seen per source entity
    pub biggest: BTreeMap<String, i64>,
    /// Hostile animals given another creature's behavior
    pub behavior_swaps: u32,
    /// Passive animals turned hostile
    pub raging: u32,
    /// Free-form tally of notable events
    pub details: BTreeMap<String, u32>,
}

impl RunStats {
    pub fn add_detail(&mut self, key: impl Into<String>) {
        *self.details.entry(key.into()).or_insert(0) += 1;
    }

    /// Keep the larger of the recorded and observed health
    pub fn record_biggest(&mut self, source: &str, health: i64) {
        let entry = self.biggest.entry(source.to_string()).or_insert(health);
        if *entry < health {
            *entry = health;
        }
    }

    pub fn total_generated(&self) -> usize {
        self.generated.values().sum()
    }

    pub fn summary(&self) -> String {
        EntityCategory::ALL
            .iter()
            .map(|category| {
                format!(
                    "Generated {}: {} entities from {} base entities",
                    category.label(),
                    self.generated.get(category).copied().unwrap_or(0),
                    self.found.get(category).copied().unwrap_or(0)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Caller-owned context threaded through every pipeline stage
pub struct RunContext<'a> {
    pub config: &'a GeneratorConfig,
    pub settings: &'a RunSettings,
    name_counts: AHashMap<String, u32>,
    crawl_counts: AHashMap<String, u32>,
    seen_cosmetics: AHashSet<String>,
    pub stats: RunStats,
}

impl<'a> RunContext<'a> {
    pub fn new(config: &'a GeneratorConfig, settings: &'a RunSettings) -> Self {
        Self {
            config,
            settings,
            name_counts: AHashMap::new(),
            crawl_counts: AHashMap::new(),
            seen_cosmetics: AHashSet::new(),
            stats: RunStats::default(),
        }
    }

    /// `prefix_source_NNN`, numbered per source from 001
    pub fn next_variant_name(&mut self, source: &str) -> String {
        let count = self.name_counts.entry(source.to_string()).or_insert(0);
        *count += 1;
        format!(
            "{}_{}_{:03}",
            self.config.unique_entity_prefix, source, count
        )
    }

    /// Claim one crawler slot for `source`; false once the cap is reached
    pub fn try_claim_crawler(&mut self, source: &str) -> bool {
        let limit = self.config.crawler_limit;
        let used = self.crawl_counts.entry(source.to_string()).or_insert(0);
        if *used >= limit {
            return false;
        }
        *used += 1;
        true
    }

    pub fn crawlers_claimed(&self, source: &str) -> u32 {
        self.crawl_counts.get(source).copied().unwrap_or(0)
    }

    /// Record a cosmetic signature; false if it was already produced
    pub fn remember_cosmetic(&mut self, signature: String) -> bool {
        self.seen_cosmetics.insert(signature)
    }

    pub fn into_stats(self) -> RunStats {
        self.stats
    }
}
