//! Entity groups and variant projection
//!
//! Groups list the entities a spawner may pick from. A variant joins every
//! group its source appears in, with the same spawn weighting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityGroup {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<GroupEntry>,
}

/// Copy each group entry naming a source, renamed to its variant
///
/// `variants` yields `(source name, variant name)` pairs. The result is keyed
/// by group name; entries keep the order the variants were given in.
pub fn project_variants<'a, I>(groups: &[EntityGroup], variants: I) -> BTreeMap<String, Vec<GroupEntry>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut projected: BTreeMap<String, Vec<GroupEntry>> = BTreeMap::new();

    for (source, variant) in variants {
        for group in groups {
            for entry in group.entries.iter().filter(|e| e.name == source) {
                let mut copy = entry.clone();
                copy.name = variant.to_string();
                projected.entry(group.name.clone()).or_default().push(copy);
            }
        }
    }

    projected
}
