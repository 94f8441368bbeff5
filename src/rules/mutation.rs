//! The closed set of property mutations, selected by `rand_function`

use crate::core::error::{Result, VariantError};
use crate::rules::tables::Settings;

/// Mutation routine named by a `rand_function` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    WalkType,
    Tint,
    SizeAndMass,
    HealthAndExperience,
    OneRange,
    TwoRange,
    AroundPercent,
}

impl MutationKind {
    pub const ALL: [MutationKind; 7] = [
        MutationKind::WalkType,
        MutationKind::Tint,
        MutationKind::SizeAndMass,
        MutationKind::HealthAndExperience,
        MutationKind::OneRange,
        MutationKind::TwoRange,
        MutationKind::AroundPercent,
    ];

    /// Configuration name of this kind
    pub fn function_name(&self) -> &'static str {
        match self {
            MutationKind::WalkType => "custom_WalkType",
            MutationKind::Tint => "custom_TintMaterial",
            MutationKind::SizeAndMass => "custom_MassAndWeightAndSizeScale",
            MutationKind::HealthAndExperience => "custom_HealthAndExperienceGain",
            MutationKind::OneRange => "setcreate_one_range",
            MutationKind::TwoRange => "setcreate_two_range",
            MutationKind::AroundPercent => "setcreate_rand_around_percent",
        }
    }

    pub fn parse(property: &str, function: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.function_name() == function)
            .ok_or_else(|| VariantError::UnknownMutation {
                property: property.to_string(),
                function: function.to_string(),
            })
    }
}

/// Order in which an entity's mutations run
///
/// Size sets up mass; health must follow the scale and any rage swap, and
/// feeds damage and experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MutationStage {
    SizeAndMass,
    HealthAndExperience,
    Other,
}

/// A mutation together with its typed payload
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Locomotion draw, rate-limited for crawlers
    WalkType,
    /// Recolor existing tint records
    Tint,
    /// Size from the overall scale, mass by the cube law
    SizeAndMass {
        mass_default: String,
        sizescale_default: String,
    },
    /// Base health, damage modifier and experience from the overall scale
    HealthAndExperience {
        pct_random: String,
        experience_default: String,
    },
    /// Set or create from `range_sample(low, high)`
    OneRange { low: String, high: String },
    /// Set or create a `"low,high"` pair, each drawn from its own range
    TwoRange {
        low1: String,
        low2: String,
        high1: String,
        high2: String,
        /// Percent rescale applied to both ranges
        scale: Option<String>,
    },
    /// Jitter every match by `pct_random`, or create from `default`
    AroundPercent { pct_random: String, default: String },
}

impl Mutation {
    /// Build from a selected payload; every key the kind needs is required
    pub fn from_settings(kind: MutationKind, settings: &Settings) -> Result<Self> {
        let owned = |key: &str| settings.require(key).map(str::to_string);

        Ok(match kind {
            MutationKind::WalkType => Mutation::WalkType,
            MutationKind::Tint => Mutation::Tint,
            MutationKind::SizeAndMass => Mutation::SizeAndMass {
                mass_default: owned("mass_default_int")?,
                sizescale_default: owned("sizescale_default_two_dec")?,
            },
            MutationKind::HealthAndExperience => Mutation::HealthAndExperience {
                pct_random: owned("pct_random_int")?,
                experience_default: owned("experience_gain_default_int")?,
            },
            MutationKind::OneRange => Mutation::OneRange {
                low: owned("low")?,
                high: owned("high")?,
            },
            MutationKind::TwoRange => Mutation::TwoRange {
                low1: owned("low1")?,
                low2: owned("low2")?,
                high1: owned("high1")?,
                high2: owned("high2")?,
                scale: settings.get("scale").map(str::to_string),
            },
            MutationKind::AroundPercent => Mutation::AroundPercent {
                pct_random: owned("pct_random_int")?,
                default: owned("default")?,
            },
        })
    }

    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::WalkType => MutationKind::WalkType,
            Mutation::Tint => MutationKind::Tint,
            Mutation::SizeAndMass { .. } => MutationKind::SizeAndMass,
            Mutation::HealthAndExperience { .. } => MutationKind::HealthAndExperience,
            Mutation::OneRange { .. } => MutationKind::OneRange,
            Mutation::TwoRange { .. } => MutationKind::TwoRange,
            Mutation::AroundPercent { .. } => MutationKind::AroundPercent,
        }
    }

    pub fn stage(&self) -> MutationStage {
        match self {
            Mutation::SizeAndMass { .. } => MutationStage::SizeAndMass,
            Mutation::HealthAndExperience { .. } => MutationStage::HealthAndExperience,
            _ => MutationStage::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let values: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::new("ConfigEntityZombie.Test", values)
    }

    #[test]
    fn test_parse_every_function_name() {
        for kind in MutationKind::ALL {
            assert_eq!(MutationKind::parse("P", kind.function_name()).unwrap(), kind);
        }
        assert!(matches!(
            MutationKind::parse("Mass", "custom_Nope"),
            Err(VariantError::UnknownMutation { property, function })
                if property == "Mass" && function == "custom_Nope"
        ));
    }

    #[test]
    fn test_two_range_scale_is_optional() {
        let payload = settings(&[("low1", "1"), ("low2", "2"), ("high1", "3"), ("high2", "4")]);
        let mutation = Mutation::from_settings(MutationKind::TwoRange, &payload).unwrap();
        assert!(matches!(mutation, Mutation::TwoRange { scale: None, .. }));
        assert_eq!(mutation.kind(), MutationKind::TwoRange);
    }

    #[test]
    fn test_missing_payload_key() {
        let payload = settings(&[("mass_default_int", "170")]);
        match Mutation::from_settings(MutationKind::SizeAndMass, &payload) {
            Err(VariantError::MissingConfig { path }) => {
                assert_eq!(path, "ConfigEntityZombie.Test.sizescale_default_two_dec");
            }
            other => panic!("expected missing config, got {:?}", other),
        }
    }

    #[test]
    fn test_stage_order() {
        let mut stages = vec![
            Mutation::Tint.stage(),
            Mutation::HealthAndExperience {
                pct_random: "0".into(),
                experience_default: "100".into(),
            }
            .stage(),
            Mutation::SizeAndMass {
                mass_default: "170".into(),
                sizescale_default: "1.00".into(),
            }
            .stage(),
        ];
        stages.sort();
        assert_eq!(
            stages,
            vec![
                MutationStage::SizeAndMass,
                MutationStage::HealthAndExperience,
                MutationStage::Other
            ]
        );
    }
}
