//! Variant Forge - randomized entity variants for game modlets

pub mod catalog;
pub mod core;
pub mod data;
pub mod generation;
pub mod modlet;
pub mod numeric;
pub mod rules;
pub mod taxonomy;
