//! Static tables: behavior templates and cosmetic material pools

pub mod behavior_templates;
pub mod materials;

pub use behavior_templates::{BehaviorTemplate, TemplateRecord};
pub use materials::{MaterialFamily, SlotFamilies};
