pub mod config;
pub mod error;
pub mod types;

pub use config::{CosmeticSettings, HeadshotSettings, RunSettings, ScaleMode, ScalePools};
pub use error::{Result, VariantError};
pub use types::EntityCategory;
