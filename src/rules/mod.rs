//! Generator configuration: loading, the override cascade and mutation kinds

pub mod cascade;
pub mod loader;
pub mod mutation;
pub mod tables;

pub use loader::{load_generator_config, parse_generator_config};
pub use mutation::{Mutation, MutationKind, MutationStage};
pub use tables::{CategoryTable, EntityOverride, GeneratorConfig, PropertyBlock, Settings};
