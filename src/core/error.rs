use thiserror::Error;

#[derive(Error, Debug)]
pub enum VariantError {
    #[error("Required configuration key not found: {path}")]
    MissingConfig { path: String },

    #[error("Unknown rand_function '{function}' for property {property}")]
    UnknownMutation { property: String, function: String },

    #[error("Invalid range: high {high} < low {low}")]
    InvalidRange { low: String, high: String },

    #[error("Invalid configuration at {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    #[error("Invalid number: '{value}'")]
    InvalidNumber { value: String },

    #[error("Entity types unresolved after bounded passes (inheritance nested too deep): {names:?}")]
    UnresolvedTaxonomy { names: Vec<String> },

    #[error("Invalid run settings: {0}")]
    InvalidSettings(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl VariantError {
    pub fn missing(path: impl Into<String>) -> Self {
        VariantError::MissingConfig { path: path.into() }
    }

    pub fn invalid_config(path: impl Into<String>, reason: impl Into<String>) -> Self {
        VariantError::InvalidConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_number(value: impl Into<String>) -> Self {
        VariantError::InvalidNumber {
            value: value.into(),
        }
    }

    /// True for configuration-integrity failures that abort a run
    pub fn is_config_integrity(&self) -> bool {
        matches!(
            self,
            VariantError::MissingConfig { .. }
                | VariantError::UnknownMutation { .. }
                | VariantError::InvalidConfig { .. }
                | VariantError::InvalidRange { .. }
                | VariantError::InvalidNumber { .. }
                | VariantError::UnresolvedTaxonomy { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, VariantError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_message_names_key() {
        let err = VariantError::missing("ConfigEntityZombie.SizeScale");
        assert!(err.to_string().contains("ConfigEntityZombie.SizeScale"));
        assert!(err.is_config_integrity());
    }

    #[test]
    fn test_io_error_is_not_integrity() {
        let err: VariantError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_config_integrity());
    }
}
